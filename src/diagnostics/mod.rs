//! Diagnostics returned by [`SpriteSplitter::split_with_diagnostics`](crate::SpriteSplitter).
//!
//! `SplitReport` bundles the plain [`SplitResult`](crate::types::SplitResult)
//! with a serializable `SplitTrace`: input geometry, the mask source, every
//! strategy's proposal and score per axis, the chosen grid, frame boxes and
//! stage timings. The trace is what the demo binary writes as JSON.

pub mod report;
pub mod timing;

pub use report::{AxisTrace, FrameDescriptor, InputDescriptor, SplitReport, SplitTrace};
pub use timing::{StageTiming, TimingBreakdown};
