#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod metrics;
pub mod splitter;
pub mod types;

// Stage modules – public for tools and tests, considered internals.
pub mod assembler;
pub mod config;
pub mod filters;
pub mod mask;
pub mod segmenters;
pub mod selector;
pub mod signal;

// --- High-level re-exports -------------------------------------------------

// Main entry points: splitter + results.
pub use crate::error::SplitError;
pub use crate::splitter::{split_frames, SplitParams, SpriteSplitter};
pub use crate::types::{BoundingBox, Frame, Segment, SegmentSet, SplitResult};

// High-level diagnostics returned by the splitter.
pub use crate::diagnostics::{SplitReport, SplitTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sprite_splitter::prelude::*;
///
/// # fn main() -> Result<(), SplitError> {
/// let mut sheet = PixelBuffer::new(96, 32);
/// sheet.fill_rect(4, 4, 24, 24, [200, 40, 40, 255]);
/// sheet.fill_rect(68, 4, 24, 24, [40, 200, 40, 255]);
///
/// let result = SpriteSplitter::new(SplitParams::default()).split(&sheet)?;
/// println!("frames={}", result.frames.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, Mask, PixelBuffer};
    pub use crate::{Frame, SplitError, SplitParams, SplitResult, SpriteSplitter};
}
