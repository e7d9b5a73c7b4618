//! Foreground mask extraction and the binary-image primitives behind it.
//!
//! - [`foreground`]: alpha mask, replaced by an edge-connected background
//!   estimate when the sheet is nearly opaque.
//! - [`components`]: 8-connected labelling with per-component statistics,
//!   border membership and small-component removal. Shared by the background
//!   estimator, the component segmenter and frame trimming.
//! - [`morphology`]: rectangular erosion/dilation and the opening/closing
//!   built from them.

pub mod components;
pub mod foreground;
pub mod morphology;

pub use components::{
    border_connected, label_components, remove_small_components, ComponentLabels, ComponentStats,
};
pub use foreground::{extract_foreground_mask, ForegroundMask, MaskSource};
pub use morphology::{close, dilate, erode, open, RectKernel};
