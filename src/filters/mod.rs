//! Raster filters used to build the low-resolution density heatmap.
//!
//! - [`area`]: area-averaging downsampler (each output pixel is the mean of
//!   the source area it covers, fractional overlaps weighted).
//! - [`separable`]: separable convolution with reflect-101 borders and a
//!   sigma-driven Gaussian kernel.

pub mod area;
pub mod separable;

pub use area::resize_area;
pub use separable::{apply as apply_filter, GaussianKernel, SeparableFilter};
