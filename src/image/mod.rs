//! Owned raster buffers used by the splitter.
//!
//! - [`PixelBuffer`]: 8-bit RGBA sheet or frame, one `[u8; 4]` per pixel.
//! - [`Mask`]: boolean foreground mask with the same geometry.
//! - [`ImageF32`]: single-channel float buffer used for density heatmaps.
//!
//! All three implement [`ImageView`], which exposes row access without
//! committing callers to a concrete pixel type.
pub mod f32;
pub mod io;
pub mod mask;
pub mod rgba;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::mask::Mask;
pub use self::rgba::PixelBuffer;
pub use self::traits::{ImageView, ImageViewMut, Rows};
