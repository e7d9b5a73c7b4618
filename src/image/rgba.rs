//! Owned 8-bit RGBA raster.
//!
//! Pixels are stored as `[u8; 4]` in row-major order (`stride == width`).
//! The splitter never mutates an input buffer; crops allocate new buffers.
use super::mask::Mask;
use super::traits::{ImageView, ImageViewMut};
use crate::error::SplitError;
use crate::types::BoundingBox;

pub type Rgba = [u8; 4];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    w: usize,
    h: usize,
    data: Vec<Rgba>,
}

impl PixelBuffer {
    /// Fully transparent buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![[0, 0, 0, 0]; w * h],
        }
    }

    /// Buffer filled with a single colour.
    pub fn filled(w: usize, h: usize, px: Rgba) -> Self {
        Self {
            w,
            h,
            data: vec![px; w * h],
        }
    }

    /// Wrap interleaved RGBA bytes (`4 * w * h` of them).
    pub fn from_raw(w: usize, h: usize, raw: Vec<u8>) -> Result<Self, SplitError> {
        let expected = w * h * 4;
        if raw.len() != expected {
            return Err(SplitError::BufferSizeMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let data = raw
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Ok(Self { w, h, data })
    }

    /// Interleaved RGBA bytes in row-major order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgba) {
        self.data[y * self.w + x] = px;
    }

    /// Paint the rectangle `[x, x+w) × [y, y+h)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, px: Rgba) {
        let x1 = (x + w).min(self.w);
        let y1 = (y + h).min(self.h);
        for yy in y.min(y1)..y1 {
            let row = self.row_mut(yy);
            for dst in &mut row[x.min(x1)..x1] {
                *dst = px;
            }
        }
    }

    /// Copy out the given rectangle. The box must lie inside the buffer.
    pub fn crop(&self, bbox: &BoundingBox) -> PixelBuffer {
        debug_assert!(bbox.x + bbox.w <= self.w && bbox.y + bbox.h <= self.h);
        let mut data = Vec::with_capacity(bbox.area());
        for y in bbox.y..bbox.y + bbox.h {
            data.extend_from_slice(&self.row(y)[bbox.x..bbox.x + bbox.w]);
        }
        PixelBuffer {
            w: bbox.w,
            h: bbox.h,
            data,
        }
    }

    /// Mask of pixels with non-zero alpha.
    pub fn alpha_mask(&self) -> Mask {
        Mask::from_vec(self.w, self.h, self.data.iter().map(|px| px[3] > 0).collect())
    }

    /// Number of pixels with non-zero alpha.
    pub fn non_transparent_count(&self) -> usize {
        self.data.iter().filter(|px| px[3] > 0).count()
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.data
    }
}

impl ImageView for PixelBuffer {
    type Pixel = Rgba;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgba] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for PixelBuffer {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgba] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
