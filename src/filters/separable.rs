use crate::image::{ImageF32, ImageView, ImageViewMut};
use crate::signal::round_to_usize;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian.
///
/// With `ksize` unspecified the size is `round(sigma * 8 + 1) | 1`, the span
/// used for float images by common imaging libraries.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    pub fn from_sigma(sigma: f64) -> Self {
        let ksize = round_to_usize(sigma * 8.0 + 1.0) | 1;
        Self::with_size(sigma, ksize)
    }

    pub fn with_size(sigma: f64, ksize: usize) -> Self {
        assert!(ksize % 2 == 1, "gaussian kernel size must be odd");
        assert!(sigma > 0.0, "gaussian sigma must be positive");
        let centre = (ksize - 1) as f64 * 0.5;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..ksize)
            .map(|i| {
                let x = i as f64 - centre;
                (scale * x * x).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        let taps = raw.iter().map(|v| (v / sum) as f32).collect();
        Self { taps }
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve rows with `fx` then columns with `fy`. Borders reflect without
/// repeating the edge sample (`dcb|abcd|cba`).
pub fn apply(src: &ImageF32, fx: &dyn SeparableFilter, fy: &dyn SeparableFilter) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut tmp = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return tmp;
    }

    let taps_x = fx.taps();
    let rx = taps_x.len() / 2;
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = tmp.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps_x.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - rx as isize, w);
                acc += tap * src_row[sx];
            }
            *dst = acc;
        }
    }

    let taps_y = fy.taps();
    let ry = taps_y.len() / 2;
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for (k, &tap) in taps_y.iter().enumerate() {
            let sy = reflect_101(y as isize + k as isize - ry as isize, h);
            let src_row = tmp.row(sy);
            let dst_row = out.row_mut(y);
            for (dst, &v) in dst_row.iter_mut().zip(src_row) {
                *dst += tap * v;
            }
        }
    }
    out
}

fn reflect_101(mut idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let n = len as isize;
    loop {
        if idx < 0 {
            idx = -idx;
        } else if idx >= n {
            idx = 2 * n - 2 - idx;
        } else {
            return idx as usize;
        }
    }
}
