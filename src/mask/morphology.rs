use crate::image::{ImageView, Mask};

/// Rectangular structuring element of ones, anchored at `(w / 2, h / 2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectKernel {
    pub w: usize,
    pub h: usize,
}

impl RectKernel {
    pub const fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    pub const fn square(size: usize) -> Self {
        Self { w: size, h: size }
    }
}

/// Minimum over the kernel window. Samples outside the image are ignored, so
/// foreground touching the border is not eroded by it.
pub fn erode(mask: &Mask, kernel: RectKernel) -> Mask {
    sweep(mask, kernel, true)
}

/// Maximum over the kernel window. Samples outside the image are ignored.
pub fn dilate(mask: &Mask, kernel: RectKernel) -> Mask {
    sweep(mask, kernel, false)
}

/// Erosion followed by dilation; removes specks smaller than the kernel.
pub fn open(mask: &Mask, kernel: RectKernel) -> Mask {
    dilate(&erode(mask, kernel), kernel)
}

/// Dilation followed by erosion; bridges gaps narrower than the kernel.
pub fn close(mask: &Mask, kernel: RectKernel) -> Mask {
    erode(&dilate(mask, kernel), kernel)
}

// A rectangle of ones is separable: run the 1-D window along x, then y.
fn sweep(mask: &Mask, kernel: RectKernel, all: bool) -> Mask {
    let (w, h) = (mask.width(), mask.height());
    if w == 0 || h == 0 || kernel.w == 0 || kernel.h == 0 {
        return mask.clone();
    }
    let (ax, ay) = (kernel.w / 2, kernel.h / 2);

    let horiz = Mask::from_fn(w, h, |x, y| {
        let row = mask.row(y);
        let lo = x.saturating_sub(ax);
        let hi = (x + kernel.w - 1 - ax).min(w - 1);
        window_hit(&row[lo..=hi], all)
    });

    let mut column = vec![false; h];
    let mut out = Mask::new(w, h);
    for x in 0..w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = horiz.get(x, y);
        }
        for y in 0..h {
            let lo = y.saturating_sub(ay);
            let hi = (y + kernel.h - 1 - ay).min(h - 1);
            out.set(x, y, window_hit(&column[lo..=hi], all));
        }
    }
    out
}

#[inline]
fn window_hit(window: &[bool], all: bool) -> bool {
    if all {
        window.iter().all(|&v| v)
    } else {
        window.iter().any(|&v| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_removes_isolated_pixels() {
        let mut mask = Mask::new(9, 9);
        mask.set(1, 1, true);
        for y in 4..8 {
            for x in 4..8 {
                mask.set(x, y, true);
            }
        }
        let opened = open(&mask, RectKernel::square(3));
        assert!(!opened.get(1, 1));
        assert_eq!(opened.count(), 16);
    }

    #[test]
    fn closing_bridges_narrow_gaps_along_x() {
        let mask = Mask::from_fn(12, 3, |x, _| x != 5 && x != 6);
        let closed = close(&mask, RectKernel::new(5, 1));
        assert_eq!(closed.count(), 36);
        let wide_gap = Mask::from_fn(20, 3, |x, _| !(5..12).contains(&x));
        assert_eq!(close(&wide_gap, RectKernel::new(5, 1)), wide_gap);
    }

    #[test]
    fn border_foreground_survives_erosion() {
        let mask = Mask::from_fn(4, 4, |_, _| true);
        assert_eq!(erode(&mask, RectKernel::square(3)).count(), 16);
    }
}
