//! Boolean foreground mask (`true` = content pixel).
use super::traits::ImageView;
use crate::types::BoundingBox;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    w: usize,
    h: usize,
    data: Vec<bool>,
}

impl Mask {
    /// All-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<bool>) -> Self {
        assert_eq!(data.len(), w * h, "mask data does not match {w}x{h}");
        Self { w, h, data }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = v;
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// Tight box around every `true` pixel, `None` for an empty mask.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (mut x0, mut y0) = (usize::MAX, usize::MAX);
        let (mut x1, mut y1) = (0usize, 0usize);
        for (y, row) in self.rows().enumerate() {
            let Some(first) = row.iter().position(|&v| v) else {
                continue;
            };
            let last = row.iter().rposition(|&v| v).unwrap_or(first);
            x0 = x0.min(first);
            x1 = x1.max(last);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        (x0 != usize::MAX).then(|| BoundingBox::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }

    /// Copy out the given rectangle. The box must lie inside the mask.
    pub fn crop(&self, bbox: &BoundingBox) -> Mask {
        let mut data = Vec::with_capacity(bbox.area());
        for y in bbox.y..bbox.y + bbox.h {
            data.extend_from_slice(&self.row(y)[bbox.x..bbox.x + bbox.w]);
        }
        Mask {
            w: bbox.w,
            h: bbox.h,
            data,
        }
    }

    /// True when any pixel inside `bbox` is set.
    pub fn any_in(&self, bbox: &BoundingBox) -> bool {
        (bbox.y..bbox.y + bbox.h).any(|y| self.row(y)[bbox.x..bbox.x + bbox.w].iter().any(|&v| v))
    }

    /// Pixel-wise `self AND NOT other`.
    pub fn and_not(&self, other: &Mask) -> Mask {
        debug_assert_eq!((self.w, self.h), (other.w, other.h));
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a && !b)
            .collect();
        Mask {
            w: self.w,
            h: self.h,
            data,
        }
    }
}

impl ImageView for Mask {
    type Pixel = bool;

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
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
