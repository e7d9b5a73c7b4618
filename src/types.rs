use crate::image::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Inclusive interval `(start, end)` along one axis, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Segment {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "segment start {start} > end {end}");
        Self { start, end }
    }

    /// Pixel count; a closed interval always holds at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl From<(usize, usize)> for Segment {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Ordered, non-overlapping sequence of segments along one axis.
pub type SegmentSet = Vec<Segment>;

/// Axis-aligned pixel rectangle in absolute image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl BoundingBox {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Box spanning the inclusive row and column segments.
    pub fn from_segments(rows: Segment, cols: Segment) -> Self {
        Self {
            x: cols.start,
            y: rows.start,
            w: cols.len(),
            h: rows.len(),
        }
    }

    /// Inclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.w - 1
    }

    /// Inclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.h - 1
    }

    pub fn area(&self) -> usize {
        self.w * self.h
    }

    /// Shift by `(dx, dy)`; used to lift a box from a crop into its parent.
    pub fn offset(&self, dx: usize, dy: usize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// One cropped sprite frame and the rectangle of the sheet it was cut from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub image: PixelBuffer,
    pub bbox: BoundingBox,
}

/// Output of one split: frames in row-major grid order plus the chosen
/// row/column segments (local to the foreground bounding box).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitResult {
    pub frames: Vec<Frame>,
    pub row_segments: SegmentSet,
    pub col_segments: SegmentSet,
}

/// Axis being segmented. `Rows` cuts along `y`, `Cols` along `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Rows,
    Cols,
}

impl Axis {
    /// Extent along the axis for an image of size `w × h`.
    #[inline]
    pub fn size(self, w: usize, h: usize) -> usize {
        match self {
            Axis::Rows => h,
            Axis::Cols => w,
        }
    }

    /// Extent across the axis for an image of size `w × h`.
    #[inline]
    pub fn orthogonal_size(self, w: usize, h: usize) -> usize {
        match self {
            Axis::Rows => w,
            Axis::Cols => h,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Rows => "rows",
            Axis::Cols => "cols",
        }
    }
}
