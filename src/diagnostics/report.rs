use super::TimingBreakdown;
use crate::mask::MaskSource;
use crate::selector::CandidateScore;
use crate::segmenters::Strategy;
use crate::types::{Axis, BoundingBox, SegmentSet, SplitResult};
use serde::Serialize;

/// Result produced by [`SpriteSplitter::split_with_diagnostics`](crate::SpriteSplitter).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    #[serde(skip)]
    pub result: SplitResult,
    pub trace: SplitTrace,
}

/// End-to-end trace of one split.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitTrace {
    pub input: InputDescriptor,
    pub mask_source: MaskSource,
    /// Foreground bounding box the grid is local to.
    pub content_bbox: BoundingBox,
    pub rows: AxisTrace,
    pub cols: AxisTrace,
    pub frames: Vec<FrameDescriptor>,
    pub used_fallback: bool,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub min_frame_area: usize,
    /// Foreground pixels after denoising.
    pub foreground_pixels: usize,
}

/// Per-axis record: every strategy's clipped proposal and score, the winner
/// and the final covering segments.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTrace {
    pub axis: Axis,
    pub axis_size: usize,
    pub candidates: Vec<CandidateScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Strategy>,
    pub segments: SegmentSet,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    pub index: usize,
    pub bbox: BoundingBox,
    pub visible_pixels: usize,
}

impl SplitTrace {
    /// One-line summary used by the demo binary.
    pub fn summary(&self) -> String {
        let winner = |t: &AxisTrace| t.winner.map(Strategy::name).unwrap_or("-");
        format!(
            "{}x{} rows={} ({}) cols={} ({}) frames={}{} in {:.2} ms",
            self.input.width,
            self.input.height,
            self.rows.segments.len(),
            winner(&self.rows),
            self.cols.segments.len(),
            winner(&self.cols),
            self.frames.len(),
            if self.used_fallback { " [fallback]" } else { "" },
            self.timings.total_ms
        )
    }
}
