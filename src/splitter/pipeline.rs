// Stages
// - Mask: foreground extraction, then small-component denoise.
// - Crop: content mask cut to the foreground bounding box.
// - Axes: projection, all four strategies, selection, covering partition.
// - Assemble: grid cells cropped from the sheet, trimmed, area filtered.
// - Fallback: whole sheet trimmed when no cell survives.

use super::params::SplitParams;
use crate::assembler::{assemble_frames, fallback_frame};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    AxisTrace, FrameDescriptor, InputDescriptor, SplitReport, SplitTrace, TimingBreakdown,
};
use crate::error::SplitError;
use crate::image::{ImageView, Mask, PixelBuffer};
use crate::mask::{extract_foreground_mask, remove_small_components};
use crate::segmenters::{propose_all, AxisInput};
use crate::selector::{cover_axis, select_axis_segments};
use crate::signal::project;
use crate::types::{Axis, Frame, SplitResult};
use log::debug;
use std::time::Instant;

/// Splits RGBA sprite sheets into per-frame images.
///
/// ```no_run
/// use sprite_splitter::{SpriteSplitter, SplitParams};
/// use sprite_splitter::image::PixelBuffer;
///
/// # fn example(sheet: PixelBuffer) -> Result<(), sprite_splitter::SplitError> {
/// let splitter = SpriteSplitter::new(SplitParams::with_min_frame_area(64));
/// let report = splitter.split_with_diagnostics(&sheet)?;
/// println!("{}", report.trace.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpriteSplitter {
    params: SplitParams,
}

impl SpriteSplitter {
    pub fn new(params: SplitParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    /// Split `image` into frames.
    pub fn split(&self, image: &PixelBuffer) -> Result<SplitResult, SplitError> {
        self.split_with_diagnostics(image).map(|report| report.result)
    }

    /// Split `image` and capture a trace of every stage.
    pub fn split_with_diagnostics(&self, image: &PixelBuffer) -> Result<SplitReport, SplitError> {
        self.params.validate()?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(SplitError::EmptyImage { width, height });
        }

        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let mask_start = Instant::now();
        let foreground = extract_foreground_mask(image, &self.params.mask);
        let mask = self.denoise(foreground.mask);
        timings.push_since("mask", mask_start);

        let content_bbox = mask
            .bounding_box()
            .ok_or(SplitError::NoContent { width, height })?;
        let content = mask.crop(&content_bbox);

        let axes_start = Instant::now();
        let rows = self.segment_axis(&content, Axis::Rows);
        let cols = self.segment_axis(&content, Axis::Cols);
        timings.push_since("axes", axes_start);

        let assemble_start = Instant::now();
        let mut frames = assemble_frames(
            image,
            &content,
            &content_bbox,
            &rows.segments,
            &cols.segments,
            self.params.min_frame_area,
            self.params.denoise_component_area(),
        );
        let used_fallback = frames.is_empty();
        if used_fallback {
            debug!("splitter: no grid cell survived, falling back to the whole sheet");
            frames.push(fallback_frame(image));
        }
        timings.push_since("assemble", assemble_start);

        debug!(
            "splitter: rows={} cols={} frames={}",
            rows.segments.len(),
            cols.segments.len(),
            frames.len()
        );
        timings.total_ms = elapsed_ms(total_start);

        let trace = SplitTrace {
            input: InputDescriptor {
                width,
                height,
                min_frame_area: self.params.min_frame_area,
                foreground_pixels: mask.count(),
            },
            mask_source: foreground.source,
            content_bbox,
            frames: frames
                .iter()
                .enumerate()
                .map(|(index, f)| FrameDescriptor {
                    index,
                    bbox: f.bbox,
                    visible_pixels: f.image.non_transparent_count(),
                })
                .collect(),
            used_fallback,
            timings,
            rows: rows.clone(),
            cols: cols.clone(),
        };
        let result = SplitResult {
            frames,
            row_segments: rows.segments,
            col_segments: cols.segments,
        };
        Ok(SplitReport { result, trace })
    }

    /// Drop components below the denoise area unless that empties the mask.
    fn denoise(&self, mask: Mask) -> Mask {
        let clean = remove_small_components(&mask, self.params.denoise_component_area());
        if clean.any() {
            clean
        } else {
            mask
        }
    }

    fn segment_axis(&self, content: &Mask, axis: Axis) -> AxisTrace {
        let axis_size = axis.size(content.width(), content.height());
        let signal = project(content, axis);
        let input = AxisInput {
            mask: content,
            axis,
            signal: &signal,
            min_frame_area: self.params.min_frame_area,
        };
        let candidates = propose_all(&input, &self.params);
        debug!(
            "splitter: axis={} size={} proposals={:?}",
            axis.name(),
            axis_size,
            candidates
                .proposals
                .iter()
                .map(|p| (p.strategy.name(), p.segments.len()))
                .collect::<Vec<_>>()
        );
        let selection = select_axis_segments(&candidates, &signal, axis_size, &self.params.scoring);
        AxisTrace {
            axis,
            axis_size,
            segments: cover_axis(&selection.segments, axis_size),
            candidates: selection.scores,
            preferred_count: selection.preferred_count,
            winner: selection.winner,
        }
    }
}

/// Split with default parameters and the given minimum frame area.
pub fn split_frames(image: &PixelBuffer, min_frame_area: usize) -> Result<Vec<Frame>, SplitError> {
    SpriteSplitter::new(SplitParams::with_min_frame_area(min_frame_area))
        .split(image)
        .map(|result| result.frames)
}
