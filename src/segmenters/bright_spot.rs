//! Density-heatmap peak segmentation.
//!
//! The mask is area-downsampled so its longer side is at most
//! `max_downscale_dim` (never below `min_downscale_dim`), blurred with a
//! Gaussian whose sigma assumes at most `max_frames_per_axis` frames, and
//! summed across the axis. Each frame shows up as a bright bump in that
//! profile; cuts go halfway between neighbouring bumps.

use super::postfilter;
use crate::filters::{apply_filter, resize_area, GaussianKernel};
use crate::image::{ImageView, Mask};
use crate::signal::{local_maxima, merge_peak_indices, percentile, round_to_usize};
use crate::splitter::params::{BrightSpotParams, SegmentFilterParams};
use crate::types::{Axis, Segment, SegmentSet};

pub fn segment(
    mask: &Mask,
    axis: Axis,
    signal: &[usize],
    params: &BrightSpotParams,
    filter: &SegmentFilterParams,
) -> SegmentSet {
    if !mask.any() {
        return Vec::new();
    }
    let (w, h) = (mask.width(), mask.height());
    let (dw, dh) = downscaled_size(w, h, params);

    let reduced = resize_area(mask, dw, dh);
    let per_axis = params.max_frames_per_axis as f64 * params.sigma_divisor;
    let kx = GaussianKernel::from_sigma((dw as f64 / per_axis).max(1.0));
    let ky = GaussianKernel::from_sigma((dh as f64 / per_axis).max(1.0));
    let heat = apply_filter(&reduced, &kx, &ky);

    let profile: Vec<f64> = match axis {
        Axis::Cols => heat.column_sums(),
        Axis::Rows => heat.row_sums(),
    }
    .into_iter()
    .map(f64::from)
    .collect();

    let peaks = detect_profile_peaks(&profile, params);
    if peaks.len() <= 1 {
        return Vec::new();
    }
    let down = segments_from_peak_centers(&peaks, profile.len());
    if down.len() <= 1 {
        return Vec::new();
    }

    let axis_size = axis.size(w, h);
    let ratio = axis_size as f64 / axis.size(dw, dh) as f64;
    let upscaled = rescale_segments(&down, ratio, axis_size);
    postfilter::apply(upscaled, signal, filter)
}

/// Heatmap size for a `w × h` mask; never larger than the mask itself.
pub fn downscaled_size(w: usize, h: usize, params: &BrightSpotParams) -> (usize, usize) {
    let max_dim = w.max(h);
    let scale = (max_dim as f64 / params.max_downscale_dim as f64).max(1.0);
    let dw = params
        .min_downscale_dim
        .max(round_to_usize(w as f64 / scale))
        .min(w);
    let dh = params
        .min_downscale_dim
        .max(round_to_usize(h as f64 / scale))
        .min(h);
    (dw, dh)
}

/// Peaks above `baseline + peak_ratio * (max - baseline)`, merged and capped
/// at `max_frames_per_axis`. When interior peaks exist, end samples strictly
/// above their only neighbour count too. Falls back to the global argmax when nothing
/// qualifies.
pub fn detect_profile_peaks(profile: &[f64], params: &BrightSpotParams) -> Vec<usize> {
    if profile.is_empty() {
        return Vec::new();
    }
    let baseline = percentile(profile, params.baseline_percentile);
    let max = profile.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let threshold = baseline + (max - baseline) * params.peak_ratio;

    let mut candidates = local_maxima(profile, threshold);
    if candidates.is_empty() {
        return vec![argmax(profile)];
    }
    // The blur mirrors the profile at its ends, so once a grid shows interior
    // bumps a strict maximum on an end sample is a frame flush with the
    // content box. Without interior bumps the ends alone do not make a grid.
    let last = profile.len() - 1;
    if profile[0] >= threshold && profile[0] > profile[1] {
        candidates.insert(0, 0);
    }
    if profile[last] >= threshold && profile[last] > profile[last - 1] {
        candidates.push(last);
    }

    let min_distance = params
        .min_peak_distance
        .max(profile.len() / (params.max_frames_per_axis + 2));
    let mut selected = merge_peak_indices(&candidates, profile, min_distance);

    if selected.len() > params.max_frames_per_axis {
        // Stable: equal heights keep their left-to-right order.
        selected.sort_by(|&a, &b| profile[b].total_cmp(&profile[a]));
        selected.truncate(params.max_frames_per_axis);
        selected.sort_unstable();
    }
    selected
}

/// Cut `[0, len)` halfway between consecutive peaks; the midpoint belongs to
/// the left segment.
pub fn segments_from_peak_centers(peaks: &[usize], len: usize) -> SegmentSet {
    match peaks.len() {
        0 => return Vec::new(),
        1 => return vec![Segment::new(0, len - 1)],
        _ => {}
    }
    let mut segments = Vec::with_capacity(peaks.len());
    let mut start = 0usize;
    for pair in peaks.windows(2) {
        let sep = (pair[0] + pair[1]) / 2;
        if sep >= start {
            segments.push(Segment::new(start, sep));
        }
        start = sep + 1;
    }
    if start < len {
        segments.push(Segment::new(start, len - 1));
    }
    segments
}

/// Map heatmap segments back to full resolution. Starts that would overlap
/// the previous segment are pushed past its end.
pub fn rescale_segments(segments: &[Segment], ratio: f64, axis_size: usize) -> SegmentSet {
    let last = axis_size.saturating_sub(1);
    let mut scaled: SegmentSet = segments
        .iter()
        .filter_map(|s| {
            let start = round_to_usize(s.start as f64 * ratio).min(last);
            let end = round_to_usize((s.end + 1) as f64 * ratio)
                .saturating_sub(1)
                .min(last);
            (end >= start).then(|| Segment::new(start, end))
        })
        .collect();
    scaled.sort_by_key(|s| s.start);

    let mut normalized: SegmentSet = Vec::with_capacity(scaled.len());
    for seg in scaled {
        let start = match normalized.last() {
            Some(prev) if seg.start <= prev.end => prev.end + 1,
            _ => seg.start,
        };
        if seg.end < start {
            continue;
        }
        normalized.push(Segment::new(start, seg.end));
    }
    normalized
}

fn argmax(profile: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in profile.iter().enumerate() {
        if v > profile[best] {
            best = i;
        }
    }
    best
}
