//! Gap-based segmentation.
//!
//! Positions whose projection stays at or below
//! `max(1, round(median_nonzero * signal_ratio), round(orthogonal * axis_pixel_ratio))`
//! are empty. Short non-empty blips inside an empty stretch are treated as
//! noise, and only empty runs at least `min_empty_band` long separate frames.
//! Each such band contributes one separator at its midpoint.

use super::postfilter;
use crate::signal::{
    extract_runs, fill_short_false_runs, median, non_zero_span, round_to_usize,
    split_at_separators,
};
use crate::splitter::params::{EmptyBandParams, SegmentFilterParams};
use crate::types::{Axis, Segment, SegmentSet};

/// Minimum width of an empty run that counts as a separator.
pub fn min_band_width(axis: Axis, axis_size: usize, params: &EmptyBandParams) -> usize {
    let (ratio, abs) = match axis {
        Axis::Rows => (params.row_min_ratio, params.row_min_abs),
        Axis::Cols => (params.col_min_ratio, params.col_min_abs),
    };
    abs.max(round_to_usize(axis_size as f64 * ratio))
}

pub fn segment(
    signal: &[usize],
    orthogonal_size: usize,
    min_empty_band: usize,
    params: &EmptyBandParams,
    filter: &SegmentFilterParams,
) -> SegmentSet {
    let Some((start, end)) = non_zero_span(signal) else {
        return Vec::new();
    };
    let cropped = &signal[start..=end];
    let non_zero: Vec<f64> = cropped
        .iter()
        .filter(|&&v| v > 0)
        .map(|&v| v as f64)
        .collect();

    let dynamic_limit = round_to_usize(median(&non_zero) * params.signal_ratio);
    let static_limit = round_to_usize(orthogonal_size as f64 * params.axis_pixel_ratio);
    let empty_limit = dynamic_limit.max(static_limit).max(1);

    let empty: Vec<bool> = cropped.iter().map(|&v| v <= empty_limit).collect();
    let empty = fill_short_false_runs(&empty, params.interrupt_max);

    let min_empty_band = min_empty_band.max(1);
    let separators: Vec<usize> = extract_runs(&empty)
        .into_iter()
        .filter(|&(s, e)| e - s + 1 >= min_empty_band)
        .map(|(s, e)| (s + e) / 2)
        .collect();
    if separators.is_empty() {
        return vec![Segment::new(start, end)];
    }

    let segments = split_at_separators(start, cropped.len(), &separators);
    if segments.is_empty() {
        return vec![Segment::new(start, end)];
    }
    postfilter::apply(segments, signal, filter)
}
