//! Filters applied to signal-driven proposals. Each reverts to the input
//! when it would drop every segment.

use crate::signal::{median, round_to_usize, segment_mass};
use crate::splitter::params::SegmentFilterParams;
use crate::types::SegmentSet;

/// Drop segments whose signal mass is below `mass_keep_ratio` of the heaviest.
pub fn drop_small_segment_masses(
    segments: SegmentSet,
    signal: &[usize],
    mass_keep_ratio: f64,
) -> SegmentSet {
    if segments.len() <= 1 {
        return segments;
    }
    let masses: Vec<usize> = segments.iter().map(|s| segment_mass(signal, s)).collect();
    let max_mass = masses.iter().copied().max().unwrap_or(0);
    if max_mass == 0 {
        return segments;
    }
    let floor = round_to_usize(max_mass as f64 * mass_keep_ratio).max(1);
    let kept: SegmentSet = segments
        .iter()
        .zip(&masses)
        .filter(|&(_, &m)| m >= floor)
        .map(|(s, _)| *s)
        .collect();
    if kept.is_empty() {
        segments
    } else {
        kept
    }
}

/// Drop segments shorter than `length_keep_ratio` of the median length.
pub fn drop_short_segments(segments: SegmentSet, length_keep_ratio: f64) -> SegmentSet {
    if segments.len() <= 1 {
        return segments;
    }
    let lengths: Vec<f64> = segments.iter().map(|s| s.len() as f64).collect();
    let min_len = round_to_usize(median(&lengths) * length_keep_ratio).max(1);
    let kept: SegmentSet = segments
        .iter()
        .filter(|s| s.len() >= min_len)
        .copied()
        .collect();
    if kept.is_empty() {
        segments
    } else {
        kept
    }
}

/// Mass filter followed by the length filter.
pub fn apply(segments: SegmentSet, signal: &[usize], params: &SegmentFilterParams) -> SegmentSet {
    let by_mass = drop_small_segment_masses(segments, signal, params.mass_keep_ratio);
    drop_short_segments(by_mass, params.length_keep_ratio)
}
