//! Valley segmentation of the box-smoothed projection.

use super::postfilter;
use crate::signal::{
    box_smooth, local_maxima, merge_peak_indices, non_zero_span, percentile, split_at_separators,
};
use crate::splitter::params::{ProjectionPeakParams, SegmentFilterParams};
use crate::types::SegmentSet;

pub fn segment(
    signal: &[usize],
    axis_size: usize,
    params: &ProjectionPeakParams,
    filter: &SegmentFilterParams,
) -> SegmentSet {
    let Some((start, end)) = non_zero_span(signal) else {
        return Vec::new();
    };
    let cropped: Vec<f64> = signal[start..=end].iter().map(|&v| v as f64).collect();
    let window = params
        .min_window
        .max(axis_size / params.window_divisor.max(1));
    let smoothed = box_smooth(&cropped, window);

    let threshold = percentile(&smoothed, params.peak_percentile);
    let raw_peaks = local_maxima(&smoothed, threshold);
    let min_distance = params
        .min_peak_distance
        .max(axis_size / params.peak_distance_divisor.max(1));
    let peaks = merge_peak_indices(&raw_peaks, &smoothed, min_distance);
    if peaks.len() <= 1 {
        return Vec::new();
    }

    let separators: Vec<usize> = peaks
        .windows(2)
        .filter(|pair| pair[1] > pair[0])
        .map(|pair| pair[0] + valley_offset(&smoothed[pair[0]..=pair[1]]))
        .collect();
    if separators.is_empty() {
        return Vec::new();
    }

    let segments = split_at_separators(start, cropped.len(), &separators);
    if segments.len() <= 1 {
        return Vec::new();
    }
    postfilter::apply(segments, signal, filter)
}

/// Index of the first minimum.
fn valley_offset(values: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn bumps(len: usize, ranges: &[(usize, usize)], height: usize) -> Vec<usize> {
        let mut signal = vec![0usize; len];
        for &(s, e) in ranges {
            signal[s..=e].iter_mut().for_each(|v| *v = height);
        }
        signal
    }

    #[test]
    fn cuts_at_valleys_between_bumps() {
        let signal = bumps(120, &[(0, 19), (50, 69), (100, 119)], 80);
        let segs = segment(
            &signal,
            120,
            &ProjectionPeakParams::default(),
            &SegmentFilterParams::default(),
        );
        assert_eq!(
            segs,
            vec![Segment::new(0, 24), Segment::new(26, 74), Segment::new(76, 119)]
        );
    }

    #[test]
    fn single_bump_has_no_candidate() {
        let signal = bumps(60, &[(10, 40)], 5);
        let segs = segment(
            &signal,
            60,
            &ProjectionPeakParams::default(),
            &SegmentFilterParams::default(),
        );
        assert!(segs.is_empty());
    }
}
