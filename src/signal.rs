//! Axis projections of a mask and the 1-D helpers the segmenters share.
//!
//! Numerics follow the conventions the tuned thresholds were fitted with:
//! percentiles interpolate linearly between order statistics, thresholds
//! round half to even and spreads use the population standard deviation.

use crate::image::{ImageView, Mask};
use crate::types::{Axis, Segment, SegmentSet};

/// Per-row foreground counts (`len == mask.height()`).
pub fn row_signal(mask: &Mask) -> Vec<usize> {
    mask.rows()
        .map(|row| row.iter().filter(|&&v| v).count())
        .collect()
}

/// Per-column foreground counts (`len == mask.width()`).
pub fn col_signal(mask: &Mask) -> Vec<usize> {
    let mut counts = vec![0usize; mask.width()];
    for row in mask.rows() {
        for (acc, &v) in counts.iter_mut().zip(row) {
            *acc += v as usize;
        }
    }
    counts
}

/// Projection of `mask` onto `axis`.
pub fn project(mask: &Mask, axis: Axis) -> Vec<usize> {
    match axis {
        Axis::Rows => row_signal(mask),
        Axis::Cols => col_signal(mask),
    }
}

/// Round half to even and clamp at zero.
#[inline]
pub fn round_to_usize(v: f64) -> usize {
    let r = v.round_ties_even();
    if r <= 0.0 {
        0
    } else {
        r as usize
    }
}

/// Linear-interpolation percentile, `q` in `[0, 100]`. Empty input yields 0.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Mean and population standard deviation.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// First and last index with a non-zero value.
pub fn non_zero_span(signal: &[usize]) -> Option<(usize, usize)> {
    let first = signal.iter().position(|&v| v > 0)?;
    let last = signal.iter().rposition(|&v| v > 0)?;
    Some((first, last))
}

/// Sum of `signal` over the inclusive segment.
pub fn segment_mass(signal: &[usize], seg: &Segment) -> usize {
    signal[seg.start..=seg.end].iter().sum()
}

/// Box filter with edge replication. Even windows grow to the next odd size.
pub fn box_smooth(signal: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || signal.is_empty() {
        return signal.to_vec();
    }
    let window = window | 1;
    let pad = window / 2;
    let n = signal.len();
    let at = |i: isize| -> f64 {
        let idx = i.clamp(0, n as isize - 1) as usize;
        signal[idx]
    };
    let inv = 1.0 / window as f64;
    (0..n)
        .map(|i| {
            let base = i as isize - pad as isize;
            (0..window as isize).map(|k| at(base + k)).sum::<f64>() * inv
        })
        .collect()
}

/// Interior local maxima at or above `threshold`: not below either neighbour
/// and strictly above at least one of them.
pub fn local_maxima<T: Copy + PartialOrd>(profile: &[T], threshold: T) -> Vec<usize> {
    let mut peaks = Vec::new();
    if profile.len() < 3 {
        return peaks;
    }
    for i in 1..profile.len() - 1 {
        let (left, value, right) = (profile[i - 1], profile[i], profile[i + 1]);
        if value < threshold {
            continue;
        }
        if value >= left && value >= right && (value > left || value > right) {
            peaks.push(i);
        }
    }
    peaks
}

/// Collapse peaks within `min_distance` of the last kept one, keeping the
/// strictly taller of the two.
pub fn merge_peak_indices<T: Copy + PartialOrd>(
    peaks: &[usize],
    values: &[T],
    min_distance: usize,
) -> Vec<usize> {
    let Some((&first, rest)) = peaks.split_first() else {
        return Vec::new();
    };
    let mut merged = vec![first];
    for &peak in rest {
        let last = merged.len() - 1;
        if peak - merged[last] <= min_distance {
            if values[peak] > values[merged[last]] {
                merged[last] = peak;
            }
            continue;
        }
        merged.push(peak);
    }
    merged
}

/// Inclusive runs of `true`.
pub fn extract_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &v) in flags.iter().enumerate() {
        match (v, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, flags.len() - 1));
    }
    runs
}

/// Flip runs of at most `max_false_run` `false` entries that sit between two
/// `true` entries.
pub fn fill_short_false_runs(flags: &[bool], max_false_run: usize) -> Vec<bool> {
    let mut out = flags.to_vec();
    if max_false_run == 0 {
        return out;
    }
    let mut false_start: Option<usize> = None;
    for i in 0..out.len() {
        match (out[i], false_start) {
            (false, None) => false_start = Some(i),
            (true, Some(s)) => {
                let len = i - s;
                if s > 0 && out[s - 1] && len <= max_false_run {
                    out[s..i].iter_mut().for_each(|v| *v = true);
                }
                false_start = None;
            }
            _ => {}
        }
    }
    out
}

/// Cut `[offset, offset + len)` at each local separator, excluding the
/// separator index itself from both neighbours.
pub fn split_at_separators(offset: usize, len: usize, separators: &[usize]) -> SegmentSet {
    let mut segments = Vec::with_capacity(separators.len() + 1);
    let mut previous = 0usize;
    for &sep in separators {
        if sep >= previous + 1 {
            segments.push(Segment::new(offset + previous, offset + sep - 1));
        }
        previous = sep + 1;
    }
    if previous < len {
        segments.push(Segment::new(offset + previous, offset + len - 1));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_match_mask_geometry() {
        let mut mask = Mask::new(4, 3);
        mask.set(0, 0, true);
        mask.set(3, 0, true);
        mask.set(3, 2, true);
        assert_eq!(row_signal(&mask), vec![2, 0, 1]);
        assert_eq!(col_signal(&mask), vec![1, 0, 0, 2]);
        assert!(row_signal(&Mask::new(0, 0)).is_empty());
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 50.0), 2.5);
        assert!((percentile(&v, 75.0) - 3.25).abs() < 1e-12);
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 4.0);
    }

    #[test]
    fn rounding_is_half_even() {
        assert_eq!(round_to_usize(2.5), 2);
        assert_eq!(round_to_usize(3.5), 4);
        assert_eq!(round_to_usize(-1.0), 0);
    }

    #[test]
    fn short_false_runs_are_filled_only_between_trues() {
        let flags = [true, false, false, true, false, false, false, true, false];
        let filled = fill_short_false_runs(&flags, 2);
        assert_eq!(
            filled,
            vec![true, true, true, true, false, false, false, true, false]
        );
        let leading = [false, true, true];
        assert_eq!(fill_short_false_runs(&leading, 2), leading.to_vec());
    }

    #[test]
    fn runs_cover_trailing_true() {
        let flags = [false, true, true, false, true];
        assert_eq!(extract_runs(&flags), vec![(1, 2), (4, 4)]);
    }

    #[test]
    fn peaks_merge_keeping_the_taller() {
        let values = [0, 5, 0, 7, 0, 0, 0, 0, 3, 0];
        let peaks = local_maxima(&values, 1);
        assert_eq!(peaks, vec![1, 3, 8]);
        assert_eq!(merge_peak_indices(&peaks, &values, 2), vec![3, 8]);
    }

    #[test]
    fn plateau_edges_count_as_maxima() {
        let values = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(local_maxima(&values, 0.5), vec![1, 3]);
    }

    #[test]
    fn box_smooth_replicates_edges() {
        let smoothed = box_smooth(&[3.0, 0.0, 0.0, 0.0], 3);
        assert_eq!(smoothed[0], 2.0);
        assert_eq!(smoothed[1], 1.0);
        assert_eq!(smoothed[3], 0.0);
    }

    #[test]
    fn separators_are_excluded_from_segments() {
        let segs = split_at_separators(10, 12, &[4, 8]);
        assert_eq!(
            segs,
            vec![
                Segment::new(10, 13),
                Segment::new(15, 17),
                Segment::new(19, 21)
            ]
        );
    }
}
