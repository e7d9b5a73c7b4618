//! Connected-component segmentation.
//!
//! A 3×3 opening removes specks, then a closing with a kernel elongated
//! along the target axis bridges small gaps inside a frame without bridging
//! the wider gaps between frames. Major components are projected onto the
//! axis and their ranges clustered by centre.

use crate::image::{ImageView, Mask};
use crate::mask::{close, label_components, open, RectKernel};
use crate::signal::{median, round_to_usize};
use crate::splitter::params::ComponentParams;
use crate::types::{Axis, Segment, SegmentSet};

pub fn segment(
    mask: &Mask,
    axis: Axis,
    min_frame_area: usize,
    params: &ComponentParams,
) -> SegmentSet {
    if !mask.any() {
        return Vec::new();
    }
    let (w, h) = (mask.width(), mask.height());
    let opened = open(mask, RectKernel::square(3));
    let merged = close(&opened, close_kernel(axis, w, h, params));

    let labels = label_components(&merged);
    if labels.count() == 0 {
        return Vec::new();
    }

    let max_area = labels.stats.iter().map(|s| s.area).max().unwrap_or(0);
    let area_floor = min_frame_area
        .saturating_mul(params.area_frame_multiplier)
        .max(round_to_usize(max_area as f64 * params.area_max_ratio))
        .max(round_to_usize((w * h) as f64 * params.area_mask_ratio));

    let mut major: Vec<_> = labels
        .stats
        .iter()
        .filter(|s| s.area >= area_floor)
        .collect();
    if major.is_empty() {
        // First of the largest, in label order.
        if let Some(largest) = labels
            .stats
            .iter()
            .reduce(|best, s| if s.area > best.area { s } else { best })
        {
            major.push(largest);
        }
    }

    let ranges: Vec<(usize, usize)> = major
        .iter()
        .map(|s| match axis {
            Axis::Cols => (s.left, s.right),
            Axis::Rows => (s.top, s.bottom),
        })
        .collect();
    cluster_ranges_by_centers(&ranges, axis.size(w, h), params)
}

/// Closing kernel: long along `axis`, short across it.
pub fn close_kernel(axis: Axis, w: usize, h: usize, params: &ComponentParams) -> RectKernel {
    let long = |size: usize| params.close_long_min.max(size / params.close_long_divisor.max(1));
    let short = |size: usize| params.close_short_min.max(size / params.close_short_divisor.max(1));
    match axis {
        Axis::Cols => RectKernel::new(long(w), short(h)),
        Axis::Rows => RectKernel::new(short(w), long(h)),
    }
}

/// Range observation used for 1D clustering along the axis.
struct RangeObs {
    center: f64,
    start: usize,
    end: usize,
}

/// Group ranges whose centres are within
/// `max(cluster_min_gap, span_ratio * median_len, axis_ratio * axis_size)`
/// of their predecessor, then join clusters separated by at most
/// `max(join_min_gap, axis_size / join_divisor)`.
pub fn cluster_ranges_by_centers(
    ranges: &[(usize, usize)],
    axis_size: usize,
    params: &ComponentParams,
) -> SegmentSet {
    if ranges.is_empty() {
        return Vec::new();
    }
    let mut obs: Vec<RangeObs> = ranges
        .iter()
        .map(|&(start, end)| RangeObs {
            center: (start + end) as f64 * 0.5,
            start,
            end,
        })
        .collect();
    obs.sort_by(|a, b| a.center.total_cmp(&b.center));

    let spans: Vec<f64> = obs.iter().map(|o| (o.end - o.start + 1) as f64).collect();
    let gap = params
        .cluster_min_gap
        .max(median(&spans) * params.cluster_span_ratio)
        .max(axis_size as f64 * params.cluster_axis_ratio);

    let mut clusters: Vec<Segment> = Vec::new();
    let mut prev_center = f64::NEG_INFINITY;
    for o in &obs {
        match clusters.last_mut() {
            Some(cur) if o.center - prev_center <= gap => {
                cur.start = cur.start.min(o.start);
                cur.end = cur.end.max(o.end);
            }
            _ => clusters.push(Segment::new(o.start, o.end)),
        }
        prev_center = o.center;
    }

    clusters.sort_by_key(|s| s.start);
    let join_gap = params
        .join_min_gap
        .max(axis_size / params.join_divisor.max(1));
    merge_near_ranges(&clusters, join_gap)
}

fn merge_near_ranges(ranges: &[Segment], join_gap: usize) -> SegmentSet {
    let Some((&first, rest)) = ranges.split_first() else {
        return Vec::new();
    };
    let mut merged = Vec::with_capacity(ranges.len());
    let mut cur = first;
    for &r in rest {
        if r.start <= cur.end + join_gap {
            cur.end = cur.end.max(r.end);
            continue;
        }
        merged.push(cur);
        cur = r;
    }
    merged.push(cur);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_elongated_along_axis() {
        let p = ComponentParams::default();
        assert_eq!(close_kernel(Axis::Cols, 1800, 480, &p), RectKernel::new(10, 3));
        assert_eq!(close_kernel(Axis::Rows, 1800, 480, &p), RectKernel::new(7, 5));
    }

    #[test]
    fn nearby_centres_form_one_cluster() {
        let p = ComponentParams::default();
        let ranges = [(0, 19), (2, 17), (50, 69), (52, 66), (100, 119)];
        let segs = cluster_ranges_by_centers(&ranges, 120, &p);
        assert_eq!(
            segs,
            vec![Segment::new(0, 19), Segment::new(50, 69), Segment::new(100, 119)]
        );
    }

    #[test]
    fn touching_clusters_are_joined() {
        let p = ComponentParams::default();
        let ranges = [(0, 30), (32, 80)];
        let segs = cluster_ranges_by_centers(&ranges, 81, &p);
        assert_eq!(segs, vec![Segment::new(0, 80)]);
    }

    #[test]
    fn separate_blobs_yield_one_range_each() {
        let mask = Mask::from_fn(90, 20, |x, y| {
            (2..18).contains(&y) && ((0..20).contains(&x) || (35..55).contains(&x) || (70..90).contains(&x))
        });
        let segs = segment(&mask, Axis::Cols, 4, &ComponentParams::default());
        assert_eq!(
            segs,
            vec![Segment::new(0, 19), Segment::new(35, 54), Segment::new(70, 89)]
        );
        let rows = segment(&mask, Axis::Rows, 4, &ComponentParams::default());
        assert_eq!(rows, vec![Segment::new(2, 17)]);
    }
}
