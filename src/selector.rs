//! Axis segment selection.
//!
//! Every strategy proposal is clipped to the axis, and only proposals with at
//! least two segments compete. Each competitor is scored by how empty the
//! projection is around its separators, how balanced its segment lengths
//! are, and how far its count strays from the bright-spot count. The
//! highest score wins; ties keep the earlier strategy in
//! [`Strategy::ORDER`]. With no competitor the axis is one full-span segment.

use crate::segmenters::{AxisCandidates, Strategy};
use crate::signal::mean_std;
use crate::splitter::params::ScoringParams;
use crate::types::{Segment, SegmentSet};
use log::debug;
use serde::Serialize;

/// Score sheet entry for one strategy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateScore {
    pub strategy: Strategy,
    /// Proposal after clipping to the axis.
    pub segments: SegmentSet,
    /// `None` when the proposal has fewer than two segments.
    pub score: Option<f64>,
}

/// Outcome of selecting one axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisSelection {
    /// Winning segments, as proposed (not yet normalized by [`cover_axis`]).
    pub segments: SegmentSet,
    /// `None` when no strategy produced a multi-segment proposal.
    pub winner: Option<Strategy>,
    pub preferred_count: Option<usize>,
    pub scores: Vec<CandidateScore>,
}

/// Clamp segments into `[0, axis_size - 1]`, dropping inverted ones. An
/// empty result becomes the single full-span segment.
pub fn clip_segments(segments: &[Segment], axis_size: usize) -> SegmentSet {
    let last = axis_size.saturating_sub(1);
    let clipped: SegmentSet = segments
        .iter()
        .filter_map(|s| {
            let start = s.start.min(last);
            let end = s.end.min(last);
            (end >= start).then(|| Segment::new(start, end))
        })
        .collect();
    if clipped.is_empty() {
        vec![Segment::new(0, last)]
    } else {
        clipped
    }
}

/// Mean over adjacent pairs of `1 - min(1, local / max)`, where `local` is
/// the average signal in a small window around the pair's boundary.
pub fn separator_emptiness(
    segments: &[Segment],
    signal: &[usize],
    axis_size: usize,
    params: &ScoringParams,
) -> f64 {
    if segments.len() <= 1 || signal.is_empty() {
        return 0.0;
    }
    let max_signal = signal.iter().copied().max().unwrap_or(0) as f64;
    if max_signal <= 0.0 {
        return 1.0;
    }
    let radius = params
        .probe_min_radius
        .max(axis_size / params.probe_divisor.max(1));
    let last = signal.len() - 1;

    let scores: Vec<f64> = segments
        .windows(2)
        .map(|pair| {
            let boundary = ((pair[0].end + pair[1].start) / 2).min(last);
            let lo = boundary.saturating_sub(radius);
            let hi = (boundary + radius).min(last);
            let window = &signal[lo..=hi];
            let local = window.iter().sum::<usize>() as f64 / window.len() as f64;
            1.0 - (local / max_signal).min(1.0)
        })
        .collect();
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// `max(0, 1 - stdev / mean)` of the segment lengths.
pub fn length_balance(segments: &[Segment]) -> f64 {
    let lengths: Vec<f64> = segments.iter().map(|s| s.len() as f64).collect();
    let (mean, std) = mean_std(&lengths);
    if mean <= 0.0 {
        return 0.0;
    }
    (1.0 - std / mean).max(0.0)
}

/// Relative distance of `count` from the preferred count.
pub fn count_penalty(count: usize, preferred: Option<usize>) -> f64 {
    match preferred {
        Some(p) => count.abs_diff(p) as f64 / p.max(1) as f64,
        None => 0.0,
    }
}

/// Weighted score of one candidate; `-inf` for fewer than two segments.
pub fn score_axis_candidate(
    segments: &[Segment],
    signal: &[usize],
    axis_size: usize,
    preferred: Option<usize>,
    params: &ScoringParams,
) -> f64 {
    if segments.len() <= 1 {
        return f64::NEG_INFINITY;
    }
    separator_emptiness(segments, signal, axis_size, params) * params.separator_weight
        + length_balance(segments) * params.balance_weight
        - count_penalty(segments.len(), preferred) * params.count_penalty_weight
}

/// Pick the segments for one axis from every strategy's proposal.
pub fn select_axis_segments(
    candidates: &AxisCandidates,
    signal: &[usize],
    axis_size: usize,
    params: &ScoringParams,
) -> AxisSelection {
    let primary = clip_segments(candidates.get(Strategy::BrightSpot), axis_size);
    let preferred_count = (primary.len() > 1).then_some(primary.len());

    let scores: Vec<CandidateScore> = Strategy::ORDER
        .iter()
        .map(|&strategy| {
            let segments = clip_segments(candidates.get(strategy), axis_size);
            let score = (segments.len() > 1).then(|| {
                score_axis_candidate(&segments, signal, axis_size, preferred_count, params)
            });
            CandidateScore {
                strategy,
                segments,
                score,
            }
        })
        .collect();

    let mut best: Option<(&CandidateScore, f64)> = None;
    for cand in &scores {
        let Some(score) = cand.score else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((cand, score)),
        }
    }

    let (segments, winner) = match best {
        Some((cand, score)) => {
            debug!(
                "selector: axis={} winner={} score={:.4} segments={}",
                candidates.axis.name(),
                cand.strategy.name(),
                score,
                cand.segments.len()
            );
            (cand.segments.clone(), Some(cand.strategy))
        }
        None => {
            debug!(
                "selector: axis={} no multi-segment candidate, using full span",
                candidates.axis.name()
            );
            (vec![Segment::new(0, axis_size.saturating_sub(1))], None)
        }
    };

    AxisSelection {
        segments,
        winner,
        preferred_count,
        scores,
    }
}

/// Normalize `segments` into an ordered partition of `[0, axis_size - 1]`.
///
/// Overlaps are resolved in favour of the earlier segment, gaps are split at
/// their midpoint (the midpoint joins the left segment), and the outermost
/// segments are stretched to the axis ends.
pub fn cover_axis(segments: &[Segment], axis_size: usize) -> SegmentSet {
    if axis_size == 0 {
        return Vec::new();
    }
    let last = axis_size - 1;
    let mut sorted = clip_segments(segments, axis_size);
    sorted.sort_by_key(|s| (s.start, s.end));

    let mut out: SegmentSet = Vec::with_capacity(sorted.len());
    for mut seg in sorted {
        if let Some(prev) = out.last_mut() {
            if seg.end <= prev.end {
                continue;
            }
            if seg.start <= prev.end {
                seg.start = prev.end + 1;
            } else if seg.start > prev.end + 1 {
                let mid = (prev.end + seg.start) / 2;
                prev.end = mid;
                seg.start = mid + 1;
            }
        }
        out.push(seg);
    }

    if let Some(first) = out.first_mut() {
        first.start = 0;
    }
    if let Some(tail) = out.last_mut() {
        tail.end = last;
    }
    out
}
