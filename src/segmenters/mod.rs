//! Axis segmenters: four independent strategies proposing a [`SegmentSet`]
//! for one axis of the content mask.
//!
//! Strategies are evaluated eagerly in the fixed order of
//! [`Strategy::ORDER`] (bright-spot, empty-band, projection-peak, component).
//! The selector relies on that order for tie-breaking, and treats the
//! bright-spot proposal as the primary one.
//!
//! Modules
//! - [`bright_spot`] – peaks of a blurred low-resolution density heatmap.
//! - [`empty_band`] – wide runs of (nearly) empty rows/columns.
//! - [`projection_peak`] – valleys between peaks of the smoothed projection.
//! - [`component`] – morphology + connected components, clustered by centre.
//! - [`postfilter`] – mass/length filters shared by the signal-driven ones.

pub mod bright_spot;
pub mod component;
pub mod empty_band;
pub mod postfilter;
pub mod projection_peak;


use crate::image::{ImageView, Mask};
use crate::splitter::params::SplitParams;
use crate::types::{Axis, SegmentSet};
use serde::Serialize;

/// Closed set of segmentation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BrightSpot,
    EmptyBand,
    ProjectionPeak,
    Component,
}

impl Strategy {
    /// Evaluation order; earlier strategies win score ties.
    pub const ORDER: [Strategy; 4] = [
        Strategy::BrightSpot,
        Strategy::EmptyBand,
        Strategy::ProjectionPeak,
        Strategy::Component,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BrightSpot => "bright_spot",
            Strategy::EmptyBand => "empty_band",
            Strategy::ProjectionPeak => "projection_peak",
            Strategy::Component => "component",
        }
    }

    /// Propose segments for `input.axis`. An empty set means "no candidate".
    pub fn propose(self, input: &AxisInput<'_>, params: &SplitParams) -> SegmentSet {
        let (w, h) = (input.mask.width(), input.mask.height());
        let axis_size = input.axis.size(w, h);
        match self {
            Strategy::BrightSpot => bright_spot::segment(
                input.mask,
                input.axis,
                input.signal,
                &params.bright_spot,
                &params.segment_filter,
            ),
            Strategy::EmptyBand => empty_band::segment(
                input.signal,
                input.axis.orthogonal_size(w, h),
                empty_band::min_band_width(input.axis, axis_size, &params.empty_band),
                &params.empty_band,
                &params.segment_filter,
            ),
            Strategy::ProjectionPeak => projection_peak::segment(
                input.signal,
                axis_size,
                &params.projection_peak,
                &params.segment_filter,
            ),
            Strategy::Component => component::segment(
                input.mask,
                input.axis,
                input.min_frame_area,
                &params.component,
            ),
        }
    }
}

/// Everything a strategy may look at for one axis.
#[derive(Clone, Copy, Debug)]
pub struct AxisInput<'a> {
    /// Content mask cropped to the foreground bounding box.
    pub mask: &'a Mask,
    pub axis: Axis,
    /// Projection of `mask` onto `axis`.
    pub signal: &'a [usize],
    pub min_frame_area: usize,
}

/// One strategy's proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub strategy: Strategy,
    pub segments: SegmentSet,
}

/// Proposals of every strategy for one axis, in [`Strategy::ORDER`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisCandidates {
    pub axis: Axis,
    pub proposals: Vec<Proposal>,
}

impl AxisCandidates {
    pub fn get(&self, strategy: Strategy) -> &[crate::types::Segment] {
        self.proposals
            .iter()
            .find(|p| p.strategy == strategy)
            .map(|p| p.segments.as_slice())
            .unwrap_or(&[])
    }
}

/// Run every strategy on one axis.
pub fn propose_all(input: &AxisInput<'_>, params: &SplitParams) -> AxisCandidates {
    let proposals = Strategy::ORDER
        .iter()
        .map(|&strategy| Proposal {
            strategy,
            segments: strategy.propose(input, params),
        })
        .collect();
    AxisCandidates {
        axis: input.axis,
        proposals,
    }
}
