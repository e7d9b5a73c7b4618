//! Parameter types configuring the splitter stages.
//!
//! Every threshold below is an empirically tuned constant carried over from
//! the heuristics this splitter reproduces. The `pub const` values are the
//! defaults of the matching fields; change them only with new evidence from
//! real sheets.

use crate::error::SplitError;
use serde::{Deserialize, Serialize};

// Foreground mask.
pub const OPAQUE_COVERAGE_RATIO: f64 = 0.9;
pub const BACKGROUND_MIN_DISTANCE: f64 = 8.0;
pub const BACKGROUND_NOISE_MARGIN: f64 = 6.0;
pub const BACKGROUND_NOISE_PERCENTILE: f64 = 75.0;

// Empty-band segmenter.
pub const MIN_AXIS_PIXEL_RATIO: f64 = 0.006;
pub const EMPTY_BAND_SIGNAL_RATIO: f64 = 0.04;
pub const EMPTY_BAND_INTERRUPT_MAX: usize = 2;
pub const ROW_EMPTY_BAND_MIN_RATIO: f64 = 0.04;
pub const COL_EMPTY_BAND_MIN_RATIO: f64 = 0.015;
pub const ROW_EMPTY_BAND_MIN_ABS: usize = 20;
pub const COL_EMPTY_BAND_MIN_ABS: usize = 8;

// Segment post filters.
pub const SEGMENT_MASS_KEEP_RATIO: f64 = 0.2;
pub const SEGMENT_LENGTH_KEEP_RATIO: f64 = 0.55;

// Bright-spot segmenter.
pub const MAX_GRID_FRAMES_PER_AXIS: usize = 7;
pub const BRIGHT_SPOT_MAX_DOWNSCALE_DIM: usize = 320;
pub const BRIGHT_SPOT_MIN_DOWNSCALE_DIM: usize = 96;
pub const BRIGHT_SPOT_SIGMA_DIVISOR: f64 = 3.2;
pub const BRIGHT_SPOT_BASELINE_PERCENTILE: f64 = 55.0;
pub const BRIGHT_SPOT_PEAK_RATIO: f64 = 0.22;
pub const BRIGHT_SPOT_MIN_PEAK_DISTANCE: usize = 6;

// Projection-peak segmenter.
pub const PROJECTION_MIN_WINDOW: usize = 11;
pub const PROJECTION_WINDOW_DIVISOR: usize = 80;
pub const PROJECTION_PEAK_PERCENTILE: f64 = 60.0;
pub const PROJECTION_MIN_PEAK_DISTANCE: usize = 10;
pub const PROJECTION_PEAK_DISTANCE_DIVISOR: usize = 10;

// Connected-component segmenter.
pub const COMPONENT_AREA_FRAME_MULTIPLIER: usize = 4;
pub const COMPONENT_AREA_MAX_RATIO: f64 = 0.12;
pub const COMPONENT_AREA_MASK_RATIO: f64 = 0.0005;
pub const CLOSE_KERNEL_LONG_MIN: usize = 5;
pub const CLOSE_KERNEL_LONG_DIVISOR: usize = 180;
pub const CLOSE_KERNEL_SHORT_MIN: usize = 3;
pub const CLOSE_KERNEL_SHORT_DIVISOR: usize = 240;
pub const CLUSTER_MIN_GAP: f64 = 8.0;
pub const CLUSTER_SPAN_RATIO: f64 = 0.65;
pub const CLUSTER_AXIS_RATIO: f64 = 0.03;
pub const RANGE_JOIN_MIN_GAP: usize = 2;
pub const RANGE_JOIN_DIVISOR: usize = 150;

// Axis selector.
pub const SCORE_SEPARATOR_WEIGHT: f64 = 0.78;
pub const SCORE_BALANCE_WEIGHT: f64 = 0.22;
pub const SCORE_COUNT_PENALTY_WEIGHT: f64 = 0.35;
pub const SEPARATOR_PROBE_MIN_RADIUS: usize = 2;
pub const SEPARATOR_PROBE_DIVISOR: usize = 220;

pub const DEFAULT_MIN_FRAME_AREA: usize = 16;

/// Splitter-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Minimum non-transparent pixel count for a frame to be kept (> 0).
    pub min_frame_area: usize,
    pub mask: MaskParams,
    pub empty_band: EmptyBandParams,
    pub bright_spot: BrightSpotParams,
    pub projection_peak: ProjectionPeakParams,
    pub component: ComponentParams,
    pub segment_filter: SegmentFilterParams,
    pub scoring: ScoringParams,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            min_frame_area: DEFAULT_MIN_FRAME_AREA,
            mask: MaskParams::default(),
            empty_band: EmptyBandParams::default(),
            bright_spot: BrightSpotParams::default(),
            projection_peak: ProjectionPeakParams::default(),
            component: ComponentParams::default(),
            segment_filter: SegmentFilterParams::default(),
            scoring: ScoringParams::default(),
        }
    }
}

impl SplitParams {
    /// Defaults with a caller-supplied minimum frame area.
    pub fn with_min_frame_area(min_frame_area: usize) -> Self {
        Self {
            min_frame_area,
            ..Default::default()
        }
    }

    /// Fail fast on values the stages cannot work with.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.min_frame_area == 0 {
            return Err(SplitError::InvalidMinFrameArea);
        }
        if self.bright_spot.max_frames_per_axis == 0 {
            return Err(SplitError::invalid_parameter(
                "bright_spot.max_frames_per_axis must be > 0",
            ));
        }
        if self.bright_spot.min_downscale_dim == 0
            || self.bright_spot.min_downscale_dim > self.bright_spot.max_downscale_dim
        {
            return Err(SplitError::invalid_parameter(
                "bright_spot downscale bounds must satisfy 0 < min <= max",
            ));
        }
        if !(self.bright_spot.sigma_divisor.is_finite() && self.bright_spot.sigma_divisor > 0.0) {
            return Err(SplitError::invalid_parameter(
                "bright_spot.sigma_divisor must be finite and > 0",
            ));
        }
        let fractions = [
            ("mask.opaque_coverage_ratio", self.mask.opaque_coverage_ratio),
            ("empty_band.signal_ratio", self.empty_band.signal_ratio),
            ("empty_band.axis_pixel_ratio", self.empty_band.axis_pixel_ratio),
            ("bright_spot.peak_ratio", self.bright_spot.peak_ratio),
            ("segment_filter.mass_keep_ratio", self.segment_filter.mass_keep_ratio),
            ("segment_filter.length_keep_ratio", self.segment_filter.length_keep_ratio),
        ];
        for (name, value) in fractions {
            check_range(name, value, 0.0, 1.0)?;
        }
        let percentiles = [
            ("mask.background_noise_percentile", self.mask.background_noise_percentile),
            ("bright_spot.baseline_percentile", self.bright_spot.baseline_percentile),
            ("projection_peak.peak_percentile", self.projection_peak.peak_percentile),
        ];
        for (name, value) in percentiles {
            check_range(name, value, 0.0, 100.0)?;
        }
        let non_negative = [
            ("mask.background_min_distance", self.mask.background_min_distance),
            ("mask.background_noise_margin", self.mask.background_noise_margin),
            ("empty_band.row_min_ratio", self.empty_band.row_min_ratio),
            ("empty_band.col_min_ratio", self.empty_band.col_min_ratio),
            ("component.area_max_ratio", self.component.area_max_ratio),
            ("component.area_mask_ratio", self.component.area_mask_ratio),
            ("component.cluster_min_gap", self.component.cluster_min_gap),
            ("component.cluster_span_ratio", self.component.cluster_span_ratio),
            ("component.cluster_axis_ratio", self.component.cluster_axis_ratio),
            ("scoring.separator_weight", self.scoring.separator_weight),
            ("scoring.balance_weight", self.scoring.balance_weight),
            ("scoring.count_penalty_weight", self.scoring.count_penalty_weight),
        ];
        for (name, value) in non_negative {
            check_range(name, value, 0.0, f64::INFINITY)?;
        }
        Ok(())
    }

    /// Pixels-per-component floor used when denoising masks and trimmed cells.
    pub fn denoise_component_area(&self) -> usize {
        (self.min_frame_area / 2).max(1)
    }
}

fn check_range(name: &str, value: f64, lo: f64, hi: f64) -> Result<(), SplitError> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(SplitError::invalid_parameter(format!(
            "{name} must be finite and within [{lo}, {hi}], got {value}"
        )))
    }
}

/// Foreground extraction knobs for nearly opaque sheets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskParams {
    /// Alpha coverage at or above which the alpha channel is not trusted.
    pub opaque_coverage_ratio: f64,
    /// Lower bound on the RGB distance classified as background.
    pub background_min_distance: f64,
    /// Margin added to the border-distance percentile.
    pub background_noise_margin: f64,
    /// Percentile of border distances taken as the noise floor.
    pub background_noise_percentile: f64,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            opaque_coverage_ratio: OPAQUE_COVERAGE_RATIO,
            background_min_distance: BACKGROUND_MIN_DISTANCE,
            background_noise_margin: BACKGROUND_NOISE_MARGIN,
            background_noise_percentile: BACKGROUND_NOISE_PERCENTILE,
        }
    }
}

/// Gap-based segmentation thresholds.
///
/// - `signal_ratio`: share of the median non-zero signal still counted as empty.
/// - `axis_pixel_ratio`: share of the orthogonal size still counted as empty.
/// - `interrupt_max`: longest non-empty blip tolerated inside an empty band.
/// - `row_min_*`/`col_min_*`: minimum band width, `max(abs, round(size * ratio))`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyBandParams {
    pub signal_ratio: f64,
    pub axis_pixel_ratio: f64,
    pub interrupt_max: usize,
    pub row_min_ratio: f64,
    pub row_min_abs: usize,
    pub col_min_ratio: f64,
    pub col_min_abs: usize,
}

impl Default for EmptyBandParams {
    fn default() -> Self {
        Self {
            signal_ratio: EMPTY_BAND_SIGNAL_RATIO,
            axis_pixel_ratio: MIN_AXIS_PIXEL_RATIO,
            interrupt_max: EMPTY_BAND_INTERRUPT_MAX,
            row_min_ratio: ROW_EMPTY_BAND_MIN_RATIO,
            row_min_abs: ROW_EMPTY_BAND_MIN_ABS,
            col_min_ratio: COL_EMPTY_BAND_MIN_RATIO,
            col_min_abs: COL_EMPTY_BAND_MIN_ABS,
        }
    }
}

/// Density-heatmap peak detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightSpotParams {
    pub max_frames_per_axis: usize,
    pub max_downscale_dim: usize,
    pub min_downscale_dim: usize,
    pub sigma_divisor: f64,
    pub baseline_percentile: f64,
    pub peak_ratio: f64,
    pub min_peak_distance: usize,
}

impl Default for BrightSpotParams {
    fn default() -> Self {
        Self {
            max_frames_per_axis: MAX_GRID_FRAMES_PER_AXIS,
            max_downscale_dim: BRIGHT_SPOT_MAX_DOWNSCALE_DIM,
            min_downscale_dim: BRIGHT_SPOT_MIN_DOWNSCALE_DIM,
            sigma_divisor: BRIGHT_SPOT_SIGMA_DIVISOR,
            baseline_percentile: BRIGHT_SPOT_BASELINE_PERCENTILE,
            peak_ratio: BRIGHT_SPOT_PEAK_RATIO,
            min_peak_distance: BRIGHT_SPOT_MIN_PEAK_DISTANCE,
        }
    }
}

/// Smoothed-projection valley detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPeakParams {
    pub min_window: usize,
    pub window_divisor: usize,
    pub peak_percentile: f64,
    pub min_peak_distance: usize,
    pub peak_distance_divisor: usize,
}

impl Default for ProjectionPeakParams {
    fn default() -> Self {
        Self {
            min_window: PROJECTION_MIN_WINDOW,
            window_divisor: PROJECTION_WINDOW_DIVISOR,
            peak_percentile: PROJECTION_PEAK_PERCENTILE,
            min_peak_distance: PROJECTION_MIN_PEAK_DISTANCE,
            peak_distance_divisor: PROJECTION_PEAK_DISTANCE_DIVISOR,
        }
    }
}

/// Morphology and component clustering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentParams {
    pub area_frame_multiplier: usize,
    pub area_max_ratio: f64,
    pub area_mask_ratio: f64,
    pub close_long_min: usize,
    pub close_long_divisor: usize,
    pub close_short_min: usize,
    pub close_short_divisor: usize,
    pub cluster_min_gap: f64,
    pub cluster_span_ratio: f64,
    pub cluster_axis_ratio: f64,
    pub join_min_gap: usize,
    pub join_divisor: usize,
}

impl Default for ComponentParams {
    fn default() -> Self {
        Self {
            area_frame_multiplier: COMPONENT_AREA_FRAME_MULTIPLIER,
            area_max_ratio: COMPONENT_AREA_MAX_RATIO,
            area_mask_ratio: COMPONENT_AREA_MASK_RATIO,
            close_long_min: CLOSE_KERNEL_LONG_MIN,
            close_long_divisor: CLOSE_KERNEL_LONG_DIVISOR,
            close_short_min: CLOSE_KERNEL_SHORT_MIN,
            close_short_divisor: CLOSE_KERNEL_SHORT_DIVISOR,
            cluster_min_gap: CLUSTER_MIN_GAP,
            cluster_span_ratio: CLUSTER_SPAN_RATIO,
            cluster_axis_ratio: CLUSTER_AXIS_RATIO,
            join_min_gap: RANGE_JOIN_MIN_GAP,
            join_divisor: RANGE_JOIN_DIVISOR,
        }
    }
}

/// Mass/length filters shared by the signal-driven segmenters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentFilterParams {
    pub mass_keep_ratio: f64,
    pub length_keep_ratio: f64,
}

impl Default for SegmentFilterParams {
    fn default() -> Self {
        Self {
            mass_keep_ratio: SEGMENT_MASS_KEEP_RATIO,
            length_keep_ratio: SEGMENT_LENGTH_KEEP_RATIO,
        }
    }
}

/// Weights of the selector score
/// `separator * emptiness + balance * length_balance - count * penalty`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub separator_weight: f64,
    pub balance_weight: f64,
    pub count_penalty_weight: f64,
    pub probe_min_radius: usize,
    pub probe_divisor: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            separator_weight: SCORE_SEPARATOR_WEIGHT,
            balance_weight: SCORE_BALANCE_WEIGHT,
            count_penalty_weight: SCORE_COUNT_PENALTY_WEIGHT,
            probe_min_radius: SEPARATOR_PROBE_MIN_RADIUS,
            probe_divisor: SEPARATOR_PROBE_DIVISOR,
        }
    }
}
