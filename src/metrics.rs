//! Alpha-coverage heuristics around the splitter.
//!
//! [`has_meaningful_transparency`] tells whether a sheet already carries a
//! usable alpha channel or still needs background removal upstream.
//! [`is_degraded_output`] flags a post-processed frame that lost most of its
//! content compared to its source.

use crate::error::SplitError;
use crate::image::{ImageView, PixelBuffer};
use crate::signal::round_to_usize;
use serde::Serialize;

pub const DEFAULT_ALPHA_RATIO_THRESHOLD: f64 = 0.02;
pub const DEFAULT_ALPHA_VALUE_THRESHOLD: u8 = 250;

pub const DEGRADED_MIN_PIXELS: usize = 8;
pub const DEGRADED_EXPECTED_RATIO: f64 = 0.18;
pub const DEGRADED_MIN_COVERAGE: f64 = 0.015;
pub const DEGRADED_COVERAGE_RATIO: f64 = 0.12;

/// True when at least `alpha_ratio_threshold` of the pixels have alpha below
/// `alpha_value_threshold`.
pub fn has_meaningful_transparency(
    image: &PixelBuffer,
    alpha_ratio_threshold: f64,
    alpha_value_threshold: u8,
) -> Result<bool, SplitError> {
    if !(0.0..=1.0).contains(&alpha_ratio_threshold) {
        return Err(SplitError::invalid_parameter(
            "alpha_ratio_threshold must be within [0.0, 1.0]",
        ));
    }
    let total = image.pixel_count();
    if total == 0 {
        return Err(SplitError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    let transparent = image
        .pixels()
        .iter()
        .filter(|px| px[3] < alpha_value_threshold)
        .count();
    Ok(transparent as f64 / total as f64 >= alpha_ratio_threshold)
}

/// Size and visible-pixel count of one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageMetrics {
    pub width: usize,
    pub height: usize,
    pub total_pixels: usize,
    pub non_transparent_pixels: usize,
}

impl ImageMetrics {
    pub fn of(image: &PixelBuffer) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            total_pixels: image.pixel_count(),
            non_transparent_pixels: image.non_transparent_count(),
        }
    }

    /// Fraction of visible pixels; 0 for an empty image.
    pub fn coverage(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.non_transparent_pixels as f64 / self.total_pixels as f64
        }
    }
}

/// Whether `output` kept implausibly little of the content of `source`.
///
/// The visible pixel count is compared against the count the source density
/// predicts for the output's size, and the coverage against a fraction of
/// the source coverage.
pub fn is_degraded_output(source: &ImageMetrics, output: &ImageMetrics) -> bool {
    if output.non_transparent_pixels == 0 {
        return true;
    }
    if source.total_pixels == 0 || output.total_pixels == 0 {
        return true;
    }
    let expected = source.non_transparent_pixels as f64 * output.total_pixels as f64
        / source.total_pixels as f64;
    let min_pixels = DEGRADED_MIN_PIXELS.max(round_to_usize(expected * DEGRADED_EXPECTED_RATIO));
    if output.non_transparent_pixels < min_pixels {
        return true;
    }
    output.coverage() < DEGRADED_MIN_COVERAGE.max(source.coverage() * DEGRADED_COVERAGE_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(total: usize, visible: usize) -> ImageMetrics {
        ImageMetrics {
            width: total,
            height: 1,
            total_pixels: total,
            non_transparent_pixels: visible,
        }
    }

    #[test]
    fn transparency_ratio_threshold() {
        let mut img = PixelBuffer::filled(10, 10, [0, 0, 0, 255]);
        assert!(!has_meaningful_transparency(&img, 0.02, 250).unwrap());
        img.set(0, 0, [0, 0, 0, 0]);
        assert!(!has_meaningful_transparency(&img, 0.02, 250).unwrap());
        img.set(1, 0, [0, 0, 0, 249]);
        assert!(has_meaningful_transparency(&img, 0.02, 250).unwrap());
    }

    #[test]
    fn transparency_rejects_bad_arguments() {
        let img = PixelBuffer::new(2, 2);
        assert!(has_meaningful_transparency(&img, 1.5, 250).is_err());
        assert!(matches!(
            has_meaningful_transparency(&PixelBuffer::new(0, 3), 0.02, 250),
            Err(SplitError::EmptyImage { .. })
        ));
    }

    #[test]
    fn degraded_when_output_lost_content() {
        let source = metrics(1000, 500);
        assert!(!is_degraded_output(&source, &metrics(100, 50)));
        // expected 50 visible pixels, 18% of that is 9.
        assert!(is_degraded_output(&source, &metrics(100, 8)));
        assert!(!is_degraded_output(&source, &metrics(100, 9)));
        assert!(is_degraded_output(&source, &metrics(100, 0)));
        assert!(is_degraded_output(&metrics(0, 0), &metrics(100, 50)));
    }

    #[test]
    fn degraded_when_coverage_collapses() {
        // Sparse source: the pixel floor passes, the coverage floor does not.
        let source = metrics(10_000, 100);
        assert!(is_degraded_output(&source, &metrics(1000, 10)));
        assert!(!is_degraded_output(&source, &metrics(1000, 15)));
    }
}
