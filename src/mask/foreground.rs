//! Foreground extraction.
//!
//! Transparent sheets are segmented from their alpha channel. When at least
//! `opaque_coverage_ratio` of the pixels carry alpha, alpha alone cannot tell
//! background from content, so a background colour is estimated from eight
//! border samples and every pixel close to it that is 8-connected to the
//! border is removed from the mask.

use super::components::border_connected;
use crate::image::{ImageView, Mask, PixelBuffer};
use crate::signal::percentile;
use crate::splitter::params::MaskParams;
use log::debug;
use serde::Serialize;

/// Which signal produced the foreground mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskSource {
    Alpha,
    EdgeBackground,
}

#[derive(Clone, Debug)]
pub struct ForegroundMask {
    pub mask: Mask,
    pub source: MaskSource,
}

/// Compute the content mask of `image`.
pub fn extract_foreground_mask(image: &PixelBuffer, params: &MaskParams) -> ForegroundMask {
    let alpha = image.alpha_mask();
    let covered = alpha.count();
    if covered == 0 {
        return ForegroundMask {
            mask: alpha,
            source: MaskSource::Alpha,
        };
    }

    let coverage = covered as f64 / image.pixel_count() as f64;
    if coverage < params.opaque_coverage_ratio {
        return ForegroundMask {
            mask: alpha,
            source: MaskSource::Alpha,
        };
    }

    let background = estimate_edge_connected_background(image, params);
    let foreground = alpha.and_not(&background);
    if foreground.any() {
        debug!(
            "foreground: coverage={:.3} -> edge background removed {} px",
            coverage,
            covered - foreground.count()
        );
        return ForegroundMask {
            mask: foreground,
            source: MaskSource::EdgeBackground,
        };
    }

    debug!("foreground: edge background swallowed everything, keeping alpha");
    ForegroundMask {
        mask: alpha,
        source: MaskSource::Alpha,
    }
}

/// Component-wise median of the four corners and four edge midpoints.
pub fn estimate_background_color(image: &PixelBuffer) -> [f64; 3] {
    let (w, h) = (image.width(), image.height());
    let samples = [
        image.get(0, 0),
        image.get(w - 1, 0),
        image.get(0, h - 1),
        image.get(w - 1, h - 1),
        image.get(w / 2, 0),
        image.get(w / 2, h - 1),
        image.get(0, h / 2),
        image.get(w - 1, h / 2),
    ];
    let mut color = [0.0f64; 3];
    for (c, out) in color.iter_mut().enumerate() {
        let channel: Vec<f64> = samples.iter().map(|px| px[c] as f64).collect();
        *out = percentile(&channel, 50.0);
    }
    color
}

/// Pixels close to the estimated background colour and 8-connected to the
/// image border.
pub fn estimate_edge_connected_background(image: &PixelBuffer, params: &MaskParams) -> Mask {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Mask::new(w, h);
    }

    let bg = estimate_background_color(image);
    let distance: Vec<f64> = image
        .pixels()
        .iter()
        .map(|px| {
            let dr = px[0] as f64 - bg[0];
            let dg = px[1] as f64 - bg[1];
            let db = px[2] as f64 - bg[2];
            (dr * dr + dg * dg + db * db).sqrt()
        })
        .collect();

    let mut edge = Vec::with_capacity(2 * (w + h));
    edge.extend_from_slice(&distance[..w]);
    edge.extend_from_slice(&distance[(h - 1) * w..]);
    edge.extend((0..h).map(|y| distance[y * w]));
    edge.extend((0..h).map(|y| distance[y * w + w - 1]));
    let noise_floor = percentile(&edge, params.background_noise_percentile);
    let threshold = params
        .background_min_distance
        .max(noise_floor + params.background_noise_margin);

    let candidate = Mask::from_vec(w, h, distance.iter().map(|&d| d <= threshold).collect());
    border_connected(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [250, 250, 250, 255];
    const RED: [u8; 4] = [200, 20, 20, 255];

    #[test]
    fn transparent_sheets_use_alpha() {
        let mut img = PixelBuffer::new(10, 10);
        img.fill_rect(2, 2, 3, 3, RED);
        let fg = extract_foreground_mask(&img, &MaskParams::default());
        assert_eq!(fg.source, MaskSource::Alpha);
        assert_eq!(fg.mask.count(), 9);
    }

    #[test]
    fn opaque_sheet_drops_uniform_background() {
        let mut img = PixelBuffer::filled(16, 12, WHITE);
        img.fill_rect(3, 3, 4, 4, RED);
        img.fill_rect(10, 5, 3, 3, RED);
        let fg = extract_foreground_mask(&img, &MaskParams::default());
        assert_eq!(fg.source, MaskSource::EdgeBackground);
        assert_eq!(fg.mask.count(), 16 + 9);
        assert!(fg.mask.get(4, 4));
        assert!(!fg.mask.get(0, 0));
    }

    #[test]
    fn enclosed_background_colour_stays_foreground() {
        let mut img = PixelBuffer::filled(12, 12, WHITE);
        img.fill_rect(3, 3, 6, 6, RED);
        img.fill_rect(5, 5, 2, 2, WHITE);
        let fg = extract_foreground_mask(&img, &MaskParams::default());
        assert!(fg.mask.get(5, 5), "enclosed patch is not border connected");
        assert_eq!(fg.mask.count(), 36);
    }

    #[test]
    fn uniform_opaque_image_falls_back_to_alpha() {
        let img = PixelBuffer::filled(8, 8, WHITE);
        let fg = extract_foreground_mask(&img, &MaskParams::default());
        assert_eq!(fg.source, MaskSource::Alpha);
        assert_eq!(fg.mask.count(), 64);
    }
}
