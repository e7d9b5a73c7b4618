use crate::image::{ImageF32, ImageView, ImageViewMut, Mask};

/// Downsample `mask` (as 0/1 floats) to `dw × dh` by area averaging.
///
/// Target sizes must not exceed the source size; equal sizes copy through.
pub fn resize_area(mask: &Mask, dw: usize, dh: usize) -> ImageF32 {
    let (sw, sh) = (mask.width(), mask.height());
    assert!(
        dw <= sw && dh <= sh,
        "area resize only downsamples ({sw}x{sh} -> {dw}x{dh})"
    );
    let mut out = ImageF32::new(dw, dh);
    if dw == 0 || dh == 0 {
        return out;
    }

    let tab_x = area_weights(sw, dw);
    let tab_y = area_weights(sh, dh);

    let mut horiz = ImageF32::new(dw, sh);
    for (y, src_row) in mask.rows().enumerate() {
        let dst_row = horiz.row_mut(y);
        for (dst, weights) in dst_row.iter_mut().zip(&tab_x) {
            *dst = weights
                .iter()
                .map(|&(sx, wgt)| if src_row[sx] { wgt } else { 0.0 })
                .sum();
        }
    }

    for (y, weights) in tab_y.iter().enumerate() {
        for &(sy, wgt) in weights {
            let src_row = horiz.row(sy);
            let dst_row = out.row_mut(y);
            for (dst, &v) in dst_row.iter_mut().zip(src_row) {
                *dst += wgt * v;
            }
        }
    }
    out
}

/// For every destination index, the source indices it covers and their
/// normalised overlap weights.
fn area_weights(src: usize, dst: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|j| {
            let a = j as f64 * scale;
            let b = ((j + 1) as f64 * scale).min(src as f64);
            let first = a.floor() as usize;
            let last = (b.ceil() as usize).min(src);
            (first..last)
                .filter_map(|i| {
                    let overlap = b.min((i + 1) as f64) - a.max(i as f64);
                    (overlap > 1e-9).then(|| (i, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_factor_averages_blocks() {
        let mask = Mask::from_fn(4, 2, |x, _| x < 1);
        let out = resize_area(&mask, 2, 1);
        assert!((out.get(0, 0) - 0.5).abs() < 1e-6);
        assert!(out.get(1, 0).abs() < 1e-6);
    }

    #[test]
    fn fractional_factor_weights_overlap() {
        let mask = Mask::from_fn(3, 1, |x, _| x == 1);
        let out = resize_area(&mask, 2, 1);
        // Each output covers 1.5 source pixels; the middle one is split evenly.
        assert!((out.get(0, 0) - 1.0 / 3.0).abs() < 1e-6);
        assert!((out.get(1, 0) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn identity_size_copies_mask() {
        let mask = Mask::from_fn(5, 3, |x, y| (x + y) % 2 == 0);
        let out = resize_area(&mask, 5, 3);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(out.get(x, y), if mask.get(x, y) { 1.0 } else { 0.0 });
            }
        }
    }
}
