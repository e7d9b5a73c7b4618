//! Grid assembly: row × column cells cut from the sheet, trimmed and
//! filtered by content area.

use crate::image::{ImageView, Mask, PixelBuffer};
use crate::mask::remove_small_components;
use crate::types::{BoundingBox, Frame, Segment};
use log::debug;

/// Crop `image` to the bounding box of its non-transparent pixels, ignoring
/// components smaller than `min_component_area`. Returns the cropped buffer
/// and the kept box in `image` coordinates. When nothing survives the image
/// is returned as is.
pub fn trim_transparent_edges(
    image: &PixelBuffer,
    min_component_area: usize,
) -> (PixelBuffer, BoundingBox) {
    let alpha = image.alpha_mask();
    let clean = remove_small_components(&alpha, min_component_area.max(1));
    match clean.bounding_box() {
        Some(bbox) => (image.crop(&bbox), bbox),
        None => (
            image.clone(),
            BoundingBox::new(0, 0, image.width(), image.height()),
        ),
    }
}

/// The whole sheet as one frame, trimmed of transparent borders.
pub fn fallback_frame(image: &PixelBuffer) -> Frame {
    let (trimmed, bbox) = trim_transparent_edges(image, 1);
    Frame {
        image: trimmed,
        bbox,
    }
}

/// Cut one frame per non-empty grid cell, rows outer and columns inner.
///
/// `content` is the foreground mask cropped to `origin`; segments are local
/// to it. Cells are cropped from `image` at their absolute position, trimmed
/// with `denoise_area`, and dropped when fewer than `min_frame_area` visible
/// pixels remain.
pub fn assemble_frames(
    image: &PixelBuffer,
    content: &Mask,
    origin: &BoundingBox,
    rows: &[Segment],
    cols: &[Segment],
    min_frame_area: usize,
    denoise_area: usize,
) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(rows.len() * cols.len());
    let (mut empty, mut small) = (0usize, 0usize);
    for &row in rows {
        for &col in cols {
            let cell = BoundingBox::from_segments(row, col);
            if !content.any_in(&cell) {
                empty += 1;
                continue;
            }
            let absolute = cell.offset(origin.x, origin.y);
            let (trimmed, local) = trim_transparent_edges(&image.crop(&absolute), denoise_area);
            if trimmed.non_transparent_count() < min_frame_area {
                small += 1;
                continue;
            }
            frames.push(Frame {
                image: trimmed,
                bbox: local.offset(absolute.x, absolute.y),
            });
        }
    }
    debug!(
        "assembler: cells={} frames={} empty={} below_area={}",
        rows.len() * cols.len(),
        frames.len(),
        empty,
        small
    );
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [220, 30, 30, 255];

    #[test]
    fn trim_crops_to_visible_pixels() {
        let mut img = PixelBuffer::new(10, 8);
        img.fill_rect(2, 3, 4, 2, RED);
        let (trimmed, bbox) = trim_transparent_edges(&img, 1);
        assert_eq!(bbox, BoundingBox::new(2, 3, 4, 2));
        assert_eq!((trimmed.width(), trimmed.height()), (4, 2));
        assert_eq!(trimmed.non_transparent_count(), 8);
    }

    #[test]
    fn trim_ignores_specks_below_component_area() {
        let mut img = PixelBuffer::new(12, 12);
        img.fill_rect(4, 4, 5, 5, RED);
        img.set(0, 0, RED);
        let (_, with_speck) = trim_transparent_edges(&img, 1);
        assert_eq!(with_speck, BoundingBox::new(0, 0, 9, 9));
        let (_, without) = trim_transparent_edges(&img, 4);
        assert_eq!(without, BoundingBox::new(4, 4, 5, 5));
    }

    #[test]
    fn trim_of_transparent_image_is_identity() {
        let img = PixelBuffer::new(5, 3);
        let (trimmed, bbox) = trim_transparent_edges(&img, 1);
        assert_eq!(trimmed, img);
        assert_eq!(bbox, BoundingBox::new(0, 0, 5, 3));
    }

    #[test]
    fn cells_are_cut_in_row_major_order_with_absolute_boxes() {
        // Content box starts at (10, 5); tiles of 6x4 at local (0,0), (10,0), (10,8).
        let mut img = PixelBuffer::new(40, 30);
        img.fill_rect(10, 5, 6, 4, RED);
        img.fill_rect(20, 5, 6, 4, RED);
        img.fill_rect(20, 13, 6, 4, RED);
        let origin = BoundingBox::new(10, 5, 16, 12);
        let content = img.alpha_mask().crop(&origin);

        let rows = [Segment::new(0, 5), Segment::new(6, 11)];
        let cols = [Segment::new(0, 7), Segment::new(8, 15)];
        let frames = assemble_frames(&img, &content, &origin, &rows, &cols, 16, 8);

        let boxes: Vec<BoundingBox> = frames.iter().map(|f| f.bbox).collect();
        assert_eq!(
            boxes,
            vec![
                BoundingBox::new(10, 5, 6, 4),
                BoundingBox::new(20, 5, 6, 4),
                BoundingBox::new(20, 13, 6, 4),
            ]
        );
        assert!(frames.iter().all(|f| f.image.non_transparent_count() == 24));
    }

    #[test]
    fn cells_below_min_area_are_dropped() {
        let mut img = PixelBuffer::new(20, 10);
        img.fill_rect(0, 0, 5, 5, RED);
        img.fill_rect(12, 0, 2, 2, RED);
        let origin = BoundingBox::new(0, 0, 14, 5);
        let content = img.alpha_mask().crop(&origin);
        let rows = [Segment::new(0, 4)];
        let cols = [Segment::new(0, 7), Segment::new(8, 13)];
        let frames = assemble_frames(&img, &content, &origin, &rows, &cols, 10, 1);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bbox, BoundingBox::new(0, 0, 5, 5));
    }

    #[test]
    fn fallback_is_trimmed_whole_sheet() {
        let mut img = PixelBuffer::new(30, 30);
        img.fill_rect(3, 4, 2, 2, RED);
        img.fill_rect(20, 25, 3, 1, RED);
        let frame = fallback_frame(&img);
        assert_eq!(frame.bbox, BoundingBox::new(3, 4, 20, 22));
    }
}
