mod common;

use common::synthetic_sheet::{ring_with_corner_gap, RED};
use sprite_splitter::mask::{extract_foreground_mask, MaskSource};
use sprite_splitter::splitter::params::MaskParams;
use sprite_splitter::{split_frames, BoundingBox};

#[test]
fn background_reaching_inside_through_a_corner_is_removed() {
    let sheet = ring_with_corner_gap(20, 5, 14);
    let fg = extract_foreground_mask(&sheet, &MaskParams::default());
    assert_eq!(fg.source, MaskSource::EdgeBackground);
    assert!(!fg.mask.get(10, 10), "interior is connected through the corner");
    assert!(!fg.mask.get(5, 5), "the corner neck itself is background");
    assert!(!fg.mask.get(0, 0));
    assert!(fg.mask.get(5, 10));
    assert!(fg.mask.get(14, 14));
}

#[test]
fn closed_ring_keeps_its_interior() {
    let mut sheet = ring_with_corner_gap(20, 5, 14);
    sheet.set(5, 5, RED);
    let fg = extract_foreground_mask(&sheet, &MaskParams::default());
    assert!(fg.mask.get(10, 10), "enclosed white is not border-connected");
    assert!(!fg.mask.get(2, 2));
}

#[test]
fn hollow_ring_stays_one_frame() {
    let sheet = ring_with_corner_gap(20, 5, 14);
    let frames = split_frames(&sheet, 16).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bbox, BoundingBox::new(5, 5, 10, 10));
}
