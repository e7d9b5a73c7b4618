mod common;

use common::synthetic_sheet::{grid_sheet, opaque_grid_sheet, tile_color, GridLayout, RED};
use sprite_splitter::image::{ImageView, PixelBuffer};
use sprite_splitter::{split_frames, BoundingBox, SplitError, SplitParams, SpriteSplitter};

const LAYOUT: GridLayout = GridLayout {
    rows: 3,
    cols: 4,
    tile: 20,
    gap: 30,
    margin: 10,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn splitter(min_frame_area: usize) -> SpriteSplitter {
    SpriteSplitter::new(SplitParams::with_min_frame_area(min_frame_area))
}

#[test]
fn uniform_grid_yields_every_tile() {
    init_logging();
    let sheet = grid_sheet(LAYOUT, &[]);
    let result = splitter(16).split(&sheet).expect("grid sheet splits");

    assert_eq!(result.row_segments.len(), LAYOUT.rows, "rows: {:?}", result.row_segments);
    assert_eq!(result.col_segments.len(), LAYOUT.cols, "cols: {:?}", result.col_segments);
    assert_eq!(result.frames.len(), LAYOUT.rows * LAYOUT.cols);

    let mut expected = Vec::new();
    for r in 0..LAYOUT.rows {
        for c in 0..LAYOUT.cols {
            expected.push((LAYOUT.tile_box(r, c), tile_color(r, c)));
        }
    }
    for (frame, (bbox, color)) in result.frames.iter().zip(&expected) {
        assert_eq!(frame.bbox, *bbox);
        assert_eq!((frame.image.width(), frame.image.height()), (20, 20));
        assert!(
            frame.image.pixels().iter().all(|px| px == color),
            "frame at {:?} carries foreign pixels",
            frame.bbox
        );
    }
}

#[test]
fn empty_cells_are_skipped() {
    let sheet = grid_sheet(LAYOUT, &[(1, 2), (2, 0)]);
    let result = splitter(16).split(&sheet).unwrap();
    assert_eq!(result.frames.len(), LAYOUT.rows * LAYOUT.cols - 2);
    assert!(result
        .frames
        .iter()
        .all(|f| f.bbox != LAYOUT.tile_box(1, 2) && f.bbox != LAYOUT.tile_box(2, 0)));
}

#[test]
fn opaque_sheet_splits_on_the_same_grid() {
    let sheet = opaque_grid_sheet(LAYOUT);
    let report = splitter(16).split_with_diagnostics(&sheet).unwrap();
    assert_eq!(
        report.trace.mask_source,
        sprite_splitter::mask::MaskSource::EdgeBackground
    );
    assert_eq!(report.trace.content_bbox, BoundingBox::new(10, 10, 170, 120));
    let frames = &report.result.frames;
    assert_eq!(frames.len(), 12);
    for (i, frame) in frames.iter().enumerate() {
        let tile = LAYOUT.tile_box(i / LAYOUT.cols, i % LAYOUT.cols);
        assert!(
            frame.bbox.x <= tile.x
                && frame.bbox.y <= tile.y
                && frame.bbox.right() >= tile.right()
                && frame.bbox.bottom() >= tile.bottom(),
            "frame {:?} does not contain tile {:?}",
            frame.bbox,
            tile
        );
    }
}

#[test]
fn single_blob_is_one_trimmed_frame() {
    let mut sheet = PixelBuffer::new(80, 60);
    for y in 0..60usize {
        for x in 0..80usize {
            if x.abs_diff(40) + y.abs_diff(30) <= 15 {
                sheet.set(x, y, RED);
            }
        }
    }
    let frames = split_frames(&sheet, 16).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bbox, BoundingBox::new(25, 15, 31, 31));
    assert_eq!(frames[0].image.non_transparent_count(), sheet.non_transparent_count());
}

#[test]
fn solid_rectangle_is_one_frame() {
    let mut sheet = PixelBuffer::new(64, 48);
    sheet.fill_rect(7, 9, 30, 20, RED);
    let result = splitter(16).split(&sheet).unwrap();
    assert_eq!(result.frames.len(), 1);
    assert_eq!(result.frames[0].bbox, BoundingBox::new(7, 9, 30, 20));
    assert_eq!(result.row_segments.len(), 1);
    assert_eq!(result.col_segments.len(), 1);
}

#[test]
fn fully_transparent_sheet_is_rejected() {
    let sheet = PixelBuffer::new(32, 32);
    assert_eq!(
        splitter(16).split(&sheet).unwrap_err(),
        SplitError::NoContent {
            width: 32,
            height: 32
        }
    );
}

#[test]
fn zero_min_frame_area_is_a_contract_violation() {
    let sheet = grid_sheet(LAYOUT, &[]);
    assert_eq!(
        split_frames(&sheet, 0).unwrap_err(),
        SplitError::InvalidMinFrameArea
    );
}

#[test]
fn repeated_splits_are_identical() {
    let sheet = grid_sheet(LAYOUT, &[(0, 1)]);
    let s = splitter(16);
    let first = s.split(&sheet).unwrap();
    for _ in 0..3 {
        assert_eq!(s.split(&sheet).unwrap(), first);
    }
}

#[test]
fn raising_min_frame_area_never_adds_frames() {
    let sheet = grid_sheet(LAYOUT, &[]);
    let counts: Vec<usize> = [1, 16, 100, 400, 401, 5000]
        .iter()
        .map(|&area| splitter(area).split(&sheet).unwrap().frames.len())
        .collect();
    assert!(
        counts.windows(2).all(|w| w[0] >= w[1]),
        "frame counts grew: {:?}",
        counts
    );
    assert_eq!(counts[3], 12);
    assert_eq!(counts[4], 1, "tiles below the area floor fall back to the sheet");
}

#[test]
fn final_segments_partition_each_axis() {
    let mut blob = PixelBuffer::new(50, 40);
    blob.fill_rect(5, 5, 30, 12, RED);
    blob.fill_rect(12, 17, 6, 20, RED);
    let sheets = [
        grid_sheet(LAYOUT, &[]),
        grid_sheet(LAYOUT, &[(1, 1)]),
        opaque_grid_sheet(LAYOUT),
        blob,
    ];
    for sheet in &sheets {
        let report = splitter(16).split_with_diagnostics(sheet).unwrap();
        for axis in [&report.trace.rows, &report.trace.cols] {
            let segs = &axis.segments;
            assert_eq!(segs.first().map(|s| s.start), Some(0));
            assert_eq!(segs.last().map(|s| s.end), Some(axis.axis_size - 1));
            for pair in segs.windows(2) {
                assert_eq!(pair[0].end + 1, pair[1].start, "gap or overlap in {:?}", segs);
            }
        }
    }
}

#[test]
fn report_serializes_to_json() {
    let sheet = grid_sheet(LAYOUT, &[]);
    let report = splitter(16).split_with_diagnostics(&sheet).unwrap();
    let json = serde_json::to_value(&report.trace).unwrap();
    assert_eq!(json["frames"].as_array().map(Vec::len), Some(12));
    assert_eq!(json["rows"]["candidates"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["usedFallback"], serde_json::Value::Bool(false));
}
