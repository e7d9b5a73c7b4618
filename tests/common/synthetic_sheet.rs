use sprite_splitter::image::PixelBuffer;
use sprite_splitter::BoundingBox;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const RED: [u8; 4] = [210, 40, 40, 255];

/// Layout of a uniform tile grid on a transparent sheet.
#[derive(Clone, Copy, Debug)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub tile: usize,
    pub gap: usize,
    pub margin: usize,
}

impl GridLayout {
    pub fn width(&self) -> usize {
        2 * self.margin + self.cols * self.tile + (self.cols - 1) * self.gap
    }

    pub fn height(&self) -> usize {
        2 * self.margin + self.rows * self.tile + (self.rows - 1) * self.gap
    }

    /// Absolute box of tile `(r, c)`.
    pub fn tile_box(&self, r: usize, c: usize) -> BoundingBox {
        let pitch = self.tile + self.gap;
        BoundingBox::new(
            self.margin + c * pitch,
            self.margin + r * pitch,
            self.tile,
            self.tile,
        )
    }
}

/// Distinct opaque colour per tile.
pub fn tile_color(r: usize, c: usize) -> [u8; 4] {
    [
        (40 + 50 * r) as u8,
        (60 + 40 * c) as u8,
        (200 - 30 * r) as u8,
        255,
    ]
}

/// Solid tiles on a transparent sheet; cells listed in `skip` stay empty.
pub fn grid_sheet(layout: GridLayout, skip: &[(usize, usize)]) -> PixelBuffer {
    let mut sheet = PixelBuffer::new(layout.width(), layout.height());
    for r in 0..layout.rows {
        for c in 0..layout.cols {
            if skip.contains(&(r, c)) {
                continue;
            }
            let b = layout.tile_box(r, c);
            sheet.fill_rect(b.x, b.y, b.w, b.h, tile_color(r, c));
        }
    }
    sheet
}

/// Same tiles painted on an opaque white background.
pub fn opaque_grid_sheet(layout: GridLayout) -> PixelBuffer {
    let mut sheet = PixelBuffer::filled(layout.width(), layout.height(), WHITE);
    for r in 0..layout.rows {
        for c in 0..layout.cols {
            let b = layout.tile_box(r, c);
            sheet.fill_rect(b.x, b.y, b.w, b.h, tile_color(r, c));
        }
    }
    sheet
}

/// Red ring on a white opaque sheet: border rows/cols `lo..=hi`. The white
/// interior only reaches the outside through the top-left corner pixel.
pub fn ring_with_corner_gap(size: usize, lo: usize, hi: usize) -> PixelBuffer {
    let mut sheet = PixelBuffer::filled(size, size, WHITE);
    for i in lo..=hi {
        sheet.set(i, lo, RED);
        sheet.set(i, hi, RED);
        sheet.set(lo, i, RED);
        sheet.set(hi, i, RED);
    }
    sheet.set(lo, lo, WHITE);
    sheet
}
