//! I/O helpers for RGBA sheets, frames and JSON reports.
//!
//! - `load_rgba_image`: decode any supported format into a [`PixelBuffer`].
//! - `save_rgba_png`: write a [`PixelBuffer`] as an RGBA PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `frame_file_name`: `<base>_f<index:04>.png` naming for persisted frames.
use super::{ImageView, PixelBuffer};
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<PixelBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_raw(width, height, img.into_raw())
        .map_err(|e| format!("Failed to wrap {}: {e}", path.display()))
}

/// Save an RGBA buffer to a PNG, creating parent directories.
pub fn save_rgba_png(buffer: &PixelBuffer, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.to_raw(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// File name for the `index`-th (1-based) frame cut from `base`.
pub fn frame_file_name(base: &str, index: usize) -> String {
    format!("{base}_f{index:04}.png")
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
