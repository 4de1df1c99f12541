//! I/O helpers for frames, masks and JSON reports.
//!
//! - `load_frame`: read a PNG/JPEG/etc. into an owned [`Frame`].
//! - `save_frame`: write a frame (e.g. an annotated copy) to disk.
//! - `save_mask`: write a binary mask as a black/white PNG.
//! - `save_intensity`: write an `ImageF32` to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, ImageF32, ImageView, Mask, PixelFormat};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, keeping color when present.
pub fn load_frame(path: &Path) -> Result<Frame, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(Frame::from_dynamic(img))
}

pub fn save_frame(frame: &Frame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let result = match frame.format() {
        PixelFormat::Rgb => frame.to_rgb_image().save(path),
        PixelFormat::Gray => GrayImage::from_raw(
            frame.width() as u32,
            frame.height() as u32,
            frame.as_bytes().to_vec(),
        )
        .ok_or_else(|| "Failed to create image buffer".to_string())?
        .save(path),
    };
    result.map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a mask with foreground at 255.
pub fn save_mask(mask: &Mask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([if v != 0 { 255 } else { 0 }]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_intensity(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
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
