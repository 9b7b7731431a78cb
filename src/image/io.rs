//! I/O helpers for color images and JSON.
//!
//! - `decode_color_image` / `load_color_image`: PNG/JPEG into an owned RGB
//!   buffer, dropping alpha and rejecting non-color inputs.
//! - `save_color_image`: write a `ColorImage` (e.g. a rendered frame) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ColorImage;
use crate::error::{Error, Result};
use image::{DynamicImage, RgbImage};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an in-memory raster image into a 3-channel `ColorImage`.
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode(e.to_string()))?;
    from_dynamic(img)
}

/// Load a raster image from disk into a 3-channel `ColorImage`.
pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode_color_image(&bytes).map_err(|e| match e {
        Error::ImageDecode(msg) => Error::ImageDecode(format!("{}: {msg}", path.display())),
        other => other,
    })
}

fn from_dynamic(img: DynamicImage) -> Result<ColorImage> {
    let channels = img.color().channel_count() as usize;
    let (w, h) = (img.width() as usize, img.height() as usize);
    match channels {
        3 => ColorImage::from_interleaved(w, h, 3, img.into_rgb8().as_raw()),
        4 => {
            debug!("dropping alpha channel from {w}x{h} RGBA image");
            ColorImage::from_interleaved(w, h, 4, img.into_rgba8().as_raw())
        }
        other => Err(Error::Format { channels: other }),
    }
}

/// Convert to an `image::RgbImage` for encoding.
pub fn to_rgb_image(image: &ColorImage) -> Result<RgbImage> {
    RgbImage::from_raw(image.w as u32, image.h as u32, image.as_bytes().to_vec())
        .ok_or_else(|| Error::ImageDecode("failed to create image buffer".to_string()))
}

/// Save a `ColorImage` to `path`; the format follows the file extension.
pub fn save_color_image(image: &ColorImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    to_rgb_image(image)?
        .save(path)
        .map_err(|e| Error::ImageDecode(format!("failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        Error::Config(format!("failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}
