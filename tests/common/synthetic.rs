#![allow(dead_code)]

use depth_highlight::image::ImageF32;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

/// Horizontal depth ramp from 0 at the left edge to 1 at the right edge.
pub fn depth_ramp(width: usize, height: usize) -> ImageF32 {
    assert!(width > 1 && height > 0, "ramp needs at least two columns");
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, x as f32 / (width - 1) as f32);
        }
    }
    img
}

/// Depth that grows from the top row (0) to the bottom row (1); used to
/// catch orientation mistakes.
pub fn depth_rows(width: usize, height: usize) -> ImageF32 {
    assert!(height > 1 && width > 0, "row ramp needs at least two rows");
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, y as f32 / (height - 1) as f32);
        }
    }
    img
}

/// High-contrast checkerboard color image.
pub fn checkerboard_rgb(width: u32, height: u32, cell: u32) -> RgbImage {
    assert!(cell > 0, "cell size must be positive");
    RgbImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            Rgb([32, 32, 160])
        } else {
            Rgb([220, 180, 40])
        }
    })
}

/// Same checkerboard with a varying alpha channel.
pub fn checkerboard_rgba(width: u32, height: u32, cell: u32) -> RgbaImage {
    let rgb = checkerboard_rgb(width, height, cell);
    RgbaImage::from_fn(width, height, |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        Rgba([r, g, b, ((x * 37 + y * 11) % 256) as u8])
    })
}

pub fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("in-memory PNG encoding succeeds");
    buf.into_inner()
}
