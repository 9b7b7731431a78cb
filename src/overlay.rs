//! Highlight compositing.
//!
//! Masked pixels are overwritten with [`HIGHLIGHT_RGB`], all three channels,
//! no blending. The base image is never touched; each call allocates its own
//! output grid.
use crate::error::{Error, Result};
use crate::image::{ColorImage, ImageView, ImageViewMut};
use crate::mask::Mask;

/// Pure green.
pub const HIGHLIGHT_RGB: [u8; 3] = [0, 255, 0];

/// One rendered output image.
pub type Frame = ColorImage;

/// Copy `base` and paint every masked pixel with [`HIGHLIGHT_RGB`].
pub fn composite(base: &ColorImage, mask: &Mask) -> Result<Frame> {
    if base.shape() != mask.shape() {
        return Err(Error::DimensionMismatch {
            depth: mask.shape(),
            image: base.shape(),
        });
    }
    let mut frame = base.clone();
    for (y, selected) in mask.rows().enumerate() {
        for (px, &m) in frame.row_mut(y).iter_mut().zip(selected) {
            if m {
                *px = HIGHLIGHT_RGB;
            }
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: usize, h: usize) -> ColorImage {
        let mut img = ColorImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, [(x * 40) as u8, (y * 40) as u8, 200]);
            }
        }
        img
    }

    #[test]
    fn masked_pixels_are_green_and_others_untouched() {
        let base = checker(3, 2);
        let mask = Mask {
            w: 3,
            h: 2,
            data: vec![true, false, false, false, true, true],
        };
        let frame = composite(&base, &mask).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                if mask.get(x, y) {
                    assert_eq!(frame.get(x, y), HIGHLIGHT_RGB);
                } else {
                    assert_eq!(frame.get(x, y), base.get(x, y));
                }
            }
        }
    }

    #[test]
    fn base_image_is_not_mutated() {
        let base = checker(2, 2);
        let snapshot = base.clone();
        let all = Mask {
            w: 2,
            h: 2,
            data: vec![true; 4],
        };
        let none = Mask {
            w: 2,
            h: 2,
            data: vec![false; 4],
        };
        let first = composite(&base, &all).unwrap();
        let second = composite(&base, &none).unwrap();
        assert_eq!(base, snapshot);
        assert!(first.data.iter().all(|&px| px == HIGHLIGHT_RGB));
        assert_eq!(second, snapshot);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let mask = Mask {
            w: 1,
            h: 1,
            data: vec![true],
        };
        assert!(matches!(
            composite(&ColorImage::new(2, 1), &mask),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
