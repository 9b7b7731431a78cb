use crate::error::{Error, Result};

/// Owned 8-bit RGB image in row-major layout, one `[r, g, b]` triple per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<[u8; 3]>,
}

impl ColorImage {
    /// All-black image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0, 0, 0])
    }

    pub fn filled(w: usize, h: usize, rgb: [u8; 3]) -> Self {
        Self {
            w,
            h,
            data: vec![rgb; w * h],
        }
    }

    /// Build from an interleaved 8-bit buffer with 3 (RGB) or 4 (RGBA)
    /// channels. The alpha channel is discarded; any other channel count is a
    /// [`Error::Format`].
    pub fn from_interleaved(w: usize, h: usize, channels: usize, raw: &[u8]) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(Error::Format { channels });
        }
        let expected = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| Error::ImageDecode(format!("image size {w}x{h} overflows")))?;
        if raw.len() != expected {
            return Err(Error::ImageDecode(format!(
                "pixel buffer holds {} bytes, expected {expected} for {w}x{h}x{channels}",
                raw.len()
            )));
        }
        let data = raw
            .chunks_exact(channels)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let w = self.w;
        self.data[y * w + x] = rgb;
    }

    /// Interleaved RGB bytes, `w * h * 3` long.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_flattened()
    }

    /// Always 3: alpha never survives loading.
    pub fn channels(&self) -> usize {
        3
    }
}

impl crate::image::traits::ImageView for ColorImage {
    type Pixel = [u8; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; 3]] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for ColorImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [[u8; 3]] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
