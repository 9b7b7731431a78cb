//! Owned single-channel f32 grid in row-major layout.
//!
//! Backing store for decoded depth values. Row 0 is the top scanline once a
//! grid has left the PFM decoder.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Grid width in pixels
    pub w: usize,
    /// Grid height in pixels
    pub h: usize,
    /// Backing storage in row-major order, `w * h` elements
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` when the length does
    /// not match `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (w.checked_mul(h) == Some(data.len())).then_some(Self { w, h, data })
    }

    /// Build from nested rows (top row first). Returns `None` for ragged input.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Option<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(w * h);
        for row in rows {
            let row = row.as_ref();
            if row.len() != w {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self { w, h, data })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

/// Reverse the order of `row_len`-sized rows in `data`. A trailing partial
/// row is left untouched.
pub(crate) fn flip_rows<T>(data: &mut [T], row_len: usize) {
    if row_len == 0 {
        return;
    }
    let h = data.len() / row_len;
    for y in 0..h / 2 {
        let (top, bottom) = data.split_at_mut((h - 1 - y) * row_len);
        top[y * row_len..(y + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_rows_reverses_row_order() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        flip_rows(&mut data, 2);
        assert_eq!(data, vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        flip_rows(&mut data, 2);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn flip_rows_keeps_interleaved_pixels_together() {
        // Two rows of two RGB pixels each.
        let mut data: Vec<u8> = (0..12).collect();
        flip_rows(&mut data, 6);
        assert_eq!(data, vec![6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows: Vec<Vec<f32>> = vec![vec![0.0, 1.0], vec![2.0]];
        assert!(ImageF32::from_rows(&rows).is_none());
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(ImageF32::from_vec(2, 2, vec![0.0; 3]).is_none());
        assert!(ImageF32::from_vec(2, 2, vec![0.0; 4]).is_some());
    }
}
