//! Scalar depth field decoded from a PFM file.
use crate::image::{ImageF32, ImageView};
use crate::pfm::Endianness;
use serde::Serialize;

/// Immutable depth grid, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthMap {
    grid: ImageF32,
    scale: f32,
    endianness: Endianness,
}

impl DepthMap {
    pub fn new(grid: ImageF32, scale: f32, endianness: Endianness) -> Self {
        Self {
            grid,
            scale,
            endianness,
        }
    }

    /// Wrap an in-memory grid (unit scale, little-endian provenance).
    pub fn from_grid(grid: ImageF32) -> Self {
        Self::new(grid, 1.0, Endianness::Little)
    }

    pub fn grid(&self) -> &ImageF32 {
        &self.grid
    }

    /// Magnitude of the header scale token.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Byte order the payload was stored in.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.grid.get(x, y)
    }

    pub fn values(&self) -> &[f32] {
        &self.grid.data
    }

    pub fn stats(&self) -> DepthStats {
        DepthStats::from_values(self.values())
    }
}

impl ImageView for DepthMap {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.grid.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.grid.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        self.grid.row(y)
    }
}

/// Summary of the value distribution, ignoring non-finite samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub finite_count: usize,
    pub total_count: usize,
}

impl DepthStats {
    pub fn from_values(values: &[f32]) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut finite_count = 0usize;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
            finite_count += 1;
        }
        if finite_count == 0 {
            return Self {
                min: f32::NAN,
                max: f32::NAN,
                mean: f32::NAN,
                finite_count,
                total_count: values.len(),
            };
        }
        Self {
            min,
            max,
            mean: (sum / finite_count as f64) as f32,
            finite_count,
            total_count: values.len(),
        }
    }

    /// Whether every finite sample lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.finite_count > 0 && self.min >= 0.0 && self.max <= 1.0
    }
}
