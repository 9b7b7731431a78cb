//! Tolerance-banded selection over a depth map.
//!
//! A pixel is selected when `|depth - target| < tolerance`. The inequality is
//! strict, so a zero tolerance selects nothing but exact matches are still
//! evaluated the same way (NaN depths are never selected). Targets outside
//! `[0, 1]` are allowed and simply select whatever the data contains.
use crate::depth::DepthMap;
use crate::error::{Error, Result};
use crate::image::ImageView;
use serde::Serialize;

/// Center and half-width of a depth band.
///
/// Only obtainable through [`DepthBand::new`], so every band reaching
/// [`compute_mask`] has a finite, non-negative tolerance and a non-NaN target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DepthBand {
    target: f32,
    tolerance: f32,
}

impl DepthBand {
    /// Validated constructor: tolerance must be finite and `>= 0`.
    pub fn new(target: f32, tolerance: f32) -> Result<Self> {
        validate_tolerance(tolerance)?;
        if target.is_nan() {
            return Err(Error::InvalidParameter("target value is NaN".to_string()));
        }
        Ok(Self { target, tolerance })
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    #[inline]
    pub fn contains(&self, depth: f32) -> bool {
        (depth - self.target).abs() < self.tolerance
    }
}

pub(crate) fn validate_tolerance(tolerance: f32) -> Result<()> {
    if !(tolerance.is_finite() && tolerance >= 0.0) {
        return Err(Error::InvalidParameter(format!(
            "tolerance must be finite and non-negative, got {tolerance}"
        )));
    }
    Ok(())
}

/// Boolean grid with the same shape as the depth map it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl Mask {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    /// Number of selected cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    /// Fraction of selected cells in `[0, 1]`; 0 for an empty grid.
    pub fn coverage(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count() as f32 / self.data.len() as f32
    }

    /// True when every cell selected here is also selected in `other`.
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.w == other.w
            && self.h == other.h
            && self.data.iter().zip(&other.data).all(|(&a, &b)| !a || b)
    }
}

impl ImageView for Mask {
    type Pixel = bool;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

/// Compute the band mask. Pure; the depth map is only read.
pub fn compute_mask(depth: &DepthMap, band: &DepthBand) -> Mask {
    let data = depth.values().iter().map(|&d| band.contains(d)).collect();
    Mask {
        w: depth.width(),
        h: depth.height(),
        data,
    }
}
