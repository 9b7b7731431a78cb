//! Pairing of a depth map with its color image.
//!
//! The pair is validated once; afterwards every mask and frame computation
//! borrows it read-only. No resampling or cropping is ever attempted.
use crate::depth::DepthMap;
use crate::error::{Error, Result};
use crate::image::io::load_color_image;
use crate::image::{ColorImage, ImageView};
use crate::pfm::load_depth_map;
use std::path::Path;

/// Fail with [`Error::DimensionMismatch`] unless both grids share
/// `height × width`.
pub fn check_alignment(depth: &DepthMap, color: &ColorImage) -> Result<()> {
    if depth.shape() != color.shape() {
        return Err(Error::DimensionMismatch {
            depth: depth.shape(),
            image: color.shape(),
        });
    }
    Ok(())
}

/// A validated depth/color pair with identical spatial dimensions.
#[derive(Clone, Debug)]
pub struct Scene {
    depth: DepthMap,
    color: ColorImage,
}

impl Scene {
    pub fn new(depth: DepthMap, color: ColorImage) -> Result<Self> {
        check_alignment(&depth, &color)?;
        Ok(Self { depth, color })
    }

    /// Load a PFM depth map and a raster image, then validate the pair.
    pub fn open(depth_path: &Path, image_path: &Path) -> Result<Self> {
        let depth = load_depth_map(depth_path)?;
        let color = load_color_image(image_path)?;
        Self::new(depth, color)
    }

    pub fn depth(&self) -> &DepthMap {
        &self.depth
    }

    pub fn color(&self) -> &ColorImage {
        &self.color
    }

    pub fn width(&self) -> usize {
        self.color.w
    }

    pub fn height(&self) -> usize {
        self.color.h
    }

    pub fn into_parts(self) -> (DepthMap, ColorImage) {
        (self.depth, self.color)
    }
}
