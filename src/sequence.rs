//! Rendering single frames and swept frame sequences.
//!
//! A sweep samples `sample_count` target values evenly over `[0, 1]`
//! (`i / (sample_count - 1)`) and renders one independent frame per target.
//! Frames share nothing but the read-only [`Scene`], so with the `parallel`
//! feature they are rendered on the rayon pool; results are always returned
//! in sampled (strictly increasing target) order.
use crate::align::Scene;
use crate::error::{Error, Result};
use crate::mask::{compute_mask, validate_tolerance, DepthBand};
use crate::overlay::{composite, Frame};
use log::debug;
use serde::{Deserialize, Serialize};

/// Number of frames in a default sweep (targets 0.00, 0.01, ..., 1.00).
pub const DEFAULT_SAMPLE_COUNT: usize = 101;
/// Default band half-width.
pub const DEFAULT_TOLERANCE: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    pub tolerance: f32,
    pub sample_count: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl SweepOptions {
    pub fn new(tolerance: f32, sample_count: usize) -> Self {
        Self {
            tolerance,
            sample_count,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_tolerance(self.tolerance)?;
        if self.sample_count == 0 {
            return Err(Error::InvalidParameter(
                "sample count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Caption metadata carried alongside each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLabel {
    pub index: usize,
    pub target: f32,
    pub tolerance: f32,
}

impl FrameLabel {
    /// Target to two decimals, tolerance as given, e.g. `Target Depth: 0.50±0.005`.
    pub fn caption(&self) -> String {
        format!("Target Depth: {:.2}±{}", self.target, self.tolerance)
    }
}

#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub label: FrameLabel,
    /// Fraction of highlighted pixels.
    pub coverage: f32,
    pub image: Frame,
}

/// Evenly spaced targets over `[0, 1]`, both ends included. A single sample
/// sits at 0.
pub fn target_values(sample_count: usize) -> Result<Vec<f32>> {
    match sample_count {
        0 => Err(Error::InvalidParameter(
            "sample count must be positive".to_string(),
        )),
        1 => Ok(vec![0.0]),
        n => {
            let denom = (n - 1) as f32;
            Ok((0..n).map(|i| i as f32 / denom).collect())
        }
    }
}

/// Render one frame for `band`. `index` only feeds the label.
pub fn render_frame(scene: &Scene, band: &DepthBand, index: usize) -> Result<RenderedFrame> {
    let mask = compute_mask(scene.depth(), band);
    let coverage = mask.coverage();
    debug!(
        "frame {index}: target={:.4} tolerance={} coverage={:.2}%",
        band.target(),
        band.tolerance(),
        coverage * 100.0
    );
    let image = composite(scene.color(), &mask)?;
    Ok(RenderedFrame {
        label: FrameLabel {
            index,
            target: band.target(),
            tolerance: band.tolerance(),
        },
        coverage,
        image,
    })
}

/// Single-frame mode: validate the band, then render it.
pub fn render_single(scene: &Scene, target: f32, tolerance: f32) -> Result<RenderedFrame> {
    let band = DepthBand::new(target, tolerance)?;
    render_frame(scene, &band, 0)
}

/// Lazy, order-preserving sweep over a scene.
pub struct FrameSweep<'a> {
    scene: &'a Scene,
    targets: Vec<f32>,
    tolerance: f32,
    next: usize,
}

impl<'a> FrameSweep<'a> {
    pub fn new(scene: &'a Scene, options: &SweepOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            scene,
            targets: target_values(options.sample_count)?,
            tolerance: options.tolerance,
            next: 0,
        })
    }

    /// Labels of every frame the sweep will produce, in order.
    pub fn labels(&self) -> Vec<FrameLabel> {
        self.targets
            .iter()
            .enumerate()
            .map(|(index, &target)| FrameLabel {
                index,
                target,
                tolerance: self.tolerance,
            })
            .collect()
    }
}

impl Iterator for FrameSweep<'_> {
    type Item = Result<RenderedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let &target = self.targets.get(index)?;
        self.next += 1;
        Some(
            DepthBand::new(target, self.tolerance)
                .and_then(|band| render_frame(self.scene, &band, index)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.targets.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameSweep<'_> {}

impl Scene {
    /// Pure `target -> frame` mapping for interactive callers.
    pub fn render(&self, target: f32, tolerance: f32) -> Result<RenderedFrame> {
        render_single(self, target, tolerance)
    }

    pub fn sweep(&self, options: &SweepOptions) -> Result<FrameSweep<'_>> {
        FrameSweep::new(self, options)
    }
}

/// Eagerly render a full sweep, in increasing target order.
pub fn generate_sequence(scene: &Scene, options: &SweepOptions) -> Result<Vec<RenderedFrame>> {
    options.validate()?;
    let targets = target_values(options.sample_count)?;
    debug!(
        "rendering {} frames at tolerance {} ({}x{})",
        targets.len(),
        options.tolerance,
        scene.width(),
        scene.height()
    );
    render_targets(scene, &targets, options.tolerance)
}

fn render_target(
    scene: &Scene,
    target: f32,
    tolerance: f32,
    index: usize,
) -> Result<RenderedFrame> {
    let band = DepthBand::new(target, tolerance)?;
    render_frame(scene, &band, index)
}

#[cfg(feature = "parallel")]
fn render_targets(scene: &Scene, targets: &[f32], tolerance: f32) -> Result<Vec<RenderedFrame>> {
    use rayon::prelude::*;

    targets
        .par_iter()
        .enumerate()
        .map(|(index, &target)| render_target(scene, target, tolerance, index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn render_targets(scene: &Scene, targets: &[f32], tolerance: f32) -> Result<Vec<RenderedFrame>> {
    targets
        .iter()
        .enumerate()
        .map(|(index, &target)| render_target(scene, target, tolerance, index))
        .collect()
}
