use crate::align::Scene;
use crate::error::{Error, Result};
use crate::mask::DepthBand;
use crate::sequence::{
    generate_sequence, render_single, RenderedFrame, SweepOptions, DEFAULT_SAMPLE_COUNT,
    DEFAULT_TOLERANCE,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SweepToolConfig {
    /// PFM depth map.
    pub depth: PathBuf,
    /// Companion color image (PNG/JPEG).
    pub image: PathBuf,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    #[serde(default)]
    pub mode: RenderMode,
    pub output: SweepOutputConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Single { target: f32 },
    Sweep { samples: usize },
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Sweep {
            samples: DEFAULT_SAMPLE_COUNT,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SweepOutputConfig {
    /// Directory receiving `frame_NNNN.png` files.
    pub frames_dir: PathBuf,
    pub manifest_json: Option<PathBuf>,
}

fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

impl SweepToolConfig {
    /// Sweep parameters, or `None` in single-frame mode.
    pub fn sweep_options(&self) -> Option<SweepOptions> {
        match self.mode {
            RenderMode::Sweep { samples } => Some(SweepOptions::new(self.tolerance, samples)),
            RenderMode::Single { .. } => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.mode {
            RenderMode::Single { target } => DepthBand::new(target, self.tolerance).map(|_| ()),
            RenderMode::Sweep { samples } => SweepOptions::new(self.tolerance, samples).validate(),
        }
    }

    /// Render every frame the configured mode asks for, in index order.
    pub fn render(&self, scene: &Scene) -> Result<Vec<RenderedFrame>> {
        match self.mode {
            RenderMode::Single { target } => {
                Ok(vec![render_single(scene, target, self.tolerance)?])
            }
            RenderMode::Sweep { samples } => {
                generate_sequence(scene, &SweepOptions::new(self.tolerance, samples))
            }
        }
    }
}

pub fn parse_config(data: &str) -> Result<SweepToolConfig> {
    let config: SweepToolConfig =
        serde_json::from_str(data).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SweepToolConfig> {
    let data = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read config {}: {e}", path.display())))?;
    parse_config(&data).map_err(|e| match e {
        Error::Config(msg) => {
            Error::Config(format!("failed to parse config {}: {msg}", path.display()))
        }
        other => other,
    })
}
