use crate::align::Scene;
use crate::depth::DepthStats;
use crate::diagnostics::TimingBreakdown;
use crate::pfm::Endianness;
use crate::sequence::RenderedFrame;
use serde::Serialize;
use std::path::PathBuf;

/// Shape and provenance of the loaded inputs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth_scale: f32,
    pub depth_endianness: Endianness,
    pub depth_stats: DepthStats,
}

impl InputDescriptor {
    pub fn from_scene(scene: &Scene) -> Self {
        let depth = scene.depth();
        Self {
            width: scene.width(),
            height: scene.height(),
            depth_scale: depth.scale(),
            depth_endianness: depth.endianness(),
            depth_stats: depth.stats(),
        }
    }
}

/// One exported frame as seen by a downstream encoder.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub index: usize,
    pub target: f32,
    pub tolerance: f32,
    pub caption: String,
    pub coverage: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl FrameRecord {
    pub fn from_frame(frame: &RenderedFrame, file: Option<PathBuf>) -> Self {
        Self {
            index: frame.label.index,
            target: frame.label.target,
            tolerance: frame.label.tolerance,
            caption: frame.label.caption(),
            coverage: frame.coverage,
            file,
        }
    }
}

/// Ordered frame list plus run metadata, written next to exported frames.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepManifest {
    pub input: InputDescriptor,
    pub tolerance: f32,
    pub frames: Vec<FrameRecord>,
    pub timings: TimingBreakdown,
}
