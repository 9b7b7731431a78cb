#![doc = include_str!("../README.md")]

// Core pipeline: decode -> align -> mask -> composite -> sequence.
pub mod align;
pub mod depth;
pub mod error;
pub mod image;
pub mod mask;
pub mod overlay;
pub mod pfm;
pub mod sequence;

// Tooling support for the demo binaries.
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::align::{check_alignment, Scene};
pub use crate::depth::{DepthMap, DepthStats};
pub use crate::error::{DecodeError, Error, Result};
pub use crate::image::ColorImage;
pub use crate::mask::{compute_mask, DepthBand, Mask};
pub use crate::overlay::{composite, Frame, HIGHLIGHT_RGB};
pub use crate::pfm::{decode_pfm, encode_pfm, load_depth_map, read_pfm, Endianness, PfmImage};
pub use crate::sequence::{
    generate_sequence, render_frame, render_single, FrameLabel, FrameSweep, RenderedFrame,
    SweepOptions,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use depth_highlight::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> depth_highlight::Result<()> {
/// let scene = Scene::open(Path::new("result.pfm"), Path::new("result.png"))?;
/// let frame = scene.render(0.5, 0.005)?;
/// println!("{} coverage={:.2}%", frame.label.caption(), frame.coverage * 100.0);
///
/// for frame in scene.sweep(&SweepOptions::default())? {
///     let frame = frame?;
///     println!("{}", frame.label.caption());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{DepthBand, DepthMap, Scene, SweepOptions};
}
