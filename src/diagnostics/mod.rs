//! Serializable run reports: input description, per-frame records and
//! stage timings. Written as JSON by the demo tools so an external encoder
//! can assemble frames in order with their captions.

pub mod sweep;
pub mod timing;

pub use sweep::{FrameRecord, InputDescriptor, SweepManifest};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
