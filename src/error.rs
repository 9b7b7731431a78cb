//! Error types shared by the decoders, the alignment check and the renderers.
//!
//! Every failure is detected where the violated precondition is checked and
//! surfaced to the caller unchanged; nothing here substitutes defaults.
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while parsing a Portable Float Map.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read PFM data: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing PFM magic token")]
    MissingMagic,

    /// Only `PF` (color) and `Pf` (grayscale) are valid.
    #[error("invalid PFM magic token {0:?}")]
    InvalidMagic(String),

    #[error("malformed PFM header line {line}")]
    MalformedHeader { line: usize },

    #[error("invalid PFM dimensions {0:?}")]
    InvalidDimensions(String),

    #[error("invalid PFM scale {0:?}")]
    InvalidScale(String),

    #[error("truncated PFM payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    #[error("PFM payload has {extra} unexpected trailing bytes")]
    TrailingData { extra: usize },
}

/// Top-level pipeline error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Color image decoded to something other than RGB or RGBA.
    #[error("unsupported color image: {channels} channels (expected 3 or 4)")]
    Format { channels: usize },

    #[error("failed to decode color image: {0}")]
    ImageDecode(String),

    /// Shapes are reported as `height x width`.
    #[error("dimension mismatch: depth map is {}x{}, color image is {}x{}", .depth.0, .depth.1, .image.0, .image.1)]
    DimensionMismatch {
        depth: (usize, usize),
        image: (usize, usize),
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
