//! Error type shared by the area-editing core.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AreaError {
    #[error("malformed game coordinate {input:?}: {reason}")]
    MalformedCoordinate { input: String, reason: String },

    /// Export was cancelled or given a blank name. Callers treat this as
    /// abandonment rather than a failure.
    #[error("no area name provided")]
    EmptyName,

    #[error("vertex index {index} out of bounds for ring of {len} vertices")]
    InvalidIndex { index: usize, len: usize },

    #[error("invalid calibration: {axis} range [{min}, {max}] is empty")]
    InvalidCalibration { axis: char, min: f64, max: f64 },

    #[error("invalid latch radius {radius}: must be a finite, non-negative distance")]
    InvalidLatchRadius { radius: f64 },

    #[error("invalid image extent {width}x{height}")]
    InvalidExtent { width: u32, height: u32 },

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse area file {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AreaError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        AreaError::MalformedCoordinate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error means "the user backed out" rather than a real failure.
    pub fn is_abandonment(&self) -> bool {
        matches!(self, AreaError::EmptyName)
    }
}
