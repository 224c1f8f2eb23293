//! Error types for wrf2kml rendering tools.

use thiserror::Error;

/// Result type alias using VizError.
pub type VizResult<T> = Result<T, VizError>;

/// Primary error type for rendering operations.
///
/// Every variant maps to a distinct process exit code so batch drivers can
/// tell input-validation failures apart without parsing stderr.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid timestamp {0}")]
    TimeNotFound(String),

    #[error("no coordinate grid matches the {rows}x{cols} field of variable '{variable}'")]
    ShapeMismatch {
        variable: String,
        rows: usize,
        cols: usize,
    },

    #[error("no rendering wisdom registered for variable '{0}'")]
    VariableNotFound(String),

    #[error("no unit conversion registered for '{from}' -> '{to}'")]
    UnknownUnitConversion { from: String, to: String },

    #[error("failed to read dataset: {0}")]
    Dataset(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VizError {
    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VizError::Usage(_) => 1,
            VizError::TimeNotFound(_) => 2,
            VizError::ShapeMismatch { .. } => 3,
            VizError::VariableNotFound(_) => 4,
            VizError::UnknownUnitConversion { .. } => 5,
            VizError::Dataset(_) => 6,
            VizError::Render(_) | VizError::Io(_) => 7,
        }
    }
}
