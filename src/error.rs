//! Error types for the smooth_palette pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Errors surfaced by the palette pipeline.
///
/// Every error is raised at the stage that detects it; no stage clamps
/// its inputs to a feasible value or falls back to a partial result.
#[derive(Error, Debug)]
pub enum PaletteError {
    /// The dominant-color extraction collaborator failed (e.g. the image
    /// could not be decoded).
    #[error("color extraction failed: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Fewer than two distinct colors remained after exclusion, so there
    /// is no adjacent pair to interpolate between.
    #[error("not enough colors to interpolate: got {count}, need at least 2")]
    EmptyInput { count: usize },

    /// Every adjacent pair has zero spacing, so the insertion budget
    /// cannot be allocated proportionally.
    #[error("adjacent colors have zero total spacing")]
    DegenerateSpacing,

    /// The target palette size is smaller than the sorted palette.
    #[error("target size {total} is smaller than the {len} colors to expand")]
    InvalidTarget { total: usize, len: usize },

    /// The sample count is below 2, or exceeds what the palette length
    /// can provide at a non-zero stride.
    #[error("cannot draw {k} evenly spaced colors from a palette of {len}")]
    InvalidSampleRequest { k: usize, len: usize },
}

impl PaletteError {
    /// Create an extraction error wrapping the collaborator's failure.
    pub fn extraction<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
