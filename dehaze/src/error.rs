//! Error types for the dehazing pipeline.

use std::fmt;

use thiserror::Error;

/// Pipeline stage, used to attribute numeric failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    DarkChannel,
    AtmosphericLight,
    Transmission,
    Refinement,
    Reconstruction,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalize => "normalize",
            Stage::DarkChannel => "dark channel",
            Stage::AtmosphericLight => "atmospheric light",
            Stage::Transmission => "transmission",
            Stage::Refinement => "refinement",
            Stage::Reconstruction => "reconstruction",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while dehazing an image.
///
/// Every variant aborts the whole invocation; no partial output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty image or a channel count other than 3.
    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    /// Non-finite or otherwise malformed intermediate data.
    #[error("Numeric failure during {stage}: {detail}")]
    NumericFailure { stage: Stage, detail: String },

    /// Any other fault, e.g. a panic inside a stage.
    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, Error>;
