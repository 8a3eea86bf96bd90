//! Error types for coverplan.

use thiserror::Error;

/// Errors produced by coverplan operations.
///
/// Degraded-but-valid outcomes (too few hubs, an unmet coverage target) are
/// not errors; they are reported as [`PlanWarning`](crate::PlanWarning)
/// values on the pipeline output.
#[derive(Error, Debug)]
pub enum CoverplanError {
    /// Input data failed validation (malformed coordinates, mismatched lists).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoverplanError>;
