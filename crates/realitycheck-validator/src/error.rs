//! Validator error types
//!
//! These never escape the public validators: each one is turned into a
//! single boundary finding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the data to validate
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Record store read failed
    #[error("{0}")]
    Store(String),

    /// Registry file does not exist
    #[error("Missing {}", .0.display())]
    Missing(PathBuf),

    /// Registry file could not be read or parsed
    #[error("Failed to parse YAML: {}: {reason}", .path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying problem
        reason: String,
    },
}
