//! Analysis validator error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an analysis document
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The document could not be read
    #[error("Could not read file: {source}")]
    Read {
        /// Document path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}
