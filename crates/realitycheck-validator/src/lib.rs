//! Reality Check Record Validator
//!
//! Checks the knowledge base for referential and vocabulary integrity.
//!
//! The validator provides:
//! - Database validation over a record store snapshot
//! - Legacy YAML registry validation
//! - Boundary failures (no store, missing tables, unreadable files) reported
//!   as single findings instead of errors
//!
//! # Examples
//!
//! ```no_run
//! use realitycheck_validator::{validate_db, ValidationConfig};
//!
//! let findings = validate_db(None, &ValidationConfig::default());
//! for finding in &findings {
//!     println!("{finding}");
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod db;
mod error;
pub mod ids;
mod yaml;

pub use config::ValidationConfig;
pub use db::{validate_db, validate_store};
pub use error::ValidatorError;
pub use yaml::{validate_yaml, CLAIMS_FILE, PREDICTIONS_FILE, SOURCES_FILE};
