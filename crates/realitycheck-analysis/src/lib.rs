//! Reality Check Analysis Validator
//!
//! Checks analysis markdown documents against the Output Contract for their
//! depth profile (`full` or `quick`). Full analyses additionally run the
//! rigor-v1 battery: Layer/Actor/Scope/Quantifier columns, a corrections
//! section and Stage 2 factual-verification gating.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use realitycheck_analysis::validate_file;
//!
//! let result = validate_file(Path::new("analysis/sources/example.md"), None, false);
//! for error in &result.errors {
//!     println!("ERROR: {}", error.message());
//! }
//! ```

pub mod error;
pub mod markdown;
pub mod profile;
pub mod rigor;
pub mod validator;

pub use error::AnalysisError;
pub use markdown::{extract_claim_id, MarkdownTable};
pub use profile::Profile;
pub use rigor::{check_rigor, FactualStatus};
pub use validator::{validate_content, validate_file, ValidationResult};
