//! Reality Check Domain Layer
//!
//! This crate holds the record model of the Reality Check knowledge base and
//! the vocabulary every validator agrees on. It carries no storage, parsing
//! or I/O code; those live in the store, validator and analysis crates.
//!
//! ## Key Concepts
//!
//! - **Claim**: An epistemic statement (fact, theory, prediction...) with a credence
//! - **Source**: Where claims were extracted from, with a two-way backlink list
//! - **Chain**: An argument built from claims, scored no higher than its weakest link
//! - **Prediction**: Tracking record for every `[P]` claim
//! - **Analysis Log**: One tool pass over a source
//! - **Finding**: The uniform output unit of every integrity check
//!
//! ## Architecture
//!
//! - Records keep enumerated fields as raw strings so invalid values can be
//!   reported verbatim; the vocabulary enums parse them
//! - Optional and list-valued fields are resolved once, here, into
//!   `Option<_>` and (possibly empty) `Vec<_>`
//! - Trait definitions for the record store boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis_log;
pub mod chain;
pub mod claim;
pub mod credence;
pub mod domain_code;
pub mod finding;
pub mod prediction;
pub mod relationship;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use analysis_log::{AnalysisLog, AnalysisStatus, AnalysisTool};
pub use chain::Chain;
pub use claim::{Claim, ClaimType, EvidenceLevel};
pub use credence::{display_value, is_probability, Numeric};
pub use domain_code::DomainCode;
pub use finding::{partition_findings, Category, Finding, Level};
pub use prediction::{Prediction, PredictionStatus};
pub use relationship::ClaimRelation;
pub use source::{Source, SourceType};
pub use traits::{RecordKind, RecordStore};
