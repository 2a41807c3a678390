//! Argument chains built from registered claims

use crate::credence::Numeric;

/// An argument chain
///
/// Under MIN scoring a chain is no more credible than its weakest member
/// claim; other scoring methods may legitimately differ.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    /// Identifier in `CHAIN-YYYY-NNN` form
    pub id: String,

    /// Thesis the chain argues for
    pub thesis: String,

    /// Chain credence, as stored
    pub credence: Numeric,

    /// Member claim IDs, in argument order
    pub claims: Vec<String>,

    /// Scoring method (MIN/RANGE/CUSTOM), if recorded
    pub scoring_method: Option<String>,
}

impl Chain {
    /// Create a chain over the given member claims
    pub fn new(id: impl Into<String>, thesis: impl Into<String>, credence: f64, claims: Vec<String>) -> Self {
        Self {
            id: id.into(),
            thesis: thesis.into(),
            credence: Numeric::Number(credence),
            claims,
            scoring_method: None,
        }
    }
}
