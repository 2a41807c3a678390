//! Trait definitions for the record store boundary
//!
//! Validators only ever read snapshots through this trait. The SQLite
//! implementation lives in `realitycheck-store`.

use crate::{AnalysisLog, Chain, Claim, Prediction, Source};

/// Kind of record table held by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Claim registry
    Claims,
    /// Source registry
    Sources,
    /// Argument chains
    Chains,
    /// Prediction tracking
    Predictions,
    /// Recorded contradictions
    Contradictions,
    /// Term definitions
    Definitions,
    /// Analysis audit log
    AnalysisLogs,
}

impl RecordKind {
    /// Every table kind
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Claims,
        RecordKind::Sources,
        RecordKind::Chains,
        RecordKind::Predictions,
        RecordKind::Contradictions,
        RecordKind::Definitions,
        RecordKind::AnalysisLogs,
    ];

    /// Table name in the store
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordKind::Claims => "claims",
            RecordKind::Sources => "sources",
            RecordKind::Chains => "chains",
            RecordKind::Predictions => "predictions",
            RecordKind::Contradictions => "contradictions",
            RecordKind::Definitions => "definitions",
            RecordKind::AnalysisLogs => "analysis_logs",
        }
    }

    /// Whether the store is unusable without this table
    ///
    /// `analysis_logs` was added later; older stores lack it.
    pub fn required(&self) -> bool {
        !matches!(self, RecordKind::AnalysisLogs)
    }

    /// Table kinds every store must carry
    pub fn required_kinds() -> impl Iterator<Item = RecordKind> {
        Self::ALL.into_iter().filter(RecordKind::required)
    }
}

/// Read-only access to a snapshot of the knowledge base
///
/// Implemented by the infrastructure layer (realitycheck-store)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Names of the tables present in the store
    fn table_names(&self) -> Result<Vec<String>, Self::Error>;

    /// List up to `limit` claims
    fn list_claims(&self, limit: usize) -> Result<Vec<Claim>, Self::Error>;

    /// List up to `limit` sources
    fn list_sources(&self, limit: usize) -> Result<Vec<Source>, Self::Error>;

    /// List up to `limit` chains
    fn list_chains(&self, limit: usize) -> Result<Vec<Chain>, Self::Error>;

    /// List up to `limit` prediction records
    fn list_predictions(&self, limit: usize) -> Result<Vec<Prediction>, Self::Error>;

    /// List up to `limit` analysis logs
    fn list_analysis_logs(&self, limit: usize) -> Result<Vec<AnalysisLog>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_tables() {
        let required: Vec<&str> = RecordKind::required_kinds().map(|k| k.table_name()).collect();
        assert_eq!(
            required,
            ["claims", "sources", "chains", "predictions", "contradictions", "definitions"]
        );
        assert!(!RecordKind::AnalysisLogs.required());
    }
}
