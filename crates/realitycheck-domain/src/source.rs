//! Source records - provenance for extracted claims

use crate::credence::Numeric;

/// Kind of source a claim was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Academic paper
    Paper,
    /// Book
    Book,
    /// Institutional or industry report
    Report,
    /// News or magazine article
    Article,
    /// Blog post
    Blog,
    /// Social media post
    Social,
    /// Conversation transcript
    Convo,
    /// Interview
    Interview,
    /// Dataset
    Data,
    /// Fiction
    Fiction,
    /// General background knowledge
    Knowledge,
}

impl SourceType {
    /// Every valid source type
    pub const ALL: [SourceType; 11] = [
        SourceType::Paper,
        SourceType::Book,
        SourceType::Report,
        SourceType::Article,
        SourceType::Blog,
        SourceType::Social,
        SourceType::Convo,
        SourceType::Interview,
        SourceType::Data,
        SourceType::Fiction,
        SourceType::Knowledge,
    ];

    /// Get the upper-case type code
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Paper => "PAPER",
            SourceType::Book => "BOOK",
            SourceType::Report => "REPORT",
            SourceType::Article => "ARTICLE",
            SourceType::Blog => "BLOG",
            SourceType::Social => "SOCIAL",
            SourceType::Convo => "CONVO",
            SourceType::Interview => "INTERVIEW",
            SourceType::Data => "DATA",
            SourceType::Fiction => "FICTION",
            SourceType::Knowledge => "KNOWLEDGE",
        }
    }

    /// Parse an exact type code
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// A source record
///
/// `claims_extracted` is denormalized: every claim listed here must cite
/// this source in its own `source_ids`, and the reverse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    /// Source identifier (free-form slug)
    pub id: String,

    /// Raw source type code
    pub source_type: String,

    /// Title
    pub title: String,

    /// Optional reliability probability, as stored
    pub reliability: Numeric,

    /// Claims extracted from this source
    pub claims_extracted: Vec<String>,
}

impl Source {
    /// Create a source with no extracted claims
    pub fn new(id: impl Into<String>, source_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_type: source_type.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether this source lists the given claim
    pub fn lists(&self, claim_id: &str) -> bool {
        self.claims_extracted.iter().any(|c| c == claim_id)
    }
}
