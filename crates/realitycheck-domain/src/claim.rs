//! Claim module - the fundamental unit of the Reality Check registry

use crate::credence::Numeric;
use crate::relationship::ClaimRelation;
use std::fmt;

/// Epistemic type tag of a claim
///
/// Serialized as the bracketed tag used across the registry and the
/// analysis documents (`[F]`, `[T]`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimType {
    /// `[F]` - an empirically checkable fact
    Fact,
    /// `[T]` - an explanatory theory
    Theory,
    /// `[H]` - a hypothesis awaiting evidence
    Hypothesis,
    /// `[P]` - a prediction about the future (requires a prediction record)
    Prediction,
    /// `[A]` - an assumption the argument rests on
    Assumption,
    /// `[C]` - a counterfactual
    Counterfactual,
    /// `[S]` - speculation
    Speculation,
    /// `[X]` - a recorded contradiction
    Contradiction,
}

impl ClaimType {
    /// Every claim type, in registry order
    pub const ALL: [ClaimType; 8] = [
        ClaimType::Fact,
        ClaimType::Theory,
        ClaimType::Hypothesis,
        ClaimType::Prediction,
        ClaimType::Assumption,
        ClaimType::Counterfactual,
        ClaimType::Speculation,
        ClaimType::Contradiction,
    ];

    /// Get the bracketed tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Fact => "[F]",
            ClaimType::Theory => "[T]",
            ClaimType::Hypothesis => "[H]",
            ClaimType::Prediction => "[P]",
            ClaimType::Assumption => "[A]",
            ClaimType::Counterfactual => "[C]",
            ClaimType::Speculation => "[S]",
            ClaimType::Contradiction => "[X]",
        }
    }

    /// Parse an exact bracketed tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence tier, from E1 (strongest) to E6 (weakest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvidenceLevel {
    /// Systematic review / meta-analysis
    E1,
    /// Peer-reviewed study or official statistics
    E2,
    /// Expert consensus or preprint
    E3,
    /// Credible journalism or industry report
    E4,
    /// Opinion or anecdote
    E5,
    /// Unsupported or speculative
    E6,
}

impl EvidenceLevel {
    /// Every evidence level, best to weakest
    pub const ALL: [EvidenceLevel; 6] = [
        EvidenceLevel::E1,
        EvidenceLevel::E2,
        EvidenceLevel::E3,
        EvidenceLevel::E4,
        EvidenceLevel::E5,
        EvidenceLevel::E6,
    ];

    /// Get the level code
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::E1 => "E1",
            EvidenceLevel::E2 => "E2",
            EvidenceLevel::E3 => "E3",
            EvidenceLevel::E4 => "E4",
            EvidenceLevel::E5 => "E5",
            EvidenceLevel::E6 => "E6",
        }
    }

    /// Parse an exact level code
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

/// A claim record as held by the record store
///
/// Enumerated fields (`claim_type`, `domain`, `evidence_level`) are kept as
/// the raw stored strings; use [`ClaimType::parse`] and friends to interpret
/// them. Relationship lists are never `None`: an absent list is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Claim {
    /// Identifier in `DOMAIN-YYYY-NNN` form
    pub id: String,

    /// Claim statement
    pub text: String,

    /// Raw type tag (`[F]`, `[P]`, ...)
    pub claim_type: String,

    /// Raw domain code; must equal the domain segment of `id`
    pub domain: String,

    /// Raw evidence level (`E1`..`E6`)
    pub evidence_level: String,

    /// Credence in [0, 1], as stored
    pub credence: Numeric,

    /// Sources this claim was extracted from
    pub source_ids: Vec<String>,

    /// Claims this claim supports
    pub supports: Vec<String>,

    /// Claims this claim contradicts
    pub contradicts: Vec<String>,

    /// Claims this claim depends on
    pub depends_on: Vec<String>,

    /// Claims that modify this claim
    pub modified_by: Vec<String>,

    /// Chain this claim belongs to, if any
    pub part_of_chain: Option<String>,

    /// Monotonic version, incremented on every update
    pub version: i64,

    /// Last update timestamp (ISO date)
    pub last_updated: Option<String>,

    /// Vector embedding, if one was generated
    pub embedding: Option<Vec<f32>>,
}

impl Claim {
    /// Create a claim with the required fields; everything else is empty
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        claim_type: impl Into<String>,
        domain: impl Into<String>,
        evidence_level: impl Into<String>,
        credence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            claim_type: claim_type.into(),
            domain: domain.into(),
            evidence_level: evidence_level.into(),
            credence: Numeric::Number(credence),
            version: 1,
            ..Self::default()
        }
    }

    /// Domain segment embedded in the claim ID (text before the first `-`)
    pub fn id_domain(&self) -> &str {
        self.id.split('-').next().unwrap_or_default()
    }

    /// Parsed claim type, if the raw tag is valid
    pub fn parsed_type(&self) -> Option<ClaimType> {
        ClaimType::parse(&self.claim_type)
    }

    /// Whether this claim is a `[P]` prediction
    pub fn is_prediction(&self) -> bool {
        self.parsed_type() == Some(ClaimType::Prediction)
    }

    /// Whether a non-empty embedding is attached
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Targets of one relationship list
    pub fn related(&self, relation: ClaimRelation) -> &[String] {
        match relation {
            ClaimRelation::Supports => &self.supports,
            ClaimRelation::Contradicts => &self.contradicts,
            ClaimRelation::DependsOn => &self.depends_on,
            ClaimRelation::ModifiedBy => &self.modified_by,
        }
    }

    /// Whether this claim cites the given source
    pub fn cites(&self, source_id: &str) -> bool {
        self.source_ids.iter().any(|s| s == source_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_type_parse() {
        assert_eq!(ClaimType::parse("[F]"), Some(ClaimType::Fact));
        assert_eq!(ClaimType::parse("[X]"), Some(ClaimType::Contradiction));
        assert_eq!(ClaimType::parse("F"), None);
        assert_eq!(ClaimType::parse("[f]"), None);
    }

    #[test]
    fn test_claim_type_tags_complete() {
        let tags: Vec<&str> = ClaimType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, ["[F]", "[T]", "[H]", "[P]", "[A]", "[C]", "[S]", "[X]"]);
    }

    #[test]
    fn test_evidence_levels_complete() {
        assert_eq!(EvidenceLevel::ALL.len(), 6);
        assert_eq!(EvidenceLevel::parse("E4"), Some(EvidenceLevel::E4));
        assert_eq!(EvidenceLevel::parse("E99"), None);
        assert!(EvidenceLevel::E1 < EvidenceLevel::E6);
    }

    #[test]
    fn test_id_domain() {
        let claim = Claim::new("TECH-2026-001", "text", "[F]", "LABOR", "E2", 0.5);
        assert_eq!(claim.id_domain(), "TECH");
        assert_eq!(claim.version, 1);
    }

    #[test]
    fn test_embedding_presence() {
        let mut claim = Claim::new("TECH-2026-001", "text", "[F]", "TECH", "E2", 0.5);
        assert!(!claim.has_embedding());
        claim.embedding = Some(vec![]);
        assert!(!claim.has_embedding());
        claim.embedding = Some(vec![0.1, 0.2]);
        assert!(claim.has_embedding());
    }

    #[test]
    fn test_related_lists() {
        let mut claim = Claim::new("TECH-2026-001", "text", "[P]", "TECH", "E2", 0.5);
        claim.depends_on = vec!["TECH-2026-002".to_string()];
        assert!(claim.is_prediction());
        assert_eq!(claim.related(ClaimRelation::DependsOn), ["TECH-2026-002"]);
        assert!(claim.related(ClaimRelation::Supports).is_empty());
    }
}
