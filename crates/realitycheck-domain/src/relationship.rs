//! Relationship module - claim-to-claim links held on the claim record

use std::fmt;

/// Kind of link from one claim to another
///
/// Links are denormalized lists on the claim itself, so every target has to
/// be resolved against the claim registry by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimRelation {
    /// This claim supports the target
    Supports,

    /// This claim contradicts the target
    Contradicts,

    /// This claim depends on the target
    DependsOn,

    /// This claim is modified by the target
    ModifiedBy,
}

impl ClaimRelation {
    /// All relationship lists, in record field order
    pub const ALL: [ClaimRelation; 4] = [
        ClaimRelation::Supports,
        ClaimRelation::Contradicts,
        ClaimRelation::DependsOn,
        ClaimRelation::ModifiedBy,
    ];

    /// Record field name of this relationship list
    pub fn field_name(&self) -> &'static str {
        match self {
            ClaimRelation::Supports => "supports",
            ClaimRelation::Contradicts => "contradicts",
            ClaimRelation::DependsOn => "depends_on",
            ClaimRelation::ModifiedBy => "modified_by",
        }
    }
}

impl fmt::Display for ClaimRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
