//! Prediction tracking records (one per `[P]` claim)

/// Outcome status of a tracked prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionStatus {
    /// `[P+]` confirmed
    Confirmed,
    /// `[P~]` partially confirmed
    PartiallyConfirmed,
    /// `[P→]` on track
    OnTrack,
    /// `[P?]` uncertain
    Uncertain,
    /// `[P←]` off track
    OffTrack,
    /// `[P!]` partially refuted
    PartiallyRefuted,
    /// `[P-]` refuted
    Refuted,
    /// `[P∅]` unfalsifiable
    Unfalsifiable,
}

impl PredictionStatus {
    /// Every prediction status
    pub const ALL: [PredictionStatus; 8] = [
        PredictionStatus::Confirmed,
        PredictionStatus::PartiallyConfirmed,
        PredictionStatus::OnTrack,
        PredictionStatus::Uncertain,
        PredictionStatus::OffTrack,
        PredictionStatus::PartiallyRefuted,
        PredictionStatus::Refuted,
        PredictionStatus::Unfalsifiable,
    ];

    /// Get the bracketed status tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Confirmed => "[P+]",
            PredictionStatus::PartiallyConfirmed => "[P~]",
            PredictionStatus::OnTrack => "[P→]",
            PredictionStatus::Uncertain => "[P?]",
            PredictionStatus::OffTrack => "[P←]",
            PredictionStatus::PartiallyRefuted => "[P!]",
            PredictionStatus::Refuted => "[P-]",
            PredictionStatus::Unfalsifiable => "[P∅]",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PredictionStatus::Confirmed => "Confirmed",
            PredictionStatus::PartiallyConfirmed => "Partially Confirmed",
            PredictionStatus::OnTrack => "On Track",
            PredictionStatus::Uncertain => "Uncertain",
            PredictionStatus::OffTrack => "Off Track",
            PredictionStatus::PartiallyRefuted => "Partially Refuted",
            PredictionStatus::Refuted => "Refuted",
            PredictionStatus::Unfalsifiable => "Unfalsifiable",
        }
    }

    /// Parse an exact status tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

/// A prediction record, keyed by the claim it tracks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prediction {
    /// The `[P]` claim this record tracks
    pub claim_id: String,

    /// Source the prediction was made in
    pub source_id: Option<String>,

    /// Raw status tag
    pub status: String,
}

impl Prediction {
    /// Create a prediction record
    pub fn new(claim_id: impl Into<String>, source_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            claim_id: claim_id.into(),
            source_id: Some(source_id.into()),
            status: status.into(),
        }
    }
}
