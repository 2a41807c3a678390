//! Analysis log records - one per assistant tool pass over a source

/// Lifecycle status of an analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStatus {
    /// Pass started, not finished
    Started,
    /// Pass completed; its source must exist
    Completed,
    /// Pass failed
    Failed,
    /// Pass canceled
    Canceled,
    /// Draft pass; claim references are not yet binding
    Draft,
}

impl AnalysisStatus {
    /// Every analysis status
    pub const ALL: [AnalysisStatus; 5] = [
        AnalysisStatus::Started,
        AnalysisStatus::Completed,
        AnalysisStatus::Failed,
        AnalysisStatus::Canceled,
        AnalysisStatus::Draft,
    ];

    /// Get the lower-case status
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Started => "started",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
            AnalysisStatus::Canceled => "canceled",
            AnalysisStatus::Draft => "draft",
        }
    }

    /// Parse an exact status
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

/// Tool that performed an analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTool {
    /// Claude Code integration
    ClaudeCode,
    /// Codex integration
    Codex,
    /// Amp integration
    Amp,
    /// Performed by hand
    Manual,
    /// Any other tool
    Other,
}

impl AnalysisTool {
    /// Every analysis tool
    pub const ALL: [AnalysisTool; 5] = [
        AnalysisTool::ClaudeCode,
        AnalysisTool::Codex,
        AnalysisTool::Amp,
        AnalysisTool::Manual,
        AnalysisTool::Other,
    ];

    /// Get the tool name
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTool::ClaudeCode => "claude-code",
            AnalysisTool::Codex => "codex",
            AnalysisTool::Amp => "amp",
            AnalysisTool::Manual => "manual",
            AnalysisTool::Other => "other",
        }
    }

    /// Parse an exact tool name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// An analysis log record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisLog {
    /// Log identifier
    pub id: String,

    /// Source that was analyzed
    pub source_id: Option<String>,

    /// Raw status
    pub status: String,

    /// Raw tool name
    pub tool: String,

    /// Claims registered by this pass
    pub claims_extracted: Vec<String>,

    /// Claims updated by this pass
    pub claims_updated: Vec<String>,

    /// Per-stage breakdown, JSON-encoded
    pub stages_json: Option<String>,

    /// Wall-clock duration in seconds
    pub duration_seconds: Option<f64>,

    /// Cost in US dollars
    pub cost_usd: Option<f64>,
}

impl AnalysisLog {
    /// Create a log record for a pass over `source_id`
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        status: impl Into<String>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: Some(source_id.into()),
            status: status.into(),
            tool: tool.into(),
            ..Self::default()
        }
    }

    /// Parsed status, if valid
    pub fn parsed_status(&self) -> Option<AnalysisStatus> {
        AnalysisStatus::parse(&self.status)
    }
}
