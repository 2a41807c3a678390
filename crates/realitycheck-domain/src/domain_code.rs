//! Knowledge domain codes - the first segment of every claim ID

/// Topic domain of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainCode {
    /// Labor and employment
    Labor,
    /// Economics
    Econ,
    /// Government and policy
    Gov,
    /// Technology
    Tech,
    /// Society and culture
    Soc,
    /// Natural resources and energy
    Resource,
    /// Transitions and trajectories
    Trans,
    /// Claims about the analysis itself
    Meta,
    /// Geopolitics
    Geo,
    /// Institutions
    Inst,
    /// Risk
    Risk,
}

impl DomainCode {
    /// Every valid domain code
    pub const ALL: [DomainCode; 11] = [
        DomainCode::Labor,
        DomainCode::Econ,
        DomainCode::Gov,
        DomainCode::Tech,
        DomainCode::Soc,
        DomainCode::Resource,
        DomainCode::Trans,
        DomainCode::Meta,
        DomainCode::Geo,
        DomainCode::Inst,
        DomainCode::Risk,
    ];

    /// Get the upper-case code
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCode::Labor => "LABOR",
            DomainCode::Econ => "ECON",
            DomainCode::Gov => "GOV",
            DomainCode::Tech => "TECH",
            DomainCode::Soc => "SOC",
            DomainCode::Resource => "RESOURCE",
            DomainCode::Trans => "TRANS",
            DomainCode::Meta => "META",
            DomainCode::Geo => "GEO",
            DomainCode::Inst => "INST",
            DomainCode::Risk => "RISK",
        }
    }

    /// Parse an exact domain code (case-sensitive, as stored)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

impl std::str::FromStr for DomainCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid domain: {}", s))
    }
}
