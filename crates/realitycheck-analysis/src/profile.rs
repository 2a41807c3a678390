//! Analysis depth profiles and their Output Contract requirements

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static QUICK_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\*\*Analysis Depth\*\*.*quick").unwrap());

/// Depth of an analysis document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Three-stage analysis with the rigor battery
    Full,
    /// Summary-only analysis
    Quick,
}

impl Profile {
    /// Get the profile name
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Quick => "quick",
        }
    }

    /// Parse a profile name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Profile::Full),
            "quick" => Some(Profile::Quick),
            _ => None,
        }
    }

    /// Profile declared by the document (`**Analysis Depth**: quick`), else full
    pub fn detect(content: &str) -> Self {
        if QUICK_MARKER_RE.is_match(content) {
            Profile::Quick
        } else {
            Profile::Full
        }
    }

    /// Structural requirements for this profile
    pub fn requirements(&self) -> &'static Requirements {
        match self {
            Profile::Full => &FULL,
            Profile::Quick => &QUICK,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid profile: {s} (expected full or quick)"))
    }
}

/// A named pattern the document must contain
#[derive(Debug)]
pub struct Signature {
    /// Case-insensitive pattern
    pub regex: Regex,
    /// Name used in findings
    pub name: &'static str,
}

impl Signature {
    fn new(pattern: &str, name: &'static str) -> Self {
        Self {
            regex: Regex::new(&format!("(?i){pattern}")).unwrap(),
            name,
        }
    }
}

/// Everything a profile requires
#[derive(Debug)]
pub struct Requirements {
    /// Section headings (case-insensitive substring match)
    pub sections: &'static [&'static str],
    /// Table header signatures
    pub tables: Vec<Signature>,
    /// Fixed textual elements
    pub elements: Vec<Signature>,
}

const FULL_SECTIONS: &[&str] = &[
    "## Metadata",
    "## Stage 1: Descriptive Analysis",
    "### Core Thesis",
    "### Key Claims",
    "### Argument Structure",
    "### Theoretical Lineage",
    "## Stage 2: Evaluative Analysis",
    "### Key Factual Claims Verified",
    "### Disconfirming Evidence Search",
    "### Internal Tensions",
    "### Persuasion Techniques",
    "### Unstated Assumptions",
    "## Stage 3: Dialectical Analysis",
    "### Steelmanned Argument",
    "### Strongest Counterarguments",
    "### Supporting Theories",
    "### Contradicting Theories",
    "### Claim Summary",
    "### Claims to Register",
];

const QUICK_SECTIONS: &[&str] = &[
    "## Metadata",
    "## Summary",
    "### Claim Summary",
    "### Claims to Register",
];

const KEY_CLAIMS_TABLE: &str = r"\|\s*#\s*\|.*Claim.*\|.*Claim ID.*\|.*Type.*\|.*Domain.*\|";
const CLAIM_SUMMARY_TABLE: &str = r"\|\s*ID\s*\|.*Type.*\|.*Domain.*\|.*Evidence.*\|.*Credence.*\|";

fn legends() -> Vec<Signature> {
    vec![
        Signature::new(r">\s*\*\*Claim types\*\*:", "Claim types legend"),
        Signature::new(r">\s*\*\*Evidence\*\*:", "Evidence legend"),
        Signature::new(r"```yaml\s*\nclaims:", "Claims YAML block"),
    ]
}

static FULL: LazyLock<Requirements> = LazyLock::new(|| {
    let mut elements = legends();
    // Legacy documents say "Confidence in Analysis"
    elements.push(Signature::new(
        r"\*\*(Credence|Confidence) in Analysis\*\*:",
        "Credence in Analysis score",
    ));

    Requirements {
        sections: FULL_SECTIONS,
        tables: vec![
            Signature::new(KEY_CLAIMS_TABLE, "Key Claims table"),
            Signature::new(CLAIM_SUMMARY_TABLE, "Claim Summary table"),
        ],
        elements,
    }
});

static QUICK: LazyLock<Requirements> = LazyLock::new(|| {
    let mut elements = legends();
    elements.push(Signature::new(
        r"\*\*Analysis Depth\*\*.*quick",
        "Analysis Depth: quick marker",
    ));

    Requirements {
        sections: QUICK_SECTIONS,
        tables: vec![Signature::new(CLAIM_SUMMARY_TABLE, "Claim Summary table")],
        elements,
    }
});
