//! Finding module - the uniform output unit of every integrity check
//!
//! Findings are immutable once built. Policy (strict mode, rigor gating)
//! produces promoted copies instead of mutating them in place.

use serde::Serialize;
use std::fmt;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    /// Integrity violation
    #[serde(rename = "ERROR")]
    Error,
    /// Advisory; promoted to an error in strict mode
    #[serde(rename = "WARN")]
    Warn,
}

impl Level {
    /// Get the upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check family a finding was emitted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Structural and referential checks
    #[default]
    General,
    /// rigor-v1 checks (layer columns, Stage 2 gating)
    Rigor,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    level: Level,
    code: String,
    message: String,
    category: Category,
}

impl Finding {
    /// Build an ERROR finding in the general category
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Error, code, message)
    }

    /// Build a WARN finding in the general category
    pub fn warn(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, code, message)
    }

    fn new(level: Level, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            code: code.into(),
            message: message.into(),
            category: Category::General,
        }
    }

    /// Tag the finding with a category
    pub fn in_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Severity
    pub fn level(&self) -> Level {
        self.level
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check family
    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether this is an ERROR finding
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// ERROR-level copy of this finding
    pub fn promoted(&self) -> Self {
        Self {
            level: Level::Error,
            ..self.clone()
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.level, self.code, self.message)
    }
}

/// Split findings into `(errors, warnings)`
///
/// With `strict`, every warning is promoted and the warning list is empty.
pub fn partition_findings(findings: &[Finding], strict: bool) -> (Vec<Finding>, Vec<Finding>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for finding in findings {
        if finding.is_error() {
            errors.push(finding.clone());
        } else if strict {
            errors.push(finding.promoted());
        } else {
            warnings.push(finding.clone());
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let f = Finding::error("CLAIM_TYPE_INVALID", "TECH-2026-001: Invalid type '[Z]'");
        assert_eq!(f.level(), Level::Error);
        assert_eq!(f.code(), "CLAIM_TYPE_INVALID");
        assert_eq!(f.category(), Category::General);

        let w = Finding::warn("LAYER_INVALID", "bad").in_category(Category::Rigor);
        assert_eq!(w.level(), Level::Warn);
        assert_eq!(w.category(), Category::Rigor);
    }

    #[test]
    fn test_promoted_keeps_identity() {
        let w = Finding::warn("CLAIM_NO_EMBEDDING", "TECH-2026-001: Missing embedding")
            .in_category(Category::Rigor);
        let e = w.promoted();
        assert!(e.is_error());
        assert_eq!(e.code(), w.code());
        assert_eq!(e.message(), w.message());
        assert_eq!(e.category(), Category::Rigor);
        assert!(!w.is_error());
    }

    #[test]
    fn test_partition_strict() {
        let findings = vec![
            Finding::error("A", "a"),
            Finding::warn("B", "b"),
            Finding::warn("C", "c"),
        ];

        let (errors, warnings) = partition_findings(&findings, false);
        assert_eq!(errors.len(), 1);
        assert_eq!(warnings.len(), 2);

        let (errors, warnings) = partition_findings(&findings, true);
        assert_eq!(errors.len(), 3);
        assert!(warnings.is_empty());
        assert!(errors.iter().all(Finding::is_error));
    }

    #[test]
    fn test_json_shape() {
        let f = Finding::warn("CRUX_NOT_ATTEMPTED", "msg").in_category(Category::Rigor);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["code"], "CRUX_NOT_ATTEMPTED");
        assert_eq!(json["message"], "msg");
        assert_eq!(json["category"], "rigor");
    }

    #[test]
    fn test_display() {
        let f = Finding::error("STORE_READ", "boom");
        assert_eq!(f.to_string(), "ERROR [STORE_READ] boom");
    }
}
