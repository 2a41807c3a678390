//! Validator configuration

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the record validators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Slack allowed when comparing a chain's credence to its weakest member
    pub chain_credence_tolerance: f64,

    /// How many missing prediction IDs to quote in a single finding
    pub missing_preview_limit: usize,

    /// Maximum number of records read per table
    pub snapshot_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            chain_credence_tolerance: 0.01,
            missing_preview_limit: 5,
            snapshot_limit: 100_000,
        }
    }
}

impl ValidationConfig {
    /// Configuration with no chain tolerance (any MIN overrun warns)
    pub fn exact() -> Self {
        Self {
            chain_credence_tolerance: 0.0,
            ..Self::default()
        }
    }
}

/// Render up to `limit` sorted IDs, with `...` only when some were cut
pub(crate) fn preview_ids(ids: &[&str], limit: usize) -> String {
    let shown = ids.iter().take(limit).copied().collect::<Vec<_>>().join(", ");
    if ids.len() > limit {
        format!("{shown}...")
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.chain_credence_tolerance, 0.01);
        assert_eq!(config.missing_preview_limit, 5);
        assert_eq!(config.snapshot_limit, 100_000);
    }

    #[test]
    fn test_exact_config() {
        let config = ValidationConfig::exact();
        assert_eq!(config.chain_credence_tolerance, 0.0);
        assert_eq!(config.missing_preview_limit, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ValidationConfig = toml::from_str("missing_preview_limit = 3").unwrap();
        assert_eq!(config.missing_preview_limit, 3);
        assert_eq!(config.chain_credence_tolerance, 0.01);
    }

    #[test]
    fn test_preview_ids() {
        assert_eq!(preview_ids(&["A", "B"], 5), "A, B");
        assert_eq!(preview_ids(&["A", "B", "C"], 2), "A, B...");
        assert_eq!(preview_ids(&["A", "B"], 2), "A, B");
    }
}
