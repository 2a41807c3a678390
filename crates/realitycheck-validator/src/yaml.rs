//! Legacy YAML registry validation
//!
//! Applies the claim/source/chain rule family to the pre-database layout:
//! `claims/registry.yaml`, `reference/sources.yaml` and, when present,
//! `tracking/predictions.md`.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use realitycheck_domain::{ClaimRelation, ClaimType, EvidenceLevel, Finding};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

use crate::config::preview_ids;
use crate::ids::{is_chain_id, is_claim_id};
use crate::{ValidationConfig, ValidatorError};

/// Registry file, relative to the repository root
pub const CLAIMS_FILE: &str = "claims/registry.yaml";

/// Source file, relative to the repository root
pub const SOURCES_FILE: &str = "reference/sources.yaml";

/// Prediction tracker, relative to the repository root
pub const PREDICTIONS_FILE: &str = "tracking/predictions.md";

static PREDICTION_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Claim ID\*\*:\s*([A-Z]+-\d{4}-\d{3})").unwrap());

/// Validate the legacy YAML registry under `repo_root`
pub fn validate_yaml(repo_root: &Path, config: &ValidationConfig) -> Vec<Finding> {
    let claims_doc = match load_yaml(&repo_root.join(CLAIMS_FILE)) {
        Ok(doc) => doc,
        Err(e @ ValidatorError::Missing(_)) => {
            return vec![Finding::error("CLAIMS_MISSING", e.to_string())];
        }
        Err(e) => return vec![Finding::error("CLAIMS_PARSE", e.to_string())],
    };
    let sources_doc = match load_yaml(&repo_root.join(SOURCES_FILE)) {
        Ok(doc) => doc,
        Err(e @ ValidatorError::Missing(_)) => {
            return vec![Finding::error("SOURCES_MISSING", e.to_string())];
        }
        Err(e) => return vec![Finding::error("SOURCES_PARSE", e.to_string())],
    };

    let claims = section(&claims_doc, "claims");
    let chains = section(&claims_doc, "chains");
    let sources = section(&sources_doc, "sources");

    debug!(
        claims = claims.len(),
        chains = chains.len(),
        sources = sources.len(),
        "Loaded YAML registry"
    );

    let claim_ids: HashSet<String> = claims.keys().map(key_string).collect();
    let source_ids: HashSet<String> = sources.keys().map(key_string).collect();

    let mut findings = Vec::new();

    for (key, value) in claims {
        let id = key_string(key);

        if !is_claim_id(&id) {
            findings.push(Finding::error("CLAIM_ID_FORMAT", format!("Invalid claim ID: {id}")));
            continue;
        }

        let Some(claim) = value.as_mapping() else {
            findings.push(Finding::error(
                "CLAIM_NOT_MAPPING",
                format!("{id}: Claim must be a mapping"),
            ));
            continue;
        };

        let claim_type = claim.get("type");
        if !scalar_str(claim_type).is_some_and(|t| ClaimType::parse(t).is_some()) {
            findings.push(Finding::error(
                "CLAIM_TYPE_INVALID",
                format!("{id}: Invalid type '{}'", display(claim_type)),
            ));
        }

        let evidence = claim.get("evidence_level");
        if !scalar_str(evidence).is_some_and(|e| EvidenceLevel::parse(e).is_some()) {
            findings.push(Finding::error(
                "CLAIM_EVIDENCE_INVALID",
                format!("{id}: Invalid evidence_level '{}'", display(evidence)),
            ));
        }

        // Older registries call it confidence
        let credence = claim
            .get("credence")
            .filter(|v| !v.is_null())
            .or_else(|| claim.get("confidence"));
        if !credence.and_then(Value::as_f64).is_some_and(|c| (0.0..=1.0).contains(&c)) {
            findings.push(Finding::error(
                "CLAIM_CREDENCE_INVALID",
                format!("{id}: Invalid credence '{}'", display(credence)),
            ));
        }

        for source_id in id_list(claim.get("source_ids")) {
            if !source_ids.contains(&source_id) {
                findings.push(Finding::error(
                    "CLAIM_SOURCE_MISSING",
                    format!("{id}: Unknown source '{source_id}'"),
                ));
            }
        }

        for relation in ClaimRelation::ALL {
            for target in id_list(claim.get(relation.field_name())) {
                if !claim_ids.contains(&target) {
                    findings.push(Finding::error(
                        "CLAIM_REL_MISSING",
                        format!("{id}: {relation} references unknown claim '{target}'"),
                    ));
                }
            }
        }
    }

    for (key, value) in sources {
        let id = key_string(key);

        let Some(source) = value.as_mapping() else {
            findings.push(Finding::error(
                "SOURCE_NOT_MAPPING",
                format!("{id}: Source must be a mapping"),
            ));
            continue;
        };

        for claim_id in id_list(source.get("claims_extracted")) {
            if !claim_ids.contains(&claim_id) {
                findings.push(Finding::error(
                    "SOURCE_CLAIM_MISSING",
                    format!("{id}: Unknown claim '{claim_id}'"),
                ));
            }
        }
    }

    for (key, value) in chains {
        let id = key_string(key);

        if !is_chain_id(&id) {
            findings.push(Finding::error("CHAIN_ID_FORMAT", format!("Invalid chain ID: {id}")));
            continue;
        }

        let members = value.as_mapping().and_then(|chain| chain.get("claims"));
        for claim_id in id_list(members) {
            if !claim_ids.contains(&claim_id) {
                findings.push(Finding::error(
                    "CHAIN_CLAIM_MISSING",
                    format!("{id}: Unknown claim '{claim_id}'"),
                ));
            }
        }
    }

    let predictions_path = repo_root.join(PREDICTIONS_FILE);
    if predictions_path.exists() {
        match fs::read_to_string(&predictions_path) {
            Ok(text) => check_prediction_tracker(&text, claims, &claim_ids, config, &mut findings),
            Err(e) => {
                warn!(
                    path = %predictions_path.display(),
                    error = %e,
                    "Cannot read prediction tracker"
                );
                findings.push(Finding::error(
                    "PREDICTIONS_READ",
                    format!("Cannot read {}: {e}", predictions_path.display()),
                ));
            }
        }
    }

    info!(findings = findings.len(), "YAML validation finished");
    findings
}

fn check_prediction_tracker(
    text: &str,
    claims: &Mapping,
    claim_ids: &HashSet<String>,
    config: &ValidationConfig,
    findings: &mut Vec<Finding>,
) {
    let tracked: BTreeSet<&str> = PREDICTION_ENTRY_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let untracked: BTreeSet<String> = claims
        .iter()
        .filter(|(_, claim)| scalar_str(claim.get("type")) == Some(ClaimType::Prediction.as_str()))
        .map(|(key, _)| key_string(key))
        .filter(|id| !tracked.contains(id.as_str()))
        .collect();

    if !untracked.is_empty() {
        let ids: Vec<&str> = untracked.iter().map(String::as_str).collect();
        findings.push(Finding::error(
            "PREDICTIONS_MISSING",
            format!(
                "Missing from predictions.md: {}",
                preview_ids(&ids, config.missing_preview_limit)
            ),
        ));
    }

    let unknown: Vec<&str> = tracked
        .iter()
        .copied()
        .filter(|id| !claim_ids.contains(*id))
        .collect();
    if !unknown.is_empty() {
        findings.push(Finding::error(
            "PREDICTIONS_UNKNOWN",
            format!("predictions.md references unknown claims: {}", unknown.join(", ")),
        ));
    }
}

fn load_yaml(path: &Path) -> Result<Value, ValidatorError> {
    let parse_error = |reason: String| ValidatorError::Parse {
        path: PathBuf::from(path),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ValidatorError::Missing(path.to_path_buf()),
        _ => parse_error(e.to_string()),
    })?;

    let doc: Value = serde_yaml::from_str(&text).map_err(|e| parse_error(e.to_string()))?;
    match doc {
        Value::Mapping(_) | Value::Null => Ok(doc),
        _ => Err(parse_error("top level is not a mapping".to_string())),
    }
}

static EMPTY: LazyLock<Mapping> = LazyLock::new(Mapping::new);

/// Named top-level mapping; absent or non-mapping sections read as empty
fn section<'a>(doc: &'a Value, name: &str) -> &'a Mapping {
    doc.get(name).and_then(Value::as_mapping).unwrap_or(&EMPTY)
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => display(Some(other)),
    }
}

fn scalar_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// Render a YAML value the way findings quote it
fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// ID list field; a bare scalar is a one-element list
fn id_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().map(key_string).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_list_shapes() {
        let seq: Value = serde_yaml::from_str("[A-2026-001, B-2026-002]").unwrap();
        assert_eq!(id_list(Some(&seq)), ["A-2026-001", "B-2026-002"]);

        let scalar = Value::String("A-2026-001".to_string());
        assert_eq!(id_list(Some(&scalar)), ["A-2026-001"]);

        assert!(id_list(None).is_empty());
        assert!(id_list(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_display_values() {
        assert_eq!(display(None), "None");
        assert_eq!(display(Some(&Value::Null)), "None");
        let n: Value = serde_yaml::from_str("1.5").unwrap();
        assert_eq!(display(Some(&n)), "1.5");
        assert_eq!(display(Some(&Value::String("[Z]".to_string()))), "[Z]");
    }

    #[test]
    fn test_section_tolerates_missing() {
        let doc: Value = serde_yaml::from_str("claims:\n  A-2026-001: {}\n").unwrap();
        assert_eq!(section(&doc, "claims").len(), 1);
        assert!(section(&doc, "chains").is_empty());
        assert!(section(&Value::Null, "claims").is_empty());
    }
}
