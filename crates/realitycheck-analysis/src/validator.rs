//! Output Contract validation for a single analysis document

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use realitycheck_domain::{Category, Finding};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::profile::Profile;
use crate::rigor::check_rigor;

/// Path fragments that mark the framework checkout rather than a data repository
const FRAMEWORK_INDICATORS: [&str; 4] = ["scripts/", "tests/", "integrations/", "methodology/"];

static ANY_CLAIM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-\d{4}-\d{3}").unwrap());

const PLACEHOLDER_ID: &str = "DOMAIN-YYYY-NNN";

/// Findings for one analysis document
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Document path, as given
    pub path: PathBuf,
    /// Profile the document was checked against; `None` if it was never read
    pub profile: Option<Profile>,
    /// ERROR findings
    pub errors: Vec<Finding>,
    /// WARN findings
    pub warnings: Vec<Finding>,
}

impl ValidationResult {
    /// Profile name for display (`unknown` when the file could not be read)
    pub fn profile_name(&self) -> &'static str {
        self.profile.map_or("unknown", |p| p.as_str())
    }

    /// Whether no errors were found
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Promote every warning to an error
    pub fn strict(mut self) -> Self {
        self.errors
            .extend(self.warnings.drain(..).map(|w| w.promoted()));
        self
    }
}

/// Read and validate an analysis document
///
/// An unreadable file yields a single `FILE_UNREADABLE` error and an
/// `unknown` profile.
pub fn validate_file(path: &Path, profile: Option<Profile>, rigor: bool) -> ValidationResult {
    let content = match read_document(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read analysis document");
            return ValidationResult {
                path: path.to_path_buf(),
                profile: None,
                errors: vec![Finding::error("FILE_UNREADABLE", e.to_string())],
                warnings: Vec::new(),
            };
        }
    };

    let mut result = validate_content(path, &content, profile, rigor);

    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if let Some(finding) = check_framework_path(&resolved) {
        result.warnings.insert(0, finding);
    }

    result
}

fn read_document(path: &Path) -> Result<String, AnalysisError> {
    fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate document text already in memory
///
/// An explicit `profile` overrides the detected one (with a
/// `PROFILE_MISMATCH` warning when they differ). With `rigor`, the rigor-v1
/// findings are reported as errors.
pub fn validate_content(
    path: &Path,
    content: &str,
    profile: Option<Profile>,
    rigor: bool,
) -> ValidationResult {
    let detected = Profile::detect(content);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Some(specified) = profile.filter(|p| *p != detected) {
        warnings.push(Finding::warn(
            "PROFILE_MISMATCH",
            format!("Specified profile '{specified}' differs from detected '{detected}'"),
        ));
    }
    let active = profile.unwrap_or(detected);

    debug!(path = %path.display(), profile = %active, "Validating analysis document");

    check_structure(content, active, &mut errors);
    check_claim_ids(content, &mut warnings);

    if active == Profile::Full {
        let findings = check_rigor(content);
        debug!(count = findings.len(), "rigor-v1 findings");
        if rigor {
            errors.extend(findings.iter().map(Finding::promoted));
        } else {
            warnings.extend(findings);
        }
    }

    ValidationResult {
        path: path.to_path_buf(),
        profile: Some(active),
        errors,
        warnings,
    }
}

fn check_structure(content: &str, profile: Profile, errors: &mut Vec<Finding>) {
    let requirements = profile.requirements();
    let lowered = content.to_lowercase();

    for section in requirements.sections {
        if !lowered.contains(&section.to_lowercase()) {
            errors.push(Finding::error(
                "SECTION_MISSING",
                format!("Missing section: {section}"),
            ));
        }
    }

    for table in &requirements.tables {
        if !table.regex.is_match(content) {
            errors.push(Finding::error(
                "TABLE_MISSING",
                format!("Missing or malformed: {}", table.name),
            ));
        }
    }

    for element in &requirements.elements {
        if !element.regex.is_match(content) {
            errors.push(Finding::error(
                "ELEMENT_MISSING",
                format!("Missing: {}", element.name),
            ));
        }
    }
}

fn check_claim_ids(content: &str, warnings: &mut Vec<Finding>) {
    if !ANY_CLAIM_ID_RE.is_match(content) {
        warnings.push(Finding::warn(
            "CLAIM_IDS_ABSENT",
            "No claim IDs found matching DOMAIN-YYYY-NNN format",
        ));
    }

    if content.contains(PLACEHOLDER_ID) {
        warnings.push(Finding::warn(
            "CLAIM_ID_PLACEHOLDER",
            format!("Contains placeholder claim ID ({PLACEHOLDER_ID}) - replace with actual ID"),
        ));
    }
}

fn check_framework_path(resolved: &Path) -> Option<Finding> {
    let path = resolved.to_string_lossy();
    if path.contains("/analysis/") {
        return None;
    }

    FRAMEWORK_INDICATORS
        .iter()
        .find(|indicator| path.contains(&format!("/{indicator}")))
        .map(|indicator| {
            Finding::warn(
                "FRAMEWORK_PATH",
                format!(
                    "Path may be in framework repo (contains '{indicator}'). \
                     Analysis files should be in the DATA repository."
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_presence() {
        let mut warnings = Vec::new();
        check_claim_ids("no ids here", &mut warnings);
        assert_eq!(warnings[0].code(), "CLAIM_IDS_ABSENT");

        let mut warnings = Vec::new();
        check_claim_ids("| DOMAIN-YYYY-NNN |", &mut warnings);
        let codes: Vec<&str> = warnings.iter().map(Finding::code).collect();
        assert_eq!(codes, ["CLAIM_IDS_ABSENT", "CLAIM_ID_PLACEHOLDER"]);

        let mut warnings = Vec::new();
        check_claim_ids("see [TECH-2026-001](x.md)", &mut warnings);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_framework_path() {
        let finding = check_framework_path(Path::new("/work/realitycheck/scripts/notes.md")).unwrap();
        assert_eq!(finding.code(), "FRAMEWORK_PATH");
        assert!(finding.message().contains("'scripts/'"));

        assert!(check_framework_path(Path::new("/work/data/tests/analysis/sources/a.md")).is_none());
        assert!(check_framework_path(Path::new("/work/data/sources/a.md")).is_none());
    }

    #[test]
    fn test_profile_mismatch_honors_override() {
        let result = validate_content(Path::new("a.md"), "**Analysis Depth**: quick", Some(Profile::Full), false);
        assert_eq!(result.profile, Some(Profile::Full));
        assert_eq!(result.warnings[0].code(), "PROFILE_MISMATCH");
        assert_eq!(
            result.warnings[0].message(),
            "Specified profile 'full' differs from detected 'quick'"
        );
    }

    #[test]
    fn test_quick_profile_skips_rigor() {
        let result = validate_content(Path::new("a.md"), "**Analysis Depth**: quick", None, true);
        assert_eq!(result.profile, Some(Profile::Quick));
        assert!(result
            .errors
            .iter()
            .chain(&result.warnings)
            .all(|f| f.category() == Category::General));
    }

    #[test]
    fn test_rigor_flag_promotes_rigor_findings_only() {
        let result = validate_content(Path::new("a.md"), "empty", None, true);
        assert!(result
            .errors
            .iter()
            .any(|f| f.code() == "RIGOR_SECTION_MISSING" && f.is_error()));
        assert!(result.warnings.iter().all(|f| f.category() == Category::General));
        assert!(result.warnings.iter().any(|f| f.code() == "CLAIM_IDS_ABSENT"));
    }

    #[test]
    fn test_strict_promotes_everything() {
        let result = validate_content(Path::new("a.md"), "empty", None, false).strict();
        assert!(result.warnings.is_empty());
        assert!(result.errors.iter().all(Finding::is_error));
        assert!(result.errors.iter().any(|f| f.code() == "CLAIM_IDS_ABSENT"));
        assert!(!result.is_ok());
    }
}
