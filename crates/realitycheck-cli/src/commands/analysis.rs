//! Analysis command implementation.

use crate::cli::AnalysisArgs;
use crate::error::Result;
use crate::output::Formatter;
use realitycheck_analysis::{validate_file, Profile, ValidationResult};
use std::path::PathBuf;
use tracing::{debug, info};

use super::Verdict;

/// Results for every analysis file named on the command line.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Files that were validated
    pub results: Vec<ValidationResult>,
    /// Files that do not exist; each counts as one error
    pub missing: Vec<PathBuf>,
}

impl AnalysisReport {
    /// Errors across all files, including missing ones.
    pub fn total_errors(&self) -> usize {
        self.missing.len() + self.results.iter().map(|r| r.errors.len()).sum::<usize>()
    }

    /// Warnings across all files.
    pub fn total_warnings(&self) -> usize {
        self.results.iter().map(|r| r.warnings.len()).sum()
    }

    /// `FAIL` if any error was found, else `OK`.
    pub fn status(&self) -> &'static str {
        match self.verdict() {
            Verdict::Fail => "FAIL",
            Verdict::Pass => "OK",
        }
    }

    /// Overall verdict.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_error_count(self.total_errors())
    }
}

/// Validate each file; with `strict`, warnings are promoted per file.
pub fn run_analysis(
    files: &[PathBuf],
    profile: Option<Profile>,
    rigor: bool,
    strict: bool,
) -> AnalysisReport {
    let mut report = AnalysisReport::default();

    for path in files {
        if !path.exists() {
            report.missing.push(path.clone());
            continue;
        }

        debug!(path = %path.display(), "Validating analysis file");
        let result = validate_file(path, profile, rigor);
        report.results.push(if strict { result.strict() } else { result });
    }

    report
}

/// Execute the analysis command.
pub fn execute_analysis(args: AnalysisArgs, strict: bool, formatter: &Formatter) -> Result<Verdict> {
    let report = run_analysis(&args.files, args.profile.map(Into::into), args.rigor, strict);

    for path in &report.missing {
        eprintln!("Error: File not found: {}", path.display());
    }
    info!(
        files = report.results.len(),
        errors = report.total_errors(),
        warnings = report.total_warnings(),
        "Analysis validation complete"
    );

    println!("{}", formatter.format_analysis(&report, args.quiet)?);

    Ok(report.verdict())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_counts_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_analysis(&[dir.path().join("absent.md")], None, false, false);
        assert!(report.results.is_empty());
        assert_eq!(report.total_errors(), 1);
        assert_eq!(report.status(), "FAIL");
    }

    #[test]
    fn test_strict_promotes_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = dir.path().join("analysis");
        fs::create_dir_all(&analysis).unwrap();
        let path = analysis.join("stub.md");
        fs::write(&path, "**Analysis Depth**: quick\n").unwrap();

        let relaxed = run_analysis(&[path.clone()], None, false, false);
        assert!(relaxed.total_warnings() > 0);

        let strict = run_analysis(&[path], None, false, true);
        assert_eq!(strict.total_warnings(), 0);
        assert_eq!(
            strict.total_errors(),
            relaxed.total_errors() + relaxed.total_warnings()
        );
    }

    #[test]
    fn test_profile_override_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = dir.path().join("analysis");
        fs::create_dir_all(&analysis).unwrap();
        let path = analysis.join("stub.md");
        fs::write(&path, "**Analysis Depth**: quick\n").unwrap();

        let report = run_analysis(&[path], Some(Profile::Full), false, false);
        let result = &report.results[0];
        assert_eq!(result.profile, Some(Profile::Full));
        assert!(result.warnings.iter().any(|w| w.code() == "PROFILE_MISMATCH"));
    }
}
