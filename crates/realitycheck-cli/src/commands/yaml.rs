//! Yaml command implementation.

use crate::cli::YamlArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use realitycheck_domain::partition_findings;
use realitycheck_validator::validate_yaml;
use std::env;
use tracing::info;

use super::Verdict;

/// Execute the yaml command.
pub fn execute_yaml(
    args: YamlArgs,
    config: &Config,
    strict: bool,
    formatter: &Formatter,
) -> Result<Verdict> {
    let repo_root = match args.repo_root {
        Some(root) => root,
        None => env::current_dir()?,
    };

    let findings = validate_yaml(&repo_root, &config.validation);
    let (errors, warnings) = partition_findings(&findings, strict);
    info!(
        repo_root = %repo_root.display(),
        errors = errors.len(),
        warnings = warnings.len(),
        "YAML validation complete"
    );

    println!("{}", formatter.format_findings(&findings, strict)?);

    Ok(Verdict::from_error_count(errors.len()))
}
