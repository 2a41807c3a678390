//! Db command implementation.

use crate::cli::DbArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use realitycheck_domain::{partition_findings, Finding};
use realitycheck_validator::validate_db;
use std::path::PathBuf;
use tracing::info;

use super::Verdict;

/// Validate the record store chosen by `--db-path`, the config file, or location resolution.
pub fn run_db(args: &DbArgs, config: &Config) -> Vec<Finding> {
    let db_path: Option<PathBuf> = args.db_path.clone().or_else(|| config.db_path.clone());
    validate_db(db_path.as_deref(), &config.validation)
}

/// Execute the db command.
pub fn execute_db(
    args: DbArgs,
    config: &Config,
    strict: bool,
    formatter: &Formatter,
) -> Result<Verdict> {
    let findings = run_db(&args, config);
    let (errors, warnings) = partition_findings(&findings, strict);
    info!(errors = errors.len(), warnings = warnings.len(), "Database validation complete");

    println!("{}", formatter.format_findings(&findings, strict)?);

    Ok(Verdict::from_error_count(errors.len()))
}
