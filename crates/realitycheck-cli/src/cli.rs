//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use realitycheck_analysis::Profile;
use std::path::PathBuf;

/// rc-validate - Check Reality Check data and analyses for integrity problems.
#[derive(Debug, Parser)]
#[command(name = "rc-validate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Treat warnings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log validation progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON document
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the record store
    Db(DbArgs),

    /// Validate the legacy YAML registry
    Yaml(YamlArgs),

    /// Validate analysis documents against the Output Contract
    Analysis(AnalysisArgs),
}

/// Arguments for the db command.
#[derive(Debug, Args)]
pub struct DbArgs {
    /// Database path (default: REALITYCHECK_DATA, then project auto-detect)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

/// Arguments for the yaml command.
#[derive(Debug, Args)]
pub struct YamlArgs {
    /// Repository root (default: current directory)
    #[arg(long)]
    pub repo_root: Option<PathBuf>,
}

/// Arguments for the analysis command.
#[derive(Debug, Args)]
pub struct AnalysisArgs {
    /// Analysis file(s) to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Force a specific profile (default: auto-detect)
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Report rigor-v1 findings as errors
    #[arg(long)]
    pub rigor: bool,

    /// Only print files with findings; no summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Analysis profile argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileArg {
    /// Three-stage analysis
    Full,
    /// Summary-only analysis
    Quick,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Full => Profile::Full,
            ProfileArg::Quick => Profile::Quick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_command() {
        let cli = Cli::parse_from(["rc-validate", "db", "--db-path", "data/rc.db"]);
        match cli.command {
            Command::Db(args) => assert_eq!(args.db_path, Some(PathBuf::from("data/rc.db"))),
            _ => panic!("Expected Db command"),
        }
        assert!(!cli.strict);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["rc-validate", "yaml", "--strict", "--format", "json"]);
        assert!(cli.strict);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(matches!(cli.command, Command::Yaml(YamlArgs { repo_root: None })));
    }

    #[test]
    fn test_analysis_command() {
        let cli = Cli::parse_from([
            "rc-validate",
            "analysis",
            "--profile",
            "quick",
            "--rigor",
            "a.md",
            "b.md",
        ]);
        match cli.command {
            Command::Analysis(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.profile, Some(ProfileArg::Quick));
                assert!(args.rigor);
                assert!(!args.quiet);
            }
            _ => panic!("Expected Analysis command"),
        }
    }

    #[test]
    fn test_analysis_requires_files() {
        assert!(Cli::try_parse_from(["rc-validate", "analysis"]).is_err());
    }

    #[test]
    fn test_profile_conversion() {
        let profile: Profile = ProfileArg::Full.into();
        assert_eq!(profile, Profile::Full);
    }
}
