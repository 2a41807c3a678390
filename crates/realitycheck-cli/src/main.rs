//! rc-validate - Integrity checks for Reality Check data and analyses.

use anyhow::Context;
use clap::Parser;
use realitycheck_cli::commands;
use realitycheck_cli::{Cli, Command, Config, Formatter, Verdict};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log to stderr so JSON on stdout stays clean
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match run(cli) {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Verdict> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let verdict = match cli.command {
        Command::Db(args) => commands::execute_db(args, &config, cli.strict, &formatter)
            .context("Database validation failed")?,
        Command::Yaml(args) => commands::execute_yaml(args, &config, cli.strict, &formatter)
            .context("YAML validation failed")?,
        Command::Analysis(args) => commands::execute_analysis(args, cli.strict, &formatter)
            .context("Analysis validation failed")?,
    };

    Ok(verdict)
}
