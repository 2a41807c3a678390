//! Command implementations.

pub mod analysis;
pub mod db;
pub mod yaml;

pub use self::analysis::execute_analysis;
pub use self::db::execute_db;
pub use self::yaml::execute_yaml;

use std::process::ExitCode;

/// Outcome of a validation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No errors after promotion
    Pass,
    /// At least one error
    Fail,
}

impl Verdict {
    /// Verdict for a run with `errors` errors.
    pub fn from_error_count(errors: usize) -> Self {
        if errors > 0 {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// Process exit code: 0 on pass, 1 on fail.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Pass => ExitCode::SUCCESS,
            Verdict::Fail => ExitCode::from(1),
        }
    }
}
