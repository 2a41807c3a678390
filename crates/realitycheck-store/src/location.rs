//! Store location resolution
//!
//! Order: explicit path, `REALITYCHECK_DATA`, `data/realitycheck.db` under
//! the working directory, then the project root found by walking up to a
//! `.realitycheck.toml` marker.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming the store path
pub const DATA_ENV: &str = "REALITYCHECK_DATA";

/// Default store path, relative to the working directory or project root
pub const DEFAULT_DB_PATH: &str = "data/realitycheck.db";

/// File marking the root of a Reality Check data project
pub const PROJECT_MARKER: &str = ".realitycheck.toml";

/// Where a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOrigin {
    /// Passed by the caller
    Explicit,
    /// Read from `REALITYCHECK_DATA`
    Environment,
    /// `data/realitycheck.db` under the working directory
    WorkingDirectory,
    /// Found under an auto-detected project root
    Project,
}

impl fmt::Display for LocationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationOrigin::Explicit => "explicit path",
            LocationOrigin::Environment => DATA_ENV,
            LocationOrigin::WorkingDirectory => "working directory",
            LocationOrigin::Project => "project root",
        };
        f.write_str(s)
    }
}

/// A resolved store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    /// Path of the store file
    pub path: PathBuf,
    /// How it was found
    pub origin: LocationOrigin,
}

/// Walk up from `start` to the first directory holding the project marker
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}

/// Resolve a store location from explicit inputs
///
/// Explicit and environment paths are returned as given, even when nothing
/// exists there yet; opening them reports the problem. The two fallbacks
/// only apply when the file exists.
pub fn resolve_location(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    cwd: &Path,
) -> Option<StoreLocation> {
    if let Some(path) = explicit {
        return Some(StoreLocation {
            path: path.to_path_buf(),
            origin: LocationOrigin::Explicit,
        });
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(StoreLocation {
            path: PathBuf::from(value),
            origin: LocationOrigin::Environment,
        });
    }

    let local = cwd.join(DEFAULT_DB_PATH);
    if local.exists() {
        return Some(StoreLocation {
            path: local,
            origin: LocationOrigin::WorkingDirectory,
        });
    }

    let root = find_project_root(cwd)?;
    let detected = root.join(DEFAULT_DB_PATH);
    if detected.exists() {
        return Some(StoreLocation {
            path: detected,
            origin: LocationOrigin::Project,
        });
    }

    None
}

/// Resolve against the process environment and working directory
pub fn resolve_from_env(explicit: Option<&Path>) -> Option<StoreLocation> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_location(explicit, env::var_os(DATA_ENV), &cwd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_db(root: &Path) -> PathBuf {
        let path = root.join(DEFAULT_DB_PATH);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_explicit_wins() {
        let dir = TempDir::new().unwrap();
        touch_db(dir.path());
        let explicit = dir.path().join("other.db");

        let loc = resolve_location(Some(&explicit), Some("env.db".into()), dir.path()).unwrap();
        assert_eq!(loc.path, explicit);
        assert_eq!(loc.origin, LocationOrigin::Explicit);
    }

    #[test]
    fn test_env_before_defaults() {
        let dir = TempDir::new().unwrap();
        touch_db(dir.path());

        let loc = resolve_location(None, Some("/srv/rc.db".into()), dir.path()).unwrap();
        assert_eq!(loc.path, PathBuf::from("/srv/rc.db"));
        assert_eq!(loc.origin, LocationOrigin::Environment);
    }

    #[test]
    fn test_empty_env_ignored() {
        let dir = TempDir::new().unwrap();
        let expected = touch_db(dir.path());

        let loc = resolve_location(None, Some("".into()), dir.path()).unwrap();
        assert_eq!(loc.path, expected);
        assert_eq!(loc.origin, LocationOrigin::WorkingDirectory);
    }

    #[test]
    fn test_project_autodetect() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_MARKER), "").unwrap();
        let expected = touch_db(dir.path());
        let nested = dir.path().join("analysis").join("sources");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).as_deref(), Some(dir.path()));
        let loc = resolve_location(None, None, &nested).unwrap();
        assert_eq!(loc.path, expected);
        assert_eq!(loc.origin, LocationOrigin::Project);
    }

    #[test]
    fn test_nothing_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_MARKER), "").unwrap();

        assert!(resolve_location(None, None, dir.path()).is_none());
    }
}
