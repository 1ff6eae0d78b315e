//! Discovery and management of the `.cqql/` directory.
//!
//! The `.cqql/` directory holds a project's configuration. It is found by
//! walking up from the working directory, or named directly with the
//! `CQQL_DIR` environment variable.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the CQQL metadata directory.
pub const CONFIG_DIR_NAME: &str = ".cqql";

/// The environment variable that can override the directory.
pub const CONFIG_DIR_ENV: &str = "CQQL_DIR";

/// Walk up the directory tree from `start` looking for a `.cqql/` directory.
///
/// The `CQQL_DIR` environment variable is checked first. Returns `None` if
/// the filesystem root is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use cqql_config::config_dir::find_config_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_config_dir(Path::new(".")) {
///     println!("Found config dir at {}", dir.display());
/// }
/// ```
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_config_dir`], but a missing directory is an error.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigDirNotFound`] if no `.cqql/` directory is
/// found.
pub fn find_config_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_config_dir(start).ok_or(ConfigError::ConfigDirNotFound)
}

/// Ensure a `.cqql/` directory exists at the given path.
///
/// If `path` itself is not called `.cqql`, a `.cqql/` subdirectory is
/// created under it.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_config_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(CONFIG_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(CONFIG_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
