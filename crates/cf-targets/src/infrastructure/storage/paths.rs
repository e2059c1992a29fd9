//! Location of the active cf configuration file.
//!
//! Resolution order:
//!
//! 1. An explicit file path (`--config`, env `CF_TARGETS_CONFIG`).
//! 2. `CF_HOME/.cf/config.json` (`--cf-home`, env `CF_HOME`).  The directory
//!    must already exist.
//! 3. `~/.cf/config.json`, using `HOME` (or `USERPROFILE` on Windows).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory under the cf home that holds the configuration.
pub const CF_DIR_NAME: &str = ".cf";

/// File name of the active configuration.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error type for locating the active configuration.
#[derive(Debug, Error)]
pub enum PathsError {
    /// `CF_HOME` was given but does not name a directory.
    #[error("CF_HOME directory {0} does not exist")]
    MissingCfHome(PathBuf),

    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("could not determine the home directory (set HOME or CF_HOME)")]
    NoHomeDir,
}

/// Returns the path of the active configuration file, consulting the
/// process environment for the home directory fallback.
///
/// # Errors
///
/// See [`resolve_config_path`].
pub fn config_file_path(
    explicit: Option<&Path>,
    cf_home: Option<&Path>,
) -> Result<PathBuf, PathsError> {
    resolve_config_path(explicit, cf_home, home_dir().as_deref())
}

/// Pure resolution used by [`config_file_path`].
///
/// # Errors
///
/// - [`PathsError::MissingCfHome`] if `cf_home` is given but is not a
///   directory.
/// - [`PathsError::NoHomeDir`] if nothing else applies and `home` is `None`.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    cf_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, PathsError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(dir) = cf_home {
        if !dir.is_dir() {
            return Err(PathsError::MissingCfHome(dir.to_path_buf()));
        }
        return Ok(config_under(dir));
    }
    home.map(config_under).ok_or(PathsError::NoHomeDir)
}

fn config_under(home: &Path) -> PathBuf {
    home.join(CF_DIR_NAME).join(CONFIG_FILE_NAME)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE").filter(|h| !h.is_empty()))
        .map(PathBuf::from)
}
