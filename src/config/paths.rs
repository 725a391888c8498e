use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable overriding the config directory.
pub const HOME_ENV_VAR: &str = "AUTOPUSH_HOME";

const CONFIG_FILE: &str = "config.json";
const WELCOME_MARKER: &str = ".welcomed";

/// Locations of the files autopush keeps per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub dir: PathBuf,
    pub config: PathBuf,
    pub welcome_marker: PathBuf,
}

impl Paths {
    /// Paths rooted at an explicit directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config: dir.join(CONFIG_FILE),
            welcome_marker: dir.join(WELCOME_MARKER),
            dir,
        }
    }
}

/// `$AUTOPUSH_HOME`, or `~/.autopush`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    match env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::home_dir()
            .map(|home| home.join(".autopush"))
            .ok_or(ConfigError::NoHomeDir),
    }
}

pub fn paths() -> Result<Paths, ConfigError> {
    Ok(Paths::in_dir(config_dir()?))
}
