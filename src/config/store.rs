//! Persisted provider settings.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::Provider;
use crate::error::ConfigError;

/// The saved configuration record.
///
/// Stored as `{"provider": "openai", "apiKey": "..."}`. Both fields are
/// optional so a partially written or hand-edited file still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Config {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            api_key: Some(api_key.into()),
        }
    }

    /// Provider and key, when both are present and the key is not blank.
    pub fn credentials(&self) -> Option<(Provider, &str)> {
        let provider = self.provider?;
        let key = self.api_key.as_deref()?.trim();
        (!key.is_empty()).then_some((provider, key))
    }

    /// Load from `path`. A missing or unreadable/corrupt file yields the
    /// empty record.
    pub fn load_from(path: &Path) -> Config {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No config at {}: {}", path.display(), e);
                return Config::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring unreadable config {}: {}", path.display(), e);
            Config::default()
        })
    }

    /// Overwrite `path` with this record, readable by the owner only.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so a crash never leaves a half-written config.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        let write_err = |source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        restrict_permissions(tmp.path()).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
