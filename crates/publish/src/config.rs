//! Publish configuration.
//!
//! The defaults are the fixed publishing target. An optional TOML file can
//! override individual fields:
//! - Linux/macOS: `~/.config/msi-relay/config.toml`
//! - Windows: `%APPDATA%/msi-relay/config.toml`

use std::path::{Path, PathBuf};

use serde::Deserialize;

use msi_relay_forge::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL};

use crate::error::ConfigError;

pub const DEFAULT_REPO: &str = "TG-orlando/activtrak-deployment";
pub const DEFAULT_RELEASE_TAG: &str = "v2.0.0";
pub const DEFAULT_TARGET_FILENAME: &str = "ActivTrak-Account-680398.msi";
pub const DEFAULT_FILE_PATTERN: &str = "ATAcct680398*.msi";
pub const DEFAULT_CREDENTIAL_VAR: &str = "GITHUB_TOKEN";

/// Where the installer comes from and where it is republished.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Repository in `owner/name` form.
    pub repo: String,

    /// Tag of the existing release that holds the asset.
    pub release_tag: String,

    /// Constant asset name behind the stable download URL.
    pub target_filename: String,

    /// Directory scanned for downloaded installers.
    pub download_dir: PathBuf,

    /// Glob matched against file names in `download_dir`.
    pub file_pattern: String,

    /// Environment variable holding the API token.
    pub credential_var: String,

    pub api_base_url: String,
    pub upload_base_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.into(),
            release_tag: DEFAULT_RELEASE_TAG.into(),
            target_filename: DEFAULT_TARGET_FILENAME.into(),
            download_dir: msi_relay_artifact::default_download_dir(),
            file_pattern: DEFAULT_FILE_PATTERN.into(),
            credential_var: DEFAULT_CREDENTIAL_VAR.into(),
            api_base_url: DEFAULT_API_URL.into(),
            upload_base_url: DEFAULT_UPLOAD_URL.into(),
        }
    }
}

impl PublishConfig {
    /// Loads the configuration file, or the defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`, falling back to the defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: PublishConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), repo = %config.repo, "configuration loaded");
        Ok(config)
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("msi-relay").join("config.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
            .map(|base| base.join("msi-relay").join("config.toml"))
    }
}
