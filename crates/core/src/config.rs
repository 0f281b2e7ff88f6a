//! Configuration: the persisted config file plus environment overrides.
//!
//! The config file is a small JSON object:
//!
//! ```json
//! { "DATA_SOURCE": "json", "DUPLICATE_POLICY": "reject" }
//! ```
//!
//! Both keys are optional. A missing, empty, or unreadable file means "all
//! defaults" (CSV backend, per-backend duplicate policy).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{CSV_FILE_NAME, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OMDB_URL, JSON_FILE_NAME};
use crate::env_config::parse_with_default;
use crate::error::{CoreError, Result};
use crate::policy::{BackendKind, DuplicatePolicy};

pub const ENV_DATA_SOURCE: &str = "MOVIEDB_DATA_SOURCE";
pub const ENV_DATA_DIR: &str = "MOVIEDB_DATA_DIR";
pub const ENV_DUPLICATE_POLICY: &str = "MOVIEDB_DUPLICATE_POLICY";
pub const ENV_OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const ENV_OMDB_API_URL: &str = "OMDB_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "MOVIEDB_HTTP_TIMEOUT_SECS";

/// On-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "DATA_SOURCE", default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<BackendKind>,
    #[serde(rename = "DUPLICATE_POLICY", default, skip_serializing_if = "Option::is_none")]
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl ConfigFile {
    /// Loads the config file, falling back to defaults when it is absent or invalid.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            },
        };
        if content.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            },
        }
    }

    /// Writes the config file, creating its directory.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| CoreError::ConfigWrite { path: parent.to_path_buf(), source })?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|source| CoreError::ConfigWrite { path: path.to_path_buf(), source })
    }
}

/// Persists the selected data source, keeping the other keys of an existing file.
///
/// # Errors
/// Returns an error if the config file cannot be written.
pub fn save_data_source(path: &Path, source: BackendKind) -> Result<()> {
    let mut config = ConfigFile::load(path);
    config.data_source = Some(source);
    config.save(path)
}

/// Default location of the config file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("moviedb").join("config.json")
}

/// Default directory holding `movies.csv` / `movies.json`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("moviedb")
}

/// Fully resolved runtime configuration, passed explicitly to whatever builds the backend.
#[derive(Clone)]
pub struct AppConfig {
    pub data_source: BackendKind,
    pub data_dir: PathBuf,
    /// Explicit override; `None` keeps the backend's own default.
    pub duplicate_policy: Option<DuplicatePolicy>,
    pub omdb_api_key: Option<String>,
    pub omdb_base_url: String,
    pub http_timeout_secs: u64,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("data_source", &self.data_source)
            .field("data_dir", &self.data_dir)
            .field("duplicate_policy", &self.duplicate_policy)
            .field("omdb_api_key", &self.omdb_api_key.as_ref().map(|_| "***"))
            .field("omdb_base_url", &self.omdb_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Overlays environment values (looked up through `env`) on the config file.
    pub fn resolve(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let data_source = env(ENV_DATA_SOURCE)
            .and_then(|raw| parse_or_warn(ENV_DATA_SOURCE, &raw))
            .or(file.data_source)
            .unwrap_or_default();
        let duplicate_policy = env(ENV_DUPLICATE_POLICY)
            .and_then(|raw| parse_or_warn(ENV_DUPLICATE_POLICY, &raw))
            .or(file.duplicate_policy);
        let data_dir = env(ENV_DATA_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(default_data_dir, PathBuf::from);
        let omdb_api_key = env(ENV_OMDB_API_KEY).filter(|key| !key.trim().is_empty());
        let omdb_base_url = env(ENV_OMDB_API_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OMDB_URL.to_owned());
        let http_timeout_secs = parse_with_default(
            ENV_HTTP_TIMEOUT_SECS,
            env(ENV_HTTP_TIMEOUT_SECS),
            DEFAULT_HTTP_TIMEOUT_SECS,
        );

        Self {
            data_source,
            data_dir,
            duplicate_policy,
            omdb_api_key,
            omdb_base_url,
            http_timeout_secs,
        }
    }

    /// Resolves against the process environment.
    #[must_use]
    pub fn from_env(file: &ConfigFile) -> Self {
        Self::resolve(file, |var| std::env::var(var).ok())
    }

    /// Path of the catalog file for the active data source.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        match self.data_source {
            BackendKind::Csv => self.data_dir.join(CSV_FILE_NAME),
            BackendKind::Json => self.data_dir.join(JSON_FILE_NAME),
        }
    }

    /// The duplicate policy the active backend will apply.
    #[must_use]
    pub fn effective_duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy.unwrap_or_else(|| self.data_source.default_duplicate_policy())
    }
}

fn parse_or_warn<T: std::str::FromStr>(var: &str, raw: &str) -> Option<T>
where
    T::Err: fmt::Display,
{
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(var, value = raw, error = %e, "ignoring invalid env var");
            None
        },
    }
}
