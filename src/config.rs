//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\autosubber\config.toml
//! - macOS: ~/Library/Application Support/autosubber/config.toml
//! - Linux: ~/.config/autosubber/config.toml
//!
//! A torrent client usually runs the hook under its own service account, so
//! credentials may instead come from the environment (`OMDB_API_KEY`,
//! `OPENSUBTITLES_API_KEY`, `OPENSUBTITLES_USERNAME`,
//! `OPENSUBTITLES_PASSWORD`); those override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::LibraryCategory;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials for both providers
    pub credentials: Credentials,

    /// Destination library directories
    pub library: LibraryConfig,

    /// Metadata provider settings
    pub metadata: MetadataConfig,

    /// Subtitle provider settings
    pub subtitles: SubtitleConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// OMDb API key
    pub omdb_api_key: Option<String>,
    /// OpenSubtitles consumer API key
    pub opensubtitles_api_key: Option<String>,
    /// OpenSubtitles account name
    pub opensubtitles_username: Option<String>,
    /// OpenSubtitles account password
    pub opensubtitles_password: Option<String>,
}

/// Where each library category lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub child_movies: PathBuf,
    pub child_series: PathBuf,
    pub adult_movies: PathBuf,
    pub adult_series: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            child_movies: PathBuf::from("/var/lib/plexmediaserver/Movies"),
            child_series: PathBuf::from("/var/lib/plexmediaserver/TV"),
            adult_movies: PathBuf::from("/var/lib/plexmediaserver/adult/Movies"),
            adult_series: PathBuf::from("/var/lib/plexmediaserver/adult/TV"),
        }
    }
}

impl LibraryConfig {
    /// Base directory for a category.
    pub fn dir_for(&self, category: LibraryCategory) -> &Path {
        match category {
            LibraryCategory::ChildMovie => &self.child_movies,
            LibraryCategory::ChildSeries => &self.child_series,
            LibraryCategory::AdultMovie => &self.adult_movies,
            LibraryCategory::AdultSeries => &self.adult_series,
        }
    }
}

/// OMDb settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.omdbapi.com/".to_string(),
            timeout_secs: 30,
        }
    }
}

impl MetadataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// OpenSubtitles settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleConfig {
    /// REST API root
    pub base_url: String,

    /// Language code passed to the search endpoint
    pub language: String,

    /// User-Agent header; the provider rejects requests without one
    pub user_agent: String,

    /// Deadline for the whole login/search/download sequence
    pub timeout_secs: u64,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.opensubtitles.com/api/v1".to_string(),
            language: "en".to_string(),
            user_agent: "AutoSubber v1.0.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SubtitleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Environment variables that override [`Credentials`], paired with the
/// field they fill.
pub const CREDENTIAL_VARS: [&str; 4] = [
    "OMDB_API_KEY",
    "OPENSUBTITLES_API_KEY",
    "OPENSUBTITLES_USERNAME",
    "OPENSUBTITLES_PASSWORD",
];

/// Credentials after presence validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCredentials {
    pub omdb_api_key: String,
    pub opensubtitles_api_key: String,
    pub opensubtitles_username: String,
    pub opensubtitles_password: String,
}

impl Config {
    /// Overlay credentials from a variable lookup (normally `std::env::var`).
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// clobber a key from the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("OMDB_API_KEY") {
            self.credentials.omdb_api_key = Some(v);
        }
        if let Some(v) = non_empty("OPENSUBTITLES_API_KEY") {
            self.credentials.opensubtitles_api_key = Some(v);
        }
        if let Some(v) = non_empty("OPENSUBTITLES_USERNAME") {
            self.credentials.opensubtitles_username = Some(v);
        }
        if let Some(v) = non_empty("OPENSUBTITLES_PASSWORD") {
            self.credentials.opensubtitles_password = Some(v);
        }
    }

    /// Check that every credential is present and non-empty.
    pub fn validate(&self) -> Result<ValidatedCredentials, ConfigError> {
        let creds = &self.credentials;
        let fields = [
            &creds.omdb_api_key,
            &creds.opensubtitles_api_key,
            &creds.opensubtitles_username,
            &creds.opensubtitles_password,
        ];

        let missing: Vec<&'static str> = CREDENTIAL_VARS
            .iter()
            .zip(fields)
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let take = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(ValidatedCredentials {
            omdb_api_key: take(&creds.omdb_api_key),
            opensubtitles_api_key: take(&creds.opensubtitles_api_key),
            opensubtitles_username: take(&creds.opensubtitles_username),
            opensubtitles_password: take(&creds.opensubtitles_password),
        })
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autosubber"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `explicit` or the default location, then apply
/// environment overrides.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - credential validation happens later and
/// is what decides whether the run can go ahead.
pub fn load(explicit: Option<&Path>) -> Config {
    let mut config = match explicit.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => load_file(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    };
    config.apply_env(|name| std::env::var(name).ok());
    config
}

fn load_file(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match read_file(path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Read and parse a config file, surfacing the failure.
pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variables {} must be set", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
