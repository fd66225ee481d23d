// crates/intl-sync-config/src/config.rs
// ============================================================================
// Module: Intl Sync Configuration
// Description: Configuration loading and validation for Intl Sync.
// Purpose: Provide fail-closed config parsing with presence checks.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Configuration is loaded from `intl-sync.config.json` in the working
//! directory (or an explicit path). Validation is limited to presence
//! checks; the file's shape beyond the recognized options is not policed.
//! The provider API key can always be overridden from the environment so
//! credentials never have to live in the repository.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const CONFIG_FILE_NAME: &str = "intl-sync.config.json";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;
/// Primary environment variable consulted for the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Legacy environment variable consulted for the provider API key.
pub const API_KEY_ENV_FALLBACK: &str = "OPENAI_KEY";
/// Default chat model when the config does not select one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default API base when the config does not select one.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// The persisted Intl Sync configuration record.
///
/// # Invariants
/// - Loaded once per run; treated as read-only afterwards.
/// - `default_locale` and `translations_path` are always non-empty after
///   a successful [`load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Root directory holding the locale files.
    pub translations_path: PathBuf,
    /// Source-of-truth locale code.
    pub default_locale: String,
    /// Target locale codes to keep in sync.
    #[serde(default)]
    pub locales: Vec<String>,
    /// Provider API key; the environment takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat model used for generation.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Serde default for [`SyncConfig::model`].
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Serde default for [`SyncConfig::api_base`].
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl SyncConfig {
    /// Resolves the provider API key.
    ///
    /// Precedence: `OPENAI_API_KEY`, then `OPENAI_KEY`, then the config
    /// file entry. Empty values are treated as unset.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        for var in [API_KEY_ENV, API_KEY_ENV_FALLBACK] {
            if let Ok(value) = env::var(var)
                && !value.trim().is_empty()
            {
                return Some(value);
            }
        }
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }

    /// Returns the scope directory the staged-change gate watches.
    ///
    /// This is the default-locale subtree when it exists on disk, and the
    /// translations root otherwise.
    #[must_use]
    pub fn gate_scope(&self) -> PathBuf {
        let locale_dir = self.translations_path.join(&self.default_locale);
        if locale_dir.is_dir() {
            locale_dir
        } else {
            self.translations_path.clone()
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failure classes. All of these abort the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found.
    #[error("{path} not found; run `intl-sync generate` to create one")]
    Missing {
        /// Path that was probed.
        path: PathBuf,
    },
    /// The configuration file exceeds the size limit.
    #[error("refusing to read {path}: {size} bytes exceeds limit {limit}")]
    TooLarge {
        /// Path that was rejected.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Maximum size in bytes.
        limit: u64,
    },
    /// The configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure description.
        reason: String,
    },
    /// The configuration file is not valid JSON for the config model.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parser failure description.
        reason: String,
    },
    /// A required option is missing or empty.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Which presence check failed.
        reason: String,
    },
    /// Refusing to overwrite an existing configuration file.
    #[error("{path} already exists; edit it manually instead")]
    AlreadyExists {
        /// Path of the existing file.
        path: PathBuf,
    },
    /// The scaffold could not be written.
    #[error("failed to write {path}: {reason}")]
    Write {
        /// Path that failed to persist.
        path: PathBuf,
        /// Underlying I/O failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and validates the configuration.
///
/// When `path` is `None`, `intl-sync.config.json` in the working
/// directory is used.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is missing, oversized,
/// unreadable, unparseable, or fails a presence check.
pub fn load(path: Option<&Path>) -> Result<SyncConfig, ConfigError> {
    let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf);
    let metadata = fs::metadata(&path).map_err(|_| ConfigError::Missing {
        path: path.clone(),
    })?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::TooLarge {
            path,
            size: metadata.len(),
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }
    let bytes = fs::read(&path).map_err(|err| ConfigError::Read {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let config: SyncConfig = serde_json::from_slice(&bytes).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Presence checks for the recognized options.
fn validate(config: &SyncConfig) -> Result<(), ConfigError> {
    if config.translations_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "translationsPath must not be empty".to_string(),
        });
    }
    if config.default_locale.trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "defaultLocale must not be empty".to_string(),
        });
    }
    if config.locales.iter().any(|locale| locale.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            reason: "locales must not contain empty entries".to_string(),
        });
    }
    Ok(())
}
