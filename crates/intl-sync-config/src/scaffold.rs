// crates/intl-sync-config/src/scaffold.rs
// ============================================================================
// Module: Config Scaffold Generation
// Description: Deterministic generator for a starter config file.
// Purpose: Back the `intl-sync generate` command.
// Dependencies: crate::config, serde_json
// ============================================================================

//! ## Overview
//! The scaffold writes a minimal `intl-sync.config.json` with the three
//! required options. Generation refuses to overwrite an existing file so
//! a hand-edited config can never be clobbered by a re-run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Scaffold
// ============================================================================

/// Renders the starter config document.
#[must_use]
pub fn scaffold_json(translations_path: &str, default_locale: &str, locales: &[String]) -> String {
    let document = json!({
        "translationsPath": translations_path,
        "defaultLocale": default_locale,
        "locales": locales,
    });
    let mut rendered = serde_json::to_string_pretty(&document).unwrap_or_default();
    rendered.push('\n');
    rendered
}

/// Writes the starter config to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] when a config is already
/// present, and [`ConfigError::Write`] when the write fails.
pub fn write_scaffold(
    path: &Path,
    translations_path: &str,
    default_locale: &str,
    locales: &[String],
) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    fs::write(path, scaffold_json(translations_path, default_locale, locales)).map_err(|err| {
        ConfigError::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    })
}
