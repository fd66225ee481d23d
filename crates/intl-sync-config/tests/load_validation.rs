// crates/intl-sync-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Loading, defaults, limits, and scaffold behavior.
// Purpose: Ensure configuration fails closed and defaults deterministically.
// ============================================================================

//! ## Overview
//! Covers the fatal configuration error classes (missing file, oversized
//! file, broken JSON, failed presence checks), the serde defaults for the
//! provider options, and the scaffold's refusal to overwrite.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::PathBuf;

use intl_sync_config::ConfigError;
use intl_sync_config::DEFAULT_API_BASE;
use intl_sync_config::DEFAULT_MODEL;
use intl_sync_config::MAX_CONFIG_FILE_SIZE;
use intl_sync_config::load;
use intl_sync_config::scaffold_json;
use intl_sync_config::write_scaffold;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Writes a config fixture and returns its path.
fn config_path(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("intl-sync.config.json");
    fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Tests that a missing config is fatal and names the generate command.
#[test]
fn missing_config_is_a_fatal_error_with_a_hint() {
    let dir = TempDir::new().unwrap();
    let error = load(Some(&dir.path().join("intl-sync.config.json"))).unwrap_err();
    assert!(matches!(error, ConfigError::Missing { .. }));
    assert!(error.to_string().contains("intl-sync generate"));
}

/// Tests the serde defaults for the provider options.
#[test]
fn minimal_config_applies_provider_defaults() {
    let dir = TempDir::new().unwrap();
    let path = config_path(
        &dir,
        r#"{ "translationsPath": "./src/locales", "defaultLocale": "en-US", "locales": ["it-IT"] }"#,
    );
    let config = load(Some(&path)).unwrap();
    assert_eq!(config.default_locale, "en-US");
    assert_eq!(config.locales, vec!["it-IT".to_string()]);
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert!(config.api_key.is_none());
}

/// Tests that malformed JSON is a parse error.
#[test]
fn broken_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = config_path(&dir, "{ nope");
    assert!(matches!(load(Some(&path)).unwrap_err(), ConfigError::Parse { .. }));
}

/// Tests that the size limit fails closed before parsing.
#[test]
fn oversized_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut body = String::from("{ \"translationsPath\": \"./locales\", \"padding\": \"");
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The configured limit is far below usize::MAX."
    )]
    body.push_str(&"x".repeat(MAX_CONFIG_FILE_SIZE as usize));
    body.push_str("\" }");
    let path = config_path(&dir, &body);
    assert!(matches!(load(Some(&path)).unwrap_err(), ConfigError::TooLarge { .. }));
}

/// Tests the defaultLocale presence check.
#[test]
fn empty_default_locale_fails_the_presence_check() {
    let dir = TempDir::new().unwrap();
    let path =
        config_path(&dir, r#"{ "translationsPath": "./locales", "defaultLocale": "  " }"#);
    assert!(matches!(load(Some(&path)).unwrap_err(), ConfigError::Invalid { .. }));
}

/// Tests the locales entry presence check.
#[test]
fn empty_locale_entry_fails_the_presence_check() {
    let dir = TempDir::new().unwrap();
    let path = config_path(
        &dir,
        r#"{ "translationsPath": "./locales", "defaultLocale": "en-US", "locales": [""] }"#,
    );
    assert!(matches!(load(Some(&path)).unwrap_err(), ConfigError::Invalid { .. }));
}

// ============================================================================
// SECTION: Scaffold
// ============================================================================

/// Tests the scaffold document shape.
#[test]
fn scaffold_renders_the_recognized_options() {
    let rendered = scaffold_json("./src/locales", "en-US", &["it-IT".to_string()]);
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["translationsPath"], "./src/locales");
    assert_eq!(parsed["defaultLocale"], "en-US");
    assert_eq!(parsed["locales"][0], "it-IT");
    assert!(rendered.ends_with('\n'));
}

/// Tests that generation never clobbers an existing config.
#[test]
fn scaffold_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = config_path(&dir, "{}");
    let error = write_scaffold(&path, "./locales", "en-US", &[]).unwrap_err();
    assert!(matches!(error, ConfigError::AlreadyExists { .. }));
}

/// Tests that a scaffolded config passes a subsequent load.
#[test]
fn scaffold_written_file_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intl-sync.config.json");
    write_scaffold(&path, "./src/locales", "en-US", &["fr-FR".to_string()]).unwrap();
    let config = load(Some(&path)).unwrap();
    assert_eq!(config.translations_path, PathBuf::from("./src/locales"));
    assert_eq!(config.locales, vec!["fr-FR".to_string()]);
}
