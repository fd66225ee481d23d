// crates/intl-sync-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: intl-sync-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the intl-sync CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](intl_sync_cli::t) macro formats placeholders correctly.
//!
//! Catalog completeness across locales is covered next to the catalogs
//! themselves, where they are visible.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use intl_sync_cli::i18n::Locale;
use intl_sync_cli::i18n::MessageArg;
use intl_sync_cli::i18n::SUPPORTED_LOCALES;
use intl_sync_cli::i18n::translate;
use intl_sync_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("path", "src/locales/it-IT/common.json");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "src/locales/it-IT/common.json");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![
        MessageArg::new("file", "common.json"),
        MessageArg::new("locale", "it-IT"),
    ];
    let result = translate("task.success", args);
    assert_eq!(result, "translated common.json for it-IT");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms the t! macro formats named arguments.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("main.version", version = "0.1.0");
    assert!(rendered.contains("intl-sync"));
    assert!(rendered.contains("0.1.0"));
}

/// Confirms locale parsing tolerates region tags and casing.
#[test]
fn locale_parse_tolerates_region_tags() {
    assert_eq!(Locale::parse("IT_it"), Some(Locale::It));
    assert_eq!(Locale::parse("en-GB"), Some(Locale::En));
    assert_eq!(Locale::parse("de"), None);
    assert_eq!(Locale::parse("  "), None);
}

/// Confirms the supported locale list stays in sync with the parser.
#[test]
fn supported_locales_round_trip_through_parse() {
    for locale in SUPPORTED_LOCALES {
        assert_eq!(Locale::parse(locale.as_str()), Some(*locale));
    }
}
