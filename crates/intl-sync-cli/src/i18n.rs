// crates/intl-sync-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for localized output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! A translation tool should speak more than one language itself. All
//! user-facing strings live in a small catalog and are rendered through
//! the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Italian.
    It,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::It => "it",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "it" => Some(Self::It),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::It];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English message catalog.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "intl-sync {version}"),
    (
        "i18n.lang.invalid_env",
        "Invalid value for {env}: {value}. Expected 'en' or 'it'.",
    ),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine translated and may be inaccurate.",
    ),
    ("gate.up_to_date", "Translations are up to date."),
    ("gate.no_tasks", "No locale files need translation."),
    ("gate.tasks_found", "{count} translation task(s) to run."),
    (
        "git.not_a_repository",
        "Not a git repository. intl-sync must run inside one.",
    ),
    ("task.success", "translated {file} for {locale}"),
    ("task.skipped", "{file} is already up to date for {locale}"),
    ("task.failed", "failed to translate {file} for {locale}: {reason}"),
    (
        "run.summary",
        "{succeeded} translated, {skipped} up to date, {failed} failed",
    ),
    ("run.failures", "{failed} translation task(s) failed."),
    (
        "apikey.missing",
        "No API key found. Set {env} or add \"apiKey\" to {file}.",
    ),
    ("restage.failed", "Could not re-stage {path}: {reason}"),
    ("generate.ok", "Wrote {path}. Edit it to match your project."),
    ("hook.installed", "Installed pre-commit hook at {path}."),
    ("hook.uninstalled", "Removed pre-commit hook at {path}."),
    (
        "hook.foreign",
        "Refusing to touch {path}: an unrelated pre-commit hook is installed.",
    ),
    ("hook.missing", "No pre-commit hook is installed at {path}."),
    ("output.stream.stdout", "standard output"),
    ("output.stream.stderr", "standard error"),
    ("output.stream.unknown", "output stream"),
    ("output.write_failed", "failed to write to {stream}: {error}"),
];

/// Italian message catalog.
const CATALOG_IT: &[(&str, &str)] = &[
    ("main.version", "intl-sync {version}"),
    (
        "i18n.lang.invalid_env",
        "Valore non valido per {env}: {value}. Era atteso 'en' o 'it'.",
    ),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: l'output non in inglese è tradotto automaticamente e può essere impreciso.",
    ),
    ("gate.up_to_date", "Le traduzioni sono aggiornate."),
    ("gate.no_tasks", "Nessun file di localizzazione da tradurre."),
    ("gate.tasks_found", "{count} attività di traduzione da eseguire."),
    (
        "git.not_a_repository",
        "Non è un repository git. intl-sync deve essere eseguito al suo interno.",
    ),
    ("task.success", "tradotto {file} per {locale}"),
    ("task.skipped", "{file} è già aggiornato per {locale}"),
    ("task.failed", "traduzione di {file} per {locale} non riuscita: {reason}"),
    (
        "run.summary",
        "{succeeded} tradotti, {skipped} aggiornati, {failed} falliti",
    ),
    ("run.failures", "{failed} attività di traduzione non riuscite."),
    (
        "apikey.missing",
        "Nessuna chiave API trovata. Imposta {env} o aggiungi \"apiKey\" a {file}.",
    ),
    ("restage.failed", "Impossibile riaggiungere {path} all'indice: {reason}"),
    ("generate.ok", "Scritto {path}. Modificalo per adattarlo al progetto."),
    ("hook.installed", "Hook pre-commit installato in {path}."),
    ("hook.uninstalled", "Hook pre-commit rimosso da {path}."),
    (
        "hook.foreign",
        "Rifiuto di toccare {path}: è installato un hook pre-commit estraneo.",
    ),
    ("hook.missing", "Nessun hook pre-commit installato in {path}."),
    ("output.stream.stdout", "standard output"),
    ("output.stream.stderr", "standard error"),
    ("output.stream.unknown", "flusso di output"),
    ("output.write_failed", "scrittura su {stream} non riuscita: {error}"),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_IT_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::It => CATALOG_IT_MAP.get_or_init(|| CATALOG_IT.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================
