// crates/intl-sync-core/src/runtime/discovery.rs
// ============================================================================
// Module: Missing-Translation Discovery
// Description: Enumerates (file, locale) pairs that need generation.
// Purpose: Turn the on-disk state of a translations root into a task list.
// Dependencies: crate::core, serde_json, walkdir
// ============================================================================

//! ## Overview
//! Discovery enumerates default-locale source files under two naming
//! conventions: a locale subdirectory (`<root>/<default>/*.json`, direct
//! children) and locale-prefixed filenames (`<root>/**/<default>*.json`,
//! recursive). For each source file and target locale, a task is emitted
//! when the translation file is absent or fails the structural parity
//! check. A file matched by both conventions is counted once per locale.
//!
//! A translation file that exists but cannot be read or parsed still
//! yields a task; the resulting task surfaces the store error without
//! aborting the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::diff::keys_match;
use crate::core::task::LocaleFileDescriptor;
use crate::core::task::TranslationTask;
use crate::core::task::normalized_path;
use crate::core::tree::LocaleTree;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Optional restriction of discovery to a set of source paths.
///
/// The automatic gate path scopes discovery to the staged file list; the
/// interactive path runs unscoped.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryScope {
    /// Normalized source paths discovery may consider.
    paths: BTreeSet<PathBuf>,
}

impl DiscoveryScope {
    /// Builds a scope from raw paths, normalizing each entry.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|path| normalized_path(path.as_ref())).collect(),
        }
    }

    /// Returns true when the scope admits `path`.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&normalized_path(path))
    }

    /// Returns true when the scope admits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Discovery failure: the translations root could not be enumerated.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Directory enumeration failed.
    #[error("failed to enumerate {path}: {reason}")]
    Enumerate {
        /// Path that failed to enumerate.
        path: PathBuf,
        /// Underlying failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Enumerates the translation tasks pending for a run.
///
/// An empty result signals that every (file, locale) pair is already
/// structurally synchronized.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when the translations root cannot be walked.
pub fn discover_tasks(
    root: &Path,
    default_locale: &str,
    locales: &[String],
    scope: Option<&DiscoveryScope>,
) -> Result<Vec<TranslationTask>, DiscoveryError> {
    let sources = enumerate_sources(root, default_locale)?;
    debug!(sources = sources.len(), "enumerated default-locale files");

    let mut seen: BTreeSet<(PathBuf, String)> = BTreeSet::new();
    let mut tasks = Vec::new();
    for file in &sources {
        if scope.is_some_and(|scope| !scope.contains(file)) {
            continue;
        }
        // One descriptor per translation unit, shared by every task the
        // unit spawns.
        let descriptor = LocaleFileDescriptor {
            source: file.clone(),
            default_locale: default_locale.to_string(),
            locales: locales.to_vec(),
        };
        for locale in locales {
            if !seen.insert((file.clone(), locale.clone())) {
                continue;
            }
            let task = TranslationTask {
                file: descriptor.clone(),
                locale: locale.clone(),
            };
            if needs_generation(&task) {
                tasks.push(task);
            }
        }
    }
    debug!(tasks = tasks.len(), "discovery complete");
    Ok(tasks)
}

/// Collects default-locale source files under both naming conventions.
fn enumerate_sources(
    root: &Path,
    default_locale: &str,
) -> Result<BTreeSet<PathBuf>, DiscoveryError> {
    let mut sources = BTreeSet::new();

    // Locale-subdirectory convention: <root>/<default>/*.json, direct
    // children only.
    let locale_dir = root.join(default_locale);
    if locale_dir.is_dir() {
        let entries = fs::read_dir(&locale_dir).map_err(|err| DiscoveryError::Enumerate {
            path: locale_dir.clone(),
            reason: err.to_string(),
        })?;
        for entry in entries {
            let entry = entry.map_err(|err| DiscoveryError::Enumerate {
                path: locale_dir.clone(),
                reason: err.to_string(),
            })?;
            let path = entry.path();
            if path.is_file() && has_json_extension(&path) {
                sources.insert(normalized_path(&path));
            }
        }
    }

    // Locale-suffixed convention: <root>/**/<default>*.json, recursive.
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|err| DiscoveryError::Enumerate {
            path: root.to_path_buf(),
            reason: err.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(default_locale) && has_json_extension(path) {
            sources.insert(normalized_path(path));
        }
    }

    Ok(sources)
}

/// Returns true when the path carries a `.json` extension.
fn has_json_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Decides whether a (file, locale) pair needs a generation pass.
fn needs_generation(task: &TranslationTask) -> bool {
    let target = task.target_path();
    if !target.exists() {
        return true;
    }
    let (Some(source), Some(translation)) = (load_tree(&task.file.source), load_tree(&target))
    else {
        // An unreadable file still gets a task; the pipeline reports the
        // store error for this pair without aborting the batch.
        return true;
    };
    !keys_match(&source, &translation)
}

/// Loads a tree for the parity pre-check, tolerating broken files.
fn load_tree(path: &Path) -> Option<LocaleTree> {
    let bytes = fs::read(path).ok()?;
    serde_json::from_slice(&bytes).ok()
}
