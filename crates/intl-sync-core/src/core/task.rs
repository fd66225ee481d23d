// crates/intl-sync-core/src/core/task.rs
// ============================================================================
// Module: Translation Tasks and Settlement
// Description: Per-(file, locale) work units and their aggregate results.
// Purpose: Give discovery, the orchestrator, and the CLI a shared vocabulary.
// Dependencies: crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! A [`TranslationTask`] is one unit of work: translate a single
//! default-locale file into a single target locale. Tasks are constructed
//! per run by discovery, consumed by the orchestrator, and settle into a
//! [`TaskReport`]. The [`BatchReport`] aggregates every settlement; one
//! failed task never hides or aborts the others.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::interfaces::ProviderError;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Identifies one logical translation unit for a run.
///
/// Built by discovery from the run configuration, one per enumerated
/// default-locale file; every task derived from the file shares it.
///
/// # Invariants
/// - Immutable for the duration of a run.
/// - `locales` holds target locale codes; `default_locale` is the
///   source-of-truth locale whose file `source` points at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocaleFileDescriptor {
    /// Path to the default-locale JSON file.
    pub source: PathBuf,
    /// Source-of-truth locale code.
    pub default_locale: String,
    /// Target locale codes configured for the project.
    pub locales: Vec<String>,
}

/// One unit of work: translate `file` into `locale`.
///
/// # Invariants
/// - `locale` is one of `file.locales`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TranslationTask {
    /// The translation unit this task belongs to.
    pub file: LocaleFileDescriptor,
    /// Target locale code.
    pub locale: String,
}

impl TranslationTask {
    /// Returns the locale-substituted path of the translation file.
    ///
    /// The first occurrence of the default locale code in the source path
    /// is replaced with the target locale, covering both the
    /// locale-subdirectory and the locale-suffixed naming conventions.
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        let source = self.file.source.to_string_lossy();
        PathBuf::from(source.replacen(&self.file.default_locale, &self.locale, 1))
    }

    /// Returns the source file name for task-level reporting.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file
            .source
            .file_name()
            .map_or_else(|| self.file.source.to_string_lossy().into_owned(), |name| {
                name.to_string_lossy().into_owned()
            })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A task-local failure. Confined to the owning task by the orchestrator.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Loading or persisting a tree failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The translation provider call failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// The merged tree failed the parity acceptance check.
    #[error("the generated translation for {file} does not match the source key set")]
    Acceptance {
        /// Source file whose generated translation was rejected.
        file: PathBuf,
    },
    /// The task handle settled abnormally (aborted or panicked).
    #[error("task settled abnormally: {reason}")]
    Abnormal {
        /// Join failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Settlement
// ============================================================================

/// Terminal state of one task.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The translation file was generated and persisted.
    Success,
    /// The pair was already in sync; no provider call was made.
    Skipped,
    /// The task failed; other tasks are unaffected.
    Failed(TaskError),
}

/// One settled task together with its outcome.
#[derive(Debug)]
pub struct TaskReport {
    /// The task that settled.
    pub task: TranslationTask,
    /// How it settled.
    pub outcome: TaskOutcome,
}

/// Aggregate settlement of a whole batch.
///
/// # Invariants
/// - Produced only once every task has settled.
/// - Holds exactly one report per submitted task.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-task settlements, in settlement order.
    pub reports: Vec<TaskReport>,
}

impl BatchReport {
    /// Counts tasks that persisted a translation.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|report| matches!(report.outcome, TaskOutcome::Success)).count()
    }

    /// Counts tasks skipped as already in sync.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|report| matches!(report.outcome, TaskOutcome::Skipped)).count()
    }

    /// Counts failed tasks.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome, TaskOutcome::Failed(_)))
            .count()
    }

    /// Returns true when no task failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Returns the successfully written translation paths.
    #[must_use]
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome, TaskOutcome::Success))
            .map(|report| report.task.target_path())
            .collect()
    }
}

/// Normalizes a path for (file, locale) identity comparisons.
///
/// Strips a leading `./` component so the same file reached through both
/// naming conventions or through git output de-duplicates correctly.
#[must_use]
pub fn normalized_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::panic,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use std::path::PathBuf;

    use super::LocaleFileDescriptor;
    use super::TranslationTask;
    use super::normalized_path;

    /// Builds a task over an en-US descriptor for the given source file.
    fn task(source: &str, locale: &str) -> TranslationTask {
        TranslationTask {
            file: LocaleFileDescriptor {
                source: PathBuf::from(source),
                default_locale: "en-US".to_string(),
                locales: vec![locale.to_string()],
            },
            locale: locale.to_string(),
        }
    }

    /// Tests locale substitution for the subdirectory convention.
    #[test]
    fn target_path_substitutes_locale_directory() {
        let task = task("locales/en-US/common.json", "it-IT");
        assert_eq!(task.target_path(), PathBuf::from("locales/it-IT/common.json"));
    }

    /// Tests that only the first locale occurrence is substituted.
    #[test]
    fn target_path_substitutes_first_occurrence_only() {
        let task = task("locales/en-US/en-US.json", "fr-FR");
        assert_eq!(task.target_path(), PathBuf::from("locales/fr-FR/en-US.json"));
    }

    /// Tests that a leading ./ component is stripped.
    #[test]
    fn normalized_path_strips_leading_dot() {
        assert_eq!(
            normalized_path(&PathBuf::from("./locales/en/app.json")),
            PathBuf::from("locales/en/app.json")
        );
    }
}
