// crates/intl-sync-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Bounded-Concurrency Task Orchestrator
// Description: Runs translation tasks with a fixed worker budget.
// Purpose: Settle every task independently; one bad file never blocks the batch.
// Dependencies: crate::{core, interfaces}, tokio
// ============================================================================

//! ## Overview
//! The orchestrator fans a task list out into at most `concurrency`
//! in-flight jobs. Each job runs the full pipeline: load the source tree,
//! extract the structural patch against any existing translation, invoke
//! the provider, reconcile, run the parity acceptance check, and persist
//! atomically. Failures are confined to their task; the batch report is
//! produced only once every task has settled.
//!
//! The only shared resource across jobs is the concurrency budget itself,
//! held as semaphore permits acquired on start and released on settlement.
//! No task is ever cancelled by the orchestrator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::core::diff::keys_match;
use crate::core::diff::structural_patch;
use crate::core::merge::reconcile;
use crate::core::task::BatchReport;
use crate::core::task::TaskError;
use crate::core::task::TaskOutcome;
use crate::core::task::TaskReport;
use crate::core::task::TranslationTask;
use crate::interfaces::TranslationRequest;
use crate::interfaces::TranslationStore;
use crate::interfaces::Translator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of tasks allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Executes translation tasks with a fixed concurrency limit.
///
/// # Invariants
/// - At most `concurrency` tasks run at any time.
/// - [`Orchestrator::run`] returns only after every task has settled.
/// - Tasks share no mutable state; each owns its trees end to end.
pub struct Orchestrator {
    /// Filesystem collaborator for trees and instruction files.
    store: Arc<dyn TranslationStore>,
    /// External translation provider.
    translator: Arc<dyn Translator>,
    /// Concurrency budget; always at least one.
    concurrency: usize,
}

impl Orchestrator {
    /// Creates an orchestrator with the default concurrency budget.
    pub fn new(store: Arc<dyn TranslationStore>, translator: Arc<dyn Translator>) -> Self {
        Self {
            store,
            translator,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Overrides the concurrency budget (clamped to at least one).
    #[must_use]
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Runs every task to settlement and aggregates the outcomes.
    ///
    /// Reports are returned in submission order, one per task. The method
    /// does not short-circuit on failure; the returned [`BatchReport`] is
    /// the batch-level "all settled" signal.
    pub async fn run(&self, tasks: Vec<TranslationTask>) -> BatchReport {
        let budget = Arc::new(Semaphore::new(self.concurrency));
        info!(tasks = tasks.len(), concurrency = self.concurrency, "starting translation batch");

        let mut handles = Vec::with_capacity(tasks.len());
        for task in tasks {
            let budget = Arc::clone(&budget);
            let store = Arc::clone(&self.store);
            let translator = Arc::clone(&self.translator);
            let job = task.clone();
            let handle = tokio::spawn(async move {
                let permit = match budget.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(err) => {
                        return TaskOutcome::Failed(TaskError::Abnormal {
                            reason: err.to_string(),
                        });
                    }
                };
                let outcome = run_task(store.as_ref(), translator.as_ref(), &job).await;
                drop(permit);
                outcome
            });
            handles.push((task, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (task, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => TaskOutcome::Failed(TaskError::Abnormal {
                    reason: err.to_string(),
                }),
            };
            reports.push(TaskReport {
                task,
                outcome,
            });
        }

        let report = BatchReport {
            reports,
        };
        info!(
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "translation batch settled"
        );
        report
    }
}

// ============================================================================
// SECTION: Task Pipeline
// ============================================================================

/// Runs one task through the full translation pipeline.
async fn run_task(
    store: &dyn TranslationStore,
    translator: &dyn Translator,
    task: &TranslationTask,
) -> TaskOutcome {
    match run_task_inner(store, translator, task).await {
        Ok(outcome) => outcome,
        Err(err) => TaskOutcome::Failed(err),
    }
}

/// Pipeline body; every error is task-local.
async fn run_task_inner(
    store: &dyn TranslationStore,
    translator: &dyn Translator,
    task: &TranslationTask,
) -> Result<TaskOutcome, TaskError> {
    let source = store.load_tree(&task.file.source)?;
    let target = task.target_path();
    let instruction = match store.load_instruction(&task.file.source) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                file = %task.file.source.display(),
                error = %err,
                "ignoring unreadable instruction file"
            );
            None
        }
    };

    let merged = if store.exists(&target) {
        let existing = store.load_tree(&target)?;
        let Some(patch) = structural_patch(&existing, &source) else {
            debug!(file = %task.file.source.display(), locale = %task.locale, "already in sync");
            return Ok(TaskOutcome::Skipped);
        };
        debug!(
            file = %task.file.source.display(),
            locale = %task.locale,
            leaves = patch.leaf_count(),
            "translating structural patch"
        );
        let generated = translator
            .translate(TranslationRequest {
                target_locale: &task.locale,
                default_locale: &task.file.default_locale,
                content: &patch,
                instruction: instruction.as_deref(),
            })
            .await?;
        reconcile(&existing, &generated)
    } else {
        debug!(
            file = %task.file.source.display(),
            locale = %task.locale,
            "no prior translation, generating full tree"
        );
        translator
            .translate(TranslationRequest {
                target_locale: &task.locale,
                default_locale: &task.file.default_locale,
                content: &source,
                instruction: instruction.as_deref(),
            })
            .await?
    };

    if !keys_match(&source, &merged) {
        return Err(TaskError::Acceptance {
            file: task.file.source.clone(),
        });
    }

    store.write_tree(&target, &merged)?;
    Ok(TaskOutcome::Success)
}
