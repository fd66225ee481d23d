// crates/intl-sync-core/src/core/mod.rs
// ============================================================================
// Module: Intl Sync Core Types
// Description: Locale tree model, structural diff, merge, and task types.
// Purpose: Provide the pure data model and total functions over it.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The core modules hold the typed locale tree and the pure functions the
//! runtime composes: the keys-only comparator, the reconciliation merger,
//! and the task/settlement vocabulary shared with the CLI.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod diff;
pub mod merge;
pub mod task;
pub mod tree;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use diff::keys_match;
pub use diff::structural_patch;
pub use merge::reconcile;
pub use task::BatchReport;
pub use task::LocaleFileDescriptor;
pub use task::TaskError;
pub use task::TaskOutcome;
pub use task::TaskReport;
pub use task::TranslationTask;
pub use task::normalized_path;
pub use tree::LocaleTree;
