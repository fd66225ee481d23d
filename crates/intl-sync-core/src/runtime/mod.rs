// crates/intl-sync-core/src/runtime/mod.rs
// ============================================================================
// Module: Intl Sync Runtime
// Description: Missing-translation discovery and the task orchestrator.
// Purpose: Drive per-(file, locale) translation jobs to settlement.
// Dependencies: crate::{core, interfaces}, tokio, walkdir
// ============================================================================

//! ## Overview
//! Runtime modules enumerate the work a run has to do and execute it with
//! a fixed concurrency budget. Every external entry point (the automatic
//! gate path and the interactive path) constructs tasks through the same
//! discovery logic and hands them to the same orchestrator.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod discovery;
pub mod orchestrator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use discovery::DiscoveryError;
pub use discovery::DiscoveryScope;
pub use discovery::discover_tasks;
pub use orchestrator::DEFAULT_CONCURRENCY;
pub use orchestrator::Orchestrator;
