// crates/intl-sync-core/src/lib.rs
// ============================================================================
// Module: Intl Sync Core Library
// Description: Public API surface for the Intl Sync engine.
// Purpose: Expose the locale tree model, diff/merge logic, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Intl Sync core implements the locale-tree synchronization engine:
//! structural diffing of translation trees, three-way reconciliation of
//! existing and freshly generated translations, missing-translation
//! discovery across a locale set, and a bounded-concurrency orchestrator
//! that settles every translation task independently. It is I/O-agnostic
//! and integrates through explicit interfaces rather than embedding a
//! filesystem or HTTP client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ProviderError;
pub use interfaces::StoreError;
pub use interfaces::TranslationRequest;
pub use interfaces::TranslationStore;
pub use interfaces::Translator;
pub use runtime::DEFAULT_CONCURRENCY;
pub use runtime::DiscoveryError;
pub use runtime::DiscoveryScope;
pub use runtime::Orchestrator;
pub use runtime::discover_tasks;
