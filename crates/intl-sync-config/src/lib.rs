// crates/intl-sync-config/src/lib.rs
// ============================================================================
// Module: Intl Sync Config Library
// Description: Canonical config model, loading, and scaffold generation.
// Purpose: Single source of truth for intl-sync.config.json semantics.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `intl-sync-config` defines the configuration model for Intl Sync. The
//! config file is JSON (the format translation projects already live in),
//! loaded once per run with a size limit and presence validation. A
//! missing config file is a fatal error that tells the user to run
//! `intl-sync generate`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod scaffold;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use scaffold::scaffold_json;
pub use scaffold::write_scaffold;
