// crates/intl-sync-cli/src/lib.rs
// ============================================================================
// Module: Intl Sync CLI Library
// Description: Reusable pieces of the intl-sync binary.
// Purpose: Expose git plumbing, the file store, and CLI localization.
// Dependencies: intl-sync-core, serde_json, tempfile, thiserror
// ============================================================================

//! ## Overview
//! The binary's supporting modules live here so integration tests can
//! exercise them directly: the git staging gate and hook management, the
//! JSON file store behind the engine's storage seam, and the CLI's own
//! message catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod git;
pub mod i18n;
pub mod store;
