// crates/intl-sync-core/src/interfaces/mod.rs
// ============================================================================
// Module: Intl Sync Interfaces
// Description: Seams between the engine and its external collaborators.
// Purpose: Keep the engine free of HTTP and filesystem concerns.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! The orchestrator drives two collaborators through these traits: a
//! [`Translator`] that produces translated trees (an external
//! text-generation provider), and a [`TranslationStore`] that loads and
//! persists trees on disk. Implementations live in the provider and CLI
//! crates; tests substitute in-memory fakes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::tree::LocaleTree;

// ============================================================================
// SECTION: Translator
// ============================================================================

/// One translation request handed to the provider.
///
/// # Invariants
/// - `content` holds strings-with-placeholders to translate; it is either
///   a structural patch or a full source tree.
/// - The provider must return a tree with the identical key shape, leaf
///   placeholders preserved.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    /// Target locale code for the generated values.
    pub target_locale: &'a str,
    /// Source-of-truth locale code the content is written in.
    pub default_locale: &'a str,
    /// The tree or subtree to translate.
    pub content: &'a LocaleTree,
    /// Optional free-text instruction forwarded verbatim to the provider.
    pub instruction: Option<&'a str>,
}

/// External translation provider, consumed as a black box.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `request.content` into the target locale.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on connectivity failure, provider-side
    /// rejection, a malformed response body, or a response whose shape
    /// does not match the request.
    async fn translate(&self, request: TranslationRequest<'_>)
    -> Result<LocaleTree, ProviderError>;
}

/// Provider failure classes, reported with enough context to act on.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level connectivity failure.
    #[error("error connecting to {host} ({operation}); are you connected to the internet?")]
    Connect {
        /// Target host of the failed request.
        host: String,
        /// Operation that failed, for example `chat/completions`.
        operation: String,
    },
    /// The provider rejected the request.
    #[error("translation provider error: status {status} - {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider-supplied error text, possibly truncated.
        message: String,
    },
    /// The provider returned a body that is not valid JSON.
    #[error("the translation provider returned invalid JSON")]
    MalformedResponse,
    /// The response parsed but does not match the requested shape.
    #[error("the translated tree does not match the requested shape: {detail}")]
    ShapeMismatch {
        /// First validation failure, for diagnostics.
        detail: String,
    },
    /// Any other request failure (timeouts, TLS, protocol errors).
    #[error("translation request to {host} failed: {reason}")]
    Transport {
        /// Target host of the failed request.
        host: String,
        /// Underlying failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Translation Store
// ============================================================================

/// Filesystem collaborator for locale trees and instruction files.
pub trait TranslationStore: Send + Sync {
    /// Loads a JSON locale tree from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file cannot be read or parsed.
    fn load_tree(&self, path: &Path) -> Result<LocaleTree, StoreError>;

    /// Checks whether a translation exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Persists `tree` at `path`, creating parent directories as needed.
    ///
    /// The write must be atomic per file: either the target file is fully
    /// replaced or the previous content is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when serialization or the write fails.
    fn write_tree(&self, path: &Path, tree: &LocaleTree) -> Result<(), StoreError>;

    /// Loads the optional free-text instruction next to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the instruction file exists but cannot
    /// be read. A missing instruction file is `Ok(None)`.
    fn load_instruction(&self, source: &Path) -> Result<Option<String>, StoreError>;
}

/// Filesystem failure classes, named by path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure description.
        reason: String,
    },
    /// The file is not a valid JSON locale tree.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parser failure description.
        reason: String,
    },
    /// The file could not be written.
    #[error("failed to write {path}: {reason}")]
    Write {
        /// Path that failed to persist.
        path: PathBuf,
        /// Underlying I/O failure description.
        reason: String,
    },
    /// The file exceeds the configured size limit.
    #[error("refusing to read {path}: {size} bytes exceeds limit {limit}")]
    TooLarge {
        /// Path that was rejected.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Maximum size in bytes.
        limit: u64,
    },
}
