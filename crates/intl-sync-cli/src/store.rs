// crates/intl-sync-cli/src/store.rs
// ============================================================================
// Module: JSON File Store
// Description: Filesystem-backed TranslationStore implementation.
// Purpose: Load and atomically persist locale trees as pretty JSON.
// Dependencies: intl-sync-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Locale files are pretty-printed JSON with two-space indentation and a
//! trailing newline, matching what front-end tooling writes. Persisting
//! goes through a temp file in the target directory followed by a rename
//! so an interrupted run never leaves a half-written translation behind.
//! Oversized files fail closed before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use intl_sync_core::LocaleTree;
use intl_sync_core::StoreError;
use intl_sync_core::TranslationStore;
use tempfile::NamedTempFile;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum locale file size in bytes.
pub const MAX_TREE_FILE_SIZE: u64 = 1024 * 1024;

/// Extension of the per-file instruction sidecar.
const INSTRUCTION_EXTENSION: &str = "md";

// ============================================================================
// SECTION: Store Implementation
// ============================================================================

/// Filesystem-backed [`TranslationStore`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileStore;

impl JsonFileStore {
    /// Creates a new store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TranslationStore for JsonFileStore {
    fn load_tree(&self, path: &Path) -> Result<LocaleTree, StoreError> {
        let metadata = fs::metadata(path).map_err(|err| StoreError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        if metadata.len() > MAX_TREE_FILE_SIZE {
            return Err(StoreError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: MAX_TREE_FILE_SIZE,
            });
        }
        let bytes = fs::read(path).map_err(|err| StoreError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|err| StoreError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn write_tree(&self, path: &Path, tree: &LocaleTree) -> Result<(), StoreError> {
        let mut rendered =
            serde_json::to_string_pretty(tree).map_err(|err| StoreError::Write {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        rendered.push('\n');

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|err| StoreError::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        // Temp file lives next to the target so the rename stays on one
        // filesystem.
        let mut staged = NamedTempFile::new_in(parent).map_err(|err| StoreError::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        staged.write_all(rendered.as_bytes()).map_err(|err| StoreError::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        staged.persist(path).map_err(|err| StoreError::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), "locale tree persisted");
        Ok(())
    }

    fn load_instruction(&self, source: &Path) -> Result<Option<String>, StoreError> {
        let sidecar = source.with_extension(INSTRUCTION_EXTENSION);
        if !sidecar.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&sidecar).map_err(|err| StoreError::Read {
            path: sidecar.clone(),
            reason: err.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }
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

    use std::fs;

    use intl_sync_core::LocaleTree;
    use intl_sync_core::TranslationStore;
    use serde_json::json;
    use tempfile::TempDir;

    use super::JsonFileStore;
    use super::MAX_TREE_FILE_SIZE;

    /// Builds a tree from a JSON literal.
    fn tree(value: serde_json::Value) -> LocaleTree {
        serde_json::from_value(value).unwrap()
    }

    /// Tests the persist-and-reload round trip.
    #[test]
    fn write_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("it-IT").join("common.json");
        let store = JsonFileStore::new();
        let original = tree(json!({ "title": "Ciao", "menu": { "home": "Inizio" } }));
        store.write_tree(&path, &original).unwrap();
        assert_eq!(store.load_tree(&path).unwrap(), original);
    }

    /// Tests the two-space pretty format and trailing newline.
    #[test]
    fn written_files_are_pretty_printed_with_a_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en-US.json");
        JsonFileStore::new().write_tree(&path, &tree(json!({ "title": "Hello" }))).unwrap();
        let rendered = fs::read_to_string(&path).unwrap();
        assert!(rendered.contains("  \"title\": \"Hello\""));
        assert!(rendered.ends_with('\n'));
    }

    /// Tests parent directory creation on write.
    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("fr-FR").join("common.json");
        JsonFileStore::new().write_tree(&path, &tree(json!({}))).unwrap();
        assert!(path.is_file());
    }

    /// Tests that the size limit fails closed.
    #[test]
    fn oversized_files_are_rejected_before_parsing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.json");
        let mut body = String::from("{\"pad\":\"");
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The configured limit is far below usize::MAX."
        )]
        body.push_str(&"x".repeat(MAX_TREE_FILE_SIZE as usize));
        body.push_str("\"}");
        fs::write(&path, body).unwrap();
        assert!(JsonFileStore::new().load_tree(&path).is_err());
    }

    /// Tests that an absent sidecar is not an error.
    #[test]
    fn missing_instruction_sidecar_is_none() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("en-US").join("common.json");
        assert!(JsonFileStore::new().load_instruction(&source).unwrap().is_none());
    }

    /// Tests sidecar lookup next to the source file.
    #[test]
    fn instruction_sidecar_is_loaded() {
        let dir = TempDir::new().unwrap();
        let source_dir = dir.path().join("en-US");
        fs::create_dir_all(&source_dir).unwrap();
        let source = source_dir.join("common.json");
        fs::write(source_dir.join("common.md"), "Use the informal register.\n").unwrap();
        let instruction = JsonFileStore::new().load_instruction(&source).unwrap();
        assert_eq!(instruction.unwrap().trim(), "Use the informal register.");
    }

    /// Tests that a whitespace-only sidecar is ignored.
    #[test]
    fn blank_instruction_sidecar_is_none() {
        let dir = TempDir::new().unwrap();
        let source_dir = dir.path().join("en-US");
        fs::create_dir_all(&source_dir).unwrap();
        let source = source_dir.join("common.json");
        fs::write(source_dir.join("common.md"), "  \n").unwrap();
        assert!(JsonFileStore::new().load_instruction(&source).unwrap().is_none());
    }
}
