// crates/intl-sync-core/src/core/tree.rs
// ============================================================================
// Module: Locale Tree Model
// Description: Typed representation of one locale's translation content.
// Purpose: Replace untyped JSON traversal with a tagged variant.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`LocaleTree`] is a recursively-nested mapping from string keys to
//! either a leaf value or another tree. Translation files round-trip
//! through this type: it deserializes from plain JSON objects and
//! serializes back without any tagging. Keys are held in a `BTreeMap` so
//! traversal and persisted output are deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Locale Tree
// ============================================================================

/// One locale's translation content.
///
/// # Invariants
/// - Deserialization is untagged: JSON strings become [`LocaleTree::Text`],
///   JSON objects become [`LocaleTree::Branch`], and every other JSON value
///   (numbers, booleans, null, arrays) becomes [`LocaleTree::Scalar`].
/// - `Scalar` never holds a string or an object; those are covered by the
///   other variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleTree {
    /// A translatable string leaf.
    Text(String),
    /// A nested mapping of keys to subtrees.
    Branch(BTreeMap<String, LocaleTree>),
    /// A non-string, non-object JSON leaf carried through untranslated.
    Scalar(Value),
}

impl LocaleTree {
    /// Returns an empty branch.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Branch(BTreeMap::new())
    }

    /// Returns true when this node is a nested branch.
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Returns the nested entries when this node is a branch.
    #[must_use]
    pub const fn as_branch(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Branch(entries) => Some(entries),
            Self::Text(_) | Self::Scalar(_) => None,
        }
    }

    /// Returns true when this node is a branch with no entries.
    #[must_use]
    pub fn is_empty_branch(&self) -> bool {
        matches!(self, Self::Branch(entries) if entries.is_empty())
    }

    /// Counts the leaf values reachable from this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Text(_) | Self::Scalar(_) => 1,
            Self::Branch(entries) => entries.values().map(Self::leaf_count).sum(),
        }
    }
}

impl From<&LocaleTree> for Value {
    fn from(tree: &LocaleTree) -> Self {
        match tree {
            LocaleTree::Text(text) => Self::String(text.clone()),
            LocaleTree::Scalar(value) => value.clone(),
            LocaleTree::Branch(entries) => Self::Object(
                entries.iter().map(|(key, node)| (key.clone(), Self::from(node))).collect(),
            ),
        }
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

    use serde_json::json;

    use super::LocaleTree;

    /// Tests that JSON objects become branches with typed leaves.
    #[test]
    fn deserializes_nested_object() {
        let tree: LocaleTree = serde_json::from_value(json!({
            "title": "Home",
            "nav": { "about": "About us", "count": 3 }
        }))
        .unwrap();
        let LocaleTree::Branch(entries) = &tree else {
            panic!("expected branch");
        };
        assert!(matches!(entries.get("title"), Some(LocaleTree::Text(_))));
        let LocaleTree::Branch(nav) = entries.get("nav").unwrap() else {
            panic!("expected nested branch");
        };
        assert!(matches!(nav.get("count"), Some(LocaleTree::Scalar(_))));
    }

    /// Tests that serialization stays untagged plain JSON.
    #[test]
    fn round_trips_to_plain_json() {
        let source = json!({ "a": "x", "b": { "c": null } });
        let tree: LocaleTree = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&tree).unwrap(), source);
    }

    /// Tests that leaf counting descends into branches.
    #[test]
    fn counts_leaves_recursively() {
        let tree: LocaleTree =
            serde_json::from_value(json!({ "a": "x", "b": { "c": "y", "d": true } })).unwrap();
        assert_eq!(tree.leaf_count(), 3);
    }
}
