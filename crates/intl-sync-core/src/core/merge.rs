// crates/intl-sync-core/src/core/merge.rs
// ============================================================================
// Module: Tree Reconciliation Merger
// Description: Three-way union merge of existing and generated translations.
// Purpose: Produce the final tree to persist for one (file, locale) pair.
// Dependencies: crate::core::tree
// ============================================================================

//! ## Overview
//! Reconciliation covers the union of keys in the existing translation and
//! the freshly generated content. Agreement is treated as confirmation,
//! absence as adoption, and disagreement as "needs attention": conflicting
//! leaves are blanked to an empty string so the unresolved spot stays
//! visible in the persisted file for a later regeneration pass. An empty
//! text leaf counts as absence, not as a value, so a blanked conflict
//! heals once fresh content arrives. This is a pure, total function; it
//! never fails on well-formed trees.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::tree::LocaleTree;

// ============================================================================
// SECTION: Reconciliation
// ============================================================================

/// Merges an existing translation tree with freshly generated content.
///
/// Rules, applied recursively over the union of keys:
/// - present on both sides as branches: recurse;
/// - present on both sides with equal leaves: keep the value;
/// - an empty text leaf on either side: adopt the other side, so a
///   previously blanked conflict heals on the next generation pass;
/// - present on both sides with differing leaves (or mismatched kinds):
///   blank to an empty string as an unresolved-conflict marker;
/// - present on one side only: adopt that side, subtrees included.
#[must_use]
pub fn reconcile(existing: &LocaleTree, generated: &LocaleTree) -> LocaleTree {
    match (existing, generated) {
        (LocaleTree::Branch(ours), LocaleTree::Branch(theirs)) => {
            let mut merged = BTreeMap::new();
            for (key, node) in ours {
                match theirs.get(key) {
                    Some(counterpart) => {
                        merged.insert(key.clone(), reconcile(node, counterpart));
                    }
                    None => {
                        merged.insert(key.clone(), node.clone());
                    }
                }
            }
            for (key, node) in theirs {
                if !ours.contains_key(key) {
                    merged.insert(key.clone(), node.clone());
                }
            }
            LocaleTree::Branch(merged)
        }
        _ if existing == generated => existing.clone(),
        (LocaleTree::Text(text), _) if text.is_empty() => generated.clone(),
        (_, LocaleTree::Text(text)) if text.is_empty() => existing.clone(),
        // Disagreement, including leaf-versus-branch kind mismatches.
        _ => LocaleTree::Text(String::new()),
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

    use super::reconcile;
    use crate::core::tree::LocaleTree;

    /// Builds a tree from a JSON literal.
    fn tree(value: serde_json::Value) -> LocaleTree {
        serde_json::from_value(value).unwrap()
    }

    /// Reconciles two JSON literals and returns the merged JSON.
    fn merged_json(existing: serde_json::Value, generated: serde_json::Value) -> serde_json::Value {
        serde_json::to_value(reconcile(&tree(existing), &tree(generated))).unwrap()
    }

    /// Tests that disagreeing leaves are blanked to an empty string.
    #[test]
    fn conflicting_leaves_are_blanked() {
        assert_eq!(merged_json(json!({ "a": "x" }), json!({ "a": "y" })), json!({ "a": "" }));
    }

    /// Tests that one-sided keys are adopted.
    #[test]
    fn disjoint_keys_form_a_union() {
        assert_eq!(
            merged_json(json!({ "a": "x" }), json!({ "b": "y" })),
            json!({ "a": "x", "b": "y" })
        );
    }

    /// Tests that agreement keeps the value.
    #[test]
    fn agreeing_leaves_are_kept() {
        assert_eq!(merged_json(json!({ "a": "x" }), json!({ "a": "x" })), json!({ "a": "x" }));
    }

    /// Tests that reconciliation recurses through nested branches.
    #[test]
    fn nested_branches_recurse() {
        assert_eq!(
            merged_json(
                json!({ "nav": { "home": "Home", "about": "About" } }),
                json!({ "nav": { "about": "Chi siamo", "blog": "Blog" } })
            ),
            json!({ "nav": { "home": "Home", "about": "", "blog": "Blog" } })
        );
    }

    /// Tests that a leaf-versus-branch mismatch is blanked.
    #[test]
    fn kind_mismatch_is_a_conflict() {
        assert_eq!(
            merged_json(json!({ "a": "leaf" }), json!({ "a": { "b": "x" } })),
            json!({ "a": "" })
        );
    }

    /// Tests that a previously blanked leaf adopts regenerated content.
    #[test]
    fn blanked_leaf_adopts_regenerated_content() {
        assert_eq!(merged_json(json!({ "a": "" }), json!({ "a": "y" })), json!({ "a": "y" }));
        assert_eq!(
            merged_json(json!({ "a": "" }), json!({ "a": { "b": "x" } })),
            json!({ "a": { "b": "x" } })
        );
    }

    /// Tests that empty regenerated content never clobbers a translation.
    #[test]
    fn empty_generated_leaf_keeps_existing() {
        assert_eq!(merged_json(json!({ "a": "x" }), json!({ "a": "" })), json!({ "a": "x" }));
    }
}
