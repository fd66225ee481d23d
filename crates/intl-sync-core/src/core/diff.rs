// crates/intl-sync-core/src/core/diff.rs
// ============================================================================
// Module: Tree Diff Comparator
// Description: Keys-only structural comparison between locale trees.
// Purpose: Decide whether regeneration is needed and what to regenerate.
// Dependencies: crate::core::tree
// ============================================================================

//! ## Overview
//! The comparator works on structure only: two trees are at parity when
//! they carry the same key paths, regardless of leaf values. Patch
//! extraction restricts a candidate tree to the key paths a base tree is
//! missing, preserving nesting. Leaf-value drift is deliberately not
//! chased here; fixing values is the translation provider's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::tree::LocaleTree;

// ============================================================================
// SECTION: Parity Check
// ============================================================================

/// Checks structural parity between two locale trees.
///
/// Returns true iff every key path present in `a` is present in `b` and
/// vice versa, recursively. Leaf values are ignored; two leaves of any
/// kind are at parity, while a leaf never matches a branch.
#[must_use]
pub fn keys_match(a: &LocaleTree, b: &LocaleTree) -> bool {
    match (a, b) {
        (LocaleTree::Branch(left), LocaleTree::Branch(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, node)| {
                    right.get(key).is_some_and(|other| keys_match(node, other))
                })
        }
        (LocaleTree::Branch(_), _) | (_, LocaleTree::Branch(_)) => false,
        _ => true,
    }
}

// ============================================================================
// SECTION: Patch Extraction
// ============================================================================

/// Extracts the structural patch of `candidate` relative to `base`.
///
/// The patch is the subtree of `candidate` restricted to key paths that
/// are absent in `base` or whose counterpart in `base` has a different
/// shape, preserving `candidate`'s nesting for those paths only. A key
/// present in both trees as a leaf is never part of the patch, even when
/// the leaf values differ.
///
/// Returns `None` when the patch is empty, which signals that no
/// generation work is needed for this pair.
#[must_use]
pub fn structural_patch(base: &LocaleTree, candidate: &LocaleTree) -> Option<LocaleTree> {
    match (base, candidate) {
        (LocaleTree::Branch(known), LocaleTree::Branch(wanted)) => {
            let mut missing = BTreeMap::new();
            for (key, node) in wanted {
                match known.get(key) {
                    None => {
                        missing.insert(key.clone(), node.clone());
                    }
                    Some(counterpart) => {
                        if let Some(patch) = structural_patch(counterpart, node) {
                            missing.insert(key.clone(), patch);
                        }
                    }
                }
            }
            if missing.is_empty() {
                None
            } else {
                Some(LocaleTree::Branch(missing))
            }
        }
        // A shape mismatch replaces the whole candidate subtree.
        (LocaleTree::Branch(_), _) | (_, LocaleTree::Branch(_)) => Some(candidate.clone()),
        // Leaf against leaf: value drift is not part of a structural patch.
        _ => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
