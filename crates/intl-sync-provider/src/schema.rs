// crates/intl-sync-provider/src/schema.rs
// ============================================================================
// Module: Response Schema Derivation
// Description: Schema-by-example validation of provider output.
// Purpose: Reject provider responses that do not mirror the request shape.
// Dependencies: intl-sync-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Each translation request carries a locale subtree; the provider must
//! return a document with exactly the same branch structure. Rather than
//! hand-walking both trees, the request content is compiled into a JSON
//! Schema: every branch becomes an `object` with `required` keys and
//! `additionalProperties: false`, every text leaf becomes a `string` that
//! must still contain each `{placeholder}` token from the source, and
//! non-text leaves accept any value since they are carried through
//! untranslated. The provider response is then validated against that
//! schema before it is allowed anywhere near the merge step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use intl_sync_core::LocaleTree;
use intl_sync_core::ProviderError;
use jsonschema::Draft;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Placeholder Scanning
// ============================================================================

/// Extracts `{ident}` interpolation tokens from a text leaf.
///
/// A token is a non-empty run of ASCII alphanumerics or underscores
/// enclosed in a single brace pair. Braces around anything else are
/// treated as literal text.
#[must_use]
pub fn placeholder_tokens(text: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        if end > start && end < bytes.len() && bytes[end] == b'}' {
            tokens.insert(text[start..end].to_string());
            i = end + 1;
        } else {
            i += 1;
        }
    }
    tokens
}

// ============================================================================
// SECTION: Schema Derivation
// ============================================================================

/// Derives the response schema for a request subtree.
#[must_use]
pub fn response_schema(content: &LocaleTree) -> Value {
    match content {
        LocaleTree::Text(text) => {
            let tokens = placeholder_tokens(text);
            if tokens.is_empty() {
                json!({ "type": "string" })
            } else {
                let patterns: Vec<Value> = tokens
                    .iter()
                    .map(|token| json!({ "pattern": format!("\\{{{token}\\}}") }))
                    .collect();
                json!({ "type": "string", "allOf": patterns })
            }
        }
        // Numbers, booleans, and nulls pass through untranslated.
        LocaleTree::Scalar(_) => json!({}),
        LocaleTree::Branch(entries) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (key, child) in entries {
                properties.insert(key.clone(), response_schema(child));
                required.push(Value::String(key.clone()));
            }
            json!({
                "type": "object",
                "properties": Value::Object(properties),
                "required": required,
                "additionalProperties": false,
            })
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a provider response against the request-derived schema.
///
/// # Errors
///
/// Returns [`ProviderError::ShapeMismatch`] when the response violates
/// the derived schema, with the first violation in the detail.
pub fn validate_response(content: &LocaleTree, response: &LocaleTree) -> Result<(), ProviderError> {
    let schema = response_schema(content);
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| ProviderError::ShapeMismatch {
            detail: format!("schema compile failed: {err}"),
        })?;
    let instance = Value::from(response);
    if validator.is_valid(&instance) {
        return Ok(());
    }
    let detail = validator
        .iter_errors(&instance)
        .next()
        .map_or_else(|| "response violates derived schema".to_string(), |err| err.to_string());
    Err(ProviderError::ShapeMismatch { detail })
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

    use super::placeholder_tokens;

    /// Tests token extraction and set semantics.
    #[test]
    fn tokens_are_extracted_and_deduplicated() {
        let tokens = placeholder_tokens("Hi {name}, you have {count} items, {name}!");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("name"));
        assert!(tokens.contains("count"));
    }

    /// Tests that non-identifier braces stay literal.
    #[test]
    fn literal_braces_are_not_tokens() {
        assert!(placeholder_tokens("set {} or { spaced } or {bad-char}").is_empty());
    }

    /// Tests that an unclosed brace is not a token.
    #[test]
    fn unterminated_brace_is_literal() {
        assert!(placeholder_tokens("open {name").is_empty());
    }
}
