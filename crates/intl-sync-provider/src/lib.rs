// crates/intl-sync-provider/src/lib.rs
// ============================================================================
// Module: Intl Sync Provider Library
// Description: OpenAI-compatible chat-completion translation provider.
// Purpose: Turn locale subtrees into translated subtrees over HTTP.
// Dependencies: intl-sync-core, reqwest, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! `intl-sync-provider` implements the [`intl_sync_core::Translator`] seam
//! against any OpenAI-compatible chat-completion API. A translation call
//! is one prompt chain, one POST, and one response check: the returned
//! document must satisfy a JSON Schema derived from the request content,
//! so a provider can never smuggle extra keys, drop keys, or lose
//! `{placeholder}` tokens past the client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod openai;
pub mod prompt;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use openai::OpenAiConfig;
pub use openai::OpenAiTranslator;
pub use prompt::ChatMessage;
pub use prompt::build_messages;
pub use prompt::sanitize_payload;
pub use schema::placeholder_tokens;
pub use schema::response_schema;
pub use schema::validate_response;
