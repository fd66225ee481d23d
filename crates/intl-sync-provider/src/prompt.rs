// crates/intl-sync-provider/src/prompt.rs
// ============================================================================
// Module: Prompt Construction
// Description: Chat message chain and payload sanitization.
// Purpose: Build the fixed translation prompt for the chat-completion API.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The prompt is a fixed role-tagged chain: a system message establishing
//! the translator persona, framing messages naming the target locale, an
//! optional project-specific instruction, and finally the serialized JSON
//! payload. Payload text is sanitized before it enters the chain so stray
//! whitespace and line breaks never leak into the conversation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Message Types
// ============================================================================

/// A single role-tagged chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Chat role: `system`, `user`, or `assistant`.
    pub role: &'static str,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    /// Creates a `system` message.
    #[must_use]
    pub fn system(content: String) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    /// Creates a `user` message.
    #[must_use]
    pub fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }

    /// Creates an `assistant` message.
    #[must_use]
    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant",
            content,
        }
    }
}

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Normalizes free text before it is embedded in the prompt chain.
///
/// Leading and trailing whitespace is trimmed, carriage returns and line
/// feeds are removed, and a single trailing period directly after a word
/// character is dropped.
#[must_use]
pub fn sanitize_payload(raw: &str) -> String {
    let flat: String = raw.trim().chars().filter(|c| *c != '\n' && *c != '\r').collect();
    if flat.ends_with('.') {
        let body = &flat[..flat.len() - 1];
        if body
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            return body.to_string();
        }
    }
    flat
}

// ============================================================================
// SECTION: Prompt Chain
// ============================================================================

/// Builds the translation prompt chain for one request.
///
/// `payload` is the serialized JSON document to translate; it is
/// sanitized before being appended. When `instruction` is present it is
/// sanitized and inserted as an extra user message ahead of the payload.
#[must_use]
pub fn build_messages(
    target_locale: &str,
    instruction: Option<&str>,
    payload: &str,
) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(
            "You are a professional translator with proven experience".to_string(),
        ),
        ChatMessage::user(format!(
            "Translate the given JSON file in input to match the {target_locale}"
        )),
        ChatMessage::assistant(format!(
            "The returned json will be used for a website in {target_locale}"
        )),
        ChatMessage::assistant(
            "Translate only the value of the key-value json provided".to_string(),
        ),
    ];
    if let Some(instruction) = instruction {
        let instruction = sanitize_payload(instruction);
        if !instruction.is_empty() {
            messages.push(ChatMessage::user(instruction));
        }
    }
    messages.push(ChatMessage::user(format!(
        "Here the json file to translate: {}",
        sanitize_payload(payload)
    )));
    messages
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

    use super::build_messages;
    use super::sanitize_payload;

    /// Tests whitespace trimming and line-break removal.
    #[test]
    fn sanitize_trims_and_flattens_lines() {
        assert_eq!(sanitize_payload("  hello\nworld\r\n  "), "helloworld");
    }

    /// Tests the trailing-period rule after a word character.
    #[test]
    fn sanitize_drops_a_trailing_period_after_a_word() {
        assert_eq!(sanitize_payload("Keep it formal."), "Keep it formal");
    }

    /// Tests that periods after punctuation survive.
    #[test]
    fn sanitize_keeps_a_period_after_punctuation() {
        assert_eq!(sanitize_payload("wait...."), "wait....");
        assert_eq!(sanitize_payload("{\"a\":\"b\"}."), "{\"a\":\"b\"}.");
    }

    /// Tests the fixed chain shape and payload placement.
    #[test]
    fn chain_ends_with_the_payload() {
        let messages = build_messages("it-IT", None, "{\"title\":\"Hello\"}");
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, "system");
        assert!(messages[1].content.contains("it-IT"));
        let last = messages.last().unwrap();
        assert_eq!(last.role, "user");
        assert!(last.content.ends_with("{\"title\":\"Hello\"}"));
    }

    /// Tests the optional instruction slot.
    #[test]
    fn instruction_is_inserted_before_the_payload() {
        let messages = build_messages("fr-FR", Some("Use the informal register.\n"), "{}");
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[4].role, "user");
        assert_eq!(messages[4].content, "Use the informal register");
    }

    /// Tests that whitespace-only instructions are dropped.
    #[test]
    fn blank_instruction_is_omitted() {
        let messages = build_messages("fr-FR", Some("   \n"), "{}");
        assert_eq!(messages.len(), 5);
    }
}
