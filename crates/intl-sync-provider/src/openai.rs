// crates/intl-sync-provider/src/openai.rs
// ============================================================================
// Module: OpenAI Chat-Completion Client
// Description: Async Translator backed by an OpenAI-compatible API.
// Purpose: Issue translation requests and classify every failure mode.
// Dependencies: intl-sync-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! The client POSTs a chat-completion request with the fixed prompt chain
//! and parses the first choice's message content as a JSON locale tree.
//! Failures are reported as distinct [`ProviderError`] classes so the
//! orchestrator can surface connectivity problems differently from
//! provider rejections or malformed output. Responses that parse but do
//! not mirror the request shape are rejected by schema validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use intl_sync_core::LocaleTree;
use intl_sync_core::ProviderError;
use intl_sync_core::TranslationRequest;
use intl_sync_core::Translator;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::prompt::ChatMessage;
use crate::prompt::build_messages;
use crate::schema::validate_response;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// API operation name, used in connectivity diagnostics.
const CHAT_OPERATION: &str = "chat/completions";
/// Maximum provider error text carried into diagnostics, in characters.
const MAX_ERROR_CHARS: usize = 512;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the chat-completion client.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer token for the provider API.
    pub api_key: String,
    /// Chat model used for generation.
    pub model: String,
    /// Base URL of the OpenAI-compatible API, for example
    /// `https://api.openai.com/v1`.
    pub api_base: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

// ============================================================================
// SECTION: Wire Envelopes
// ============================================================================

/// Outbound chat-completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    /// Model identifier.
    model: &'a str,
    /// Role-tagged prompt chain.
    messages: &'a [ChatMessage],
}

/// Inbound chat-completion response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices; only the first is consumed.
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The generated message.
    message: ChatChoiceMessage,
}

/// The generated message of a completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    /// Generated text content.
    content: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Async [`Translator`] backed by an OpenAI-compatible chat API.
pub struct OpenAiTranslator {
    /// Client configuration.
    config: OpenAiConfig,
    /// Reused HTTP client with the configured timeout.
    client: reqwest::Client,
    /// Host extracted from the API base, for diagnostics.
    host: String,
}

impl OpenAiTranslator {
    /// Creates a client for the configured API base.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] when the API base is not a
    /// valid URL or the HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let parsed = Url::parse(&config.api_base).map_err(|err| ProviderError::Transport {
            host: config.api_base.clone(),
            reason: format!("invalid API base URL: {err}"),
        })?;
        let host = parsed.host_str().unwrap_or(&config.api_base).to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ProviderError::Transport {
                host: host.clone(),
                reason: format!("http client build failed: {err}"),
            })?;
        Ok(Self {
            config,
            client,
            host,
        })
    }

    /// Full URL of the chat-completion endpoint.
    fn endpoint(&self) -> String {
        format!("{}/{CHAT_OPERATION}", self.config.api_base.trim_end_matches('/'))
    }

    /// Maps a transport failure onto a [`ProviderError`] class.
    fn classify(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_connect() {
            ProviderError::Connect {
                host: self.host.clone(),
                operation: CHAT_OPERATION.to_string(),
            }
        } else {
            ProviderError::Transport {
                host: self.host.clone(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<LocaleTree, ProviderError> {
        let payload =
            serde_json::to_string(request.content).map_err(|err| ProviderError::Transport {
                host: self.host.clone(),
                reason: format!("request serialization failed: {err}"),
            })?;
        let messages = build_messages(request.target_locale, request.instruction, &payload);
        let body = ChatRequest {
            model: &self.config.model,
            messages: &messages,
        };
        debug!(
            locale = request.target_locale,
            model = self.config.model,
            "sending translation request"
        );
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.classify(&err))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: message.chars().take(MAX_ERROR_CHARS).collect(),
            });
        }
        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::MalformedResponse)?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::MalformedResponse)?;
        let tree: LocaleTree =
            serde_json::from_str(content.trim()).map_err(|_| ProviderError::MalformedResponse)?;
        validate_response(request.content, &tree)?;
        debug!(locale = request.target_locale, "translation response accepted");
        Ok(tree)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
