//! Model-backed extractor
//!
//! Sends the raw inquiry text inside a fixed instruction prompt to a
//! chat-completion endpoint and parses the strict-JSON reply into
//! [`ExtractedFields`]. The network sits behind the [`ChatTransport`] trait
//! so tests substitute a fake; the production transport is
//! [`HttpChatTransport`] (reqwest, bounded timeout, one retry on transient
//! failure).
//!
//! Failure handling: transport/auth problems and malformed replies are both
//! recoverable [`ExtractionError`]s. There is no partial-record salvage
//! from a half-usable reply.

use super::{ExtractionError, Extractor};
use licops_common::{DataType, ExtractedFields, RiskLevel};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Default chat-completion API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Bounded timeout for extraction requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fixed instruction prompt; the raw inquiry text is appended
const INSTRUCTION_PROMPT: &str = r#"You are a Legal Ops data entry specialist. Analyze this inbound licensing inquiry.
Return ONLY a raw JSON object (no markdown, no conversational text) with these keys:
- partner_name (string)
- data_type (string: "Audio", "Text", "Video", "Code", "Multimodal")
- risk_level (string: "High", "Medium", "Low")
- estimated_value (integer: derived from text or assign 0 if unknown)
- summary (string: a 1-sentence legal summary)

Inquiry: "#;

/// Transport abstraction over the chat-completion endpoint
///
/// One request per extraction attempt, no streaming. Tests implement this
/// with canned replies; production uses [`HttpChatTransport`].
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one user-role message and return the assistant reply body
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ExtractionError>;
}

/// HTTP transport for the chat-completion endpoint
pub struct HttpChatTransport {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChatTransport {
    /// Create a transport against the given endpoint
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn attempt(&self, model: &str, prompt: &str) -> Result<String, TransportAttempt> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http_client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    TransportAttempt::Transient(format!("request failed: {}", e))
                } else {
                    TransportAttempt::Fatal(ExtractionError::Transport(e.to_string()))
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(TransportAttempt::Transient(format!("status {}", status)));
        }
        if !status.is_success() {
            // 401/403 etc: invalid credential, not worth a retry
            return Err(TransportAttempt::Fatal(ExtractionError::Transport(format!(
                "endpoint returned {}",
                status
            ))));
        }

        let envelope: ChatEnvelope = response.json().await.map_err(|e| {
            TransportAttempt::Fatal(ExtractionError::MalformedOutput(format!(
                "unreadable response envelope: {}",
                e
            )))
        })?;

        envelope
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                TransportAttempt::Fatal(ExtractionError::MalformedOutput(
                    "response contained no choices".to_string(),
                ))
            })
    }
}

/// Outcome of a single transport attempt; transient failures get one retry
enum TransportAttempt {
    Transient(String),
    Fatal(ExtractionError),
}

#[async_trait::async_trait]
impl ChatTransport for HttpChatTransport {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ExtractionError> {
        match self.attempt(model, prompt).await {
            Ok(content) => Ok(content),
            Err(TransportAttempt::Fatal(err)) => Err(err),
            Err(TransportAttempt::Transient(reason)) => {
                warn!(reason = %reason, "Transient model endpoint failure, retrying once");
                match self.attempt(model, prompt).await {
                    Ok(content) => Ok(content),
                    Err(TransportAttempt::Fatal(err)) => Err(err),
                    Err(TransportAttempt::Transient(reason)) => {
                        Err(ExtractionError::Transport(reason))
                    }
                }
            }
        }
    }
}

/// Chat-completion response envelope
#[derive(Debug, Deserialize)]
struct ChatEnvelope {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Raw field set as emitted by the model, before vocabulary mapping
///
/// `estimated_value` is unsigned here so a negative amount fails the parse
/// outright instead of being clamped into a half-valid record.
#[derive(Debug, Deserialize)]
struct RawModelFields {
    partner_name: String,
    data_type: String,
    risk_level: String,
    estimated_value: u64,
    summary: String,
}

/// Model-backed extraction strategy
pub struct ModelExtractor<T: ChatTransport> {
    transport: T,
    model: String,
}

impl<T: ChatTransport> ModelExtractor<T> {
    /// Create an extractor over the given transport
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl<T: ChatTransport> Extractor for ModelExtractor<T> {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        let prompt = format!("{}\"{}\"", INSTRUCTION_PROMPT, raw_text);
        let content = self.transport.complete(&self.model, &prompt).await?;

        debug!(bytes = content.len(), "Model reply received");
        parse_model_output(&content)
    }
}

/// Strip Markdown code-fence wrappers from a model reply
///
/// Models routinely wrap the JSON in ```json fences despite the prompt;
/// mirror of the sanitization the endpoint contract requires.
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a (possibly fenced) model reply into extracted fields
///
/// Malformed JSON, missing fields, unknown category/risk labels: all
/// [`ExtractionError::MalformedOutput`], no salvage.
pub fn parse_model_output(reply: &str) -> Result<ExtractedFields, ExtractionError> {
    let cleaned = strip_code_fences(reply);

    let raw: RawModelFields = serde_json::from_str(&cleaned)
        .map_err(|e| ExtractionError::MalformedOutput(format!("invalid JSON: {}", e)))?;

    let data_type = DataType::from_label(&raw.data_type).ok_or_else(|| {
        ExtractionError::MalformedOutput(format!("unknown data_type label: {:?}", raw.data_type))
    })?;
    let risk_level = RiskLevel::from_label(&raw.risk_level).ok_or_else(|| {
        ExtractionError::MalformedOutput(format!("unknown risk_level label: {:?}", raw.risk_level))
    })?;

    Ok(ExtractedFields {
        partner_name: raw.partner_name,
        data_type,
        risk_level,
        estimated_value: raw.estimated_value,
        summary: raw.summary,
    })
}
