//! Extraction strategies
//!
//! Two interchangeable strategies produce [`ExtractedFields`] from the raw
//! inquiry text:
//!
//! 1. **model_client** - chat-completion endpoint extraction (network I/O)
//! 2. **rule_based** - deterministic keyword/regex fallback (pure)
//!
//! Both sit behind the [`Extractor`] trait so the HTTP layer and tests can
//! treat them uniformly, and so a fake transport can stand in for the real
//! endpoint. A failed model extraction is reported to the caller; the caller
//! decides whether to retry or to fall back. There is no silent fallback.

pub mod model_client;
pub mod rule_based;

pub use model_client::{ChatTransport, HttpChatTransport, ModelExtractor};
pub use rule_based::RuleBasedExtractor;

use licops_common::ExtractedFields;
use thiserror::Error;

/// Extraction failure taxonomy
///
/// All variants are recoverable: the record store is untouched and the user
/// may retry or choose the fallback strategy.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Endpoint unreachable, timed out, rate limited, or rejected the credential
    #[error("model endpoint failure: {0}")]
    Transport(String),

    /// Response was not the expected JSON object (after fence stripping)
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

/// Extraction strategy interface
///
/// Implementations must never panic across this boundary; every internal
/// failure of the model-backed path surfaces as an [`ExtractionError`].
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Strategy name for logging and provenance
    fn name(&self) -> &'static str;

    /// Produce structured fields from the raw inquiry text
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError>;
}
