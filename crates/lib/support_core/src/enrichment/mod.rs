//! AI enrichment: classification, summaries and reply drafts from a remote model.
//!
//! # Public API
//!
//! - [`Enricher`]: the seam the intake workflows call
//! - [`Classification`]: typed result of [`Enricher::analyze`]
//! - [`gemini::GeminiClient`]: Google Gemini `generateContent` implementation
//!
//! Every call is a single attempt: no retry, no backoff. Callers surface
//! failures to their own caller.

pub mod classification;
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::support::Message;

pub use classification::Classification;

/// Errors that can occur while talking to the model provider.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    Decode(String),
}

/// Operations backed by the remote language model.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Classify a message into sentiment, category, priority and urgency.
    async fn analyze(&self, content: &str) -> Result<Classification, EnrichmentError>;

    /// Summarize a conversation in two or three sentences.
    async fn summarize(&self, messages: &[String]) -> Result<String, EnrichmentError>;

    /// Draft an agent reply in the customer's language.
    async fn suggest_reply(
        &self,
        content: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<String, EnrichmentError>;

    /// Short paragraph describing sentiment trends across recent messages.
    async fn sentiment_trends(&self, messages: &[Message]) -> Result<String, EnrichmentError>;
}
