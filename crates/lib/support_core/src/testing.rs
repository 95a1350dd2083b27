//! Deterministic test doubles for the store and the enricher.
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for integration tests in dependent crates.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::enrichment::{Classification, Enricher, EnrichmentError};
use crate::models::support::Message;

pub use crate::store::memory::MemoryStore;

const URGENT_WORDS: &[&str] = &["urgent", "asap", "immediately", "critical"];
const ANGRY_WORDS: &[&str] = &["angry", "furious", "unacceptable"];
const FRUSTRATED_WORDS: &[&str] = &["frustrat", "annoyed", "kesal"];
const HAPPY_WORDS: &[&str] = &["thank", "great", "love", "terima kasih"];
const TECHNICAL_WORDS: &[&str] = &["bug", "error", "cannot login", "crash"];
const BILLING_WORDS: &[&str] = &["invoice", "payment", "refund", "charged"];

fn mentions(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Keyword classifier that follows the same rules the analysis prompt asks
/// the model to apply. Output depends only on the input.
#[derive(Debug, Default, Clone)]
pub struct KeywordEnricher;

impl KeywordEnricher {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(content: &str) -> Classification {
        let text = content.to_lowercase();

        let (sentiment, score) = if mentions(&text, ANGRY_WORDS) {
            ("Angry", 0.1)
        } else if mentions(&text, FRUSTRATED_WORDS) {
            ("Frustrated", 0.25)
        } else if mentions(&text, HAPPY_WORDS) {
            ("Happy", 0.9)
        } else {
            ("Neutral", 0.5)
        };

        let category = if mentions(&text, TECHNICAL_WORDS) {
            "Technical"
        } else if mentions(&text, BILLING_WORDS) {
            "Billing"
        } else if text.contains("feature") {
            "Feature Request"
        } else {
            "General Question"
        };

        let upset = matches!(sentiment, "Angry" | "Frustrated");
        let priority = if mentions(&text, URGENT_WORDS) {
            "High"
        } else if upset {
            "Medium"
        } else {
            "Low"
        };
        let urgency_level = if upset { "High" } else { priority };

        Classification {
            sentiment: sentiment.into(),
            category: category.into(),
            priority: priority.into(),
            urgency_level: urgency_level.into(),
            sentiment_score: score,
        }
    }
}

#[async_trait]
impl Enricher for KeywordEnricher {
    async fn analyze(&self, content: &str) -> Result<Classification, EnrichmentError> {
        Ok(Self::classify(content))
    }

    async fn summarize(&self, messages: &[String]) -> Result<String, EnrichmentError> {
        let first = messages.first().map(String::as_str).unwrap_or_default();
        Ok(format!("Summary of {} message(s): {first}", messages.len()))
    }

    async fn suggest_reply(
        &self,
        content: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<String, EnrichmentError> {
        let opening = if matches!(sentiment, "Angry" | "Frustrated") {
            "We are very sorry for the trouble."
        } else {
            "Thank you for reaching out."
        };
        Ok(format!(
            "Hello! {opening} Our {category} team is looking into \"{content}\" and will follow up shortly."
        ))
    }

    async fn sentiment_trends(&self, messages: &[Message]) -> Result<String, EnrichmentError> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for m in messages {
            *counts.entry(m.sentiment.as_str()).or_default() += 1;
        }
        let dominant = counts
            .iter()
            .max_by_key(|(_, n)| **n)
            .map(|(s, _)| *s)
            .unwrap_or("Neutral");
        Ok(format!(
            "{} messages analyzed; dominant sentiment: {dominant}.",
            messages.len()
        ))
    }
}

/// Enricher whose every call fails as if the provider were down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEnricher;

#[async_trait]
impl Enricher for FailingEnricher {
    async fn analyze(&self, _content: &str) -> Result<Classification, EnrichmentError> {
        Err(EnrichmentError::EmptyResponse)
    }

    async fn summarize(&self, _messages: &[String]) -> Result<String, EnrichmentError> {
        Err(EnrichmentError::EmptyResponse)
    }

    async fn suggest_reply(
        &self,
        _content: &str,
        _sentiment: &str,
        _category: &str,
    ) -> Result<String, EnrichmentError> {
        Err(EnrichmentError::EmptyResponse)
    }

    async fn sentiment_trends(&self, _messages: &[Message]) -> Result<String, EnrichmentError> {
        Err(EnrichmentError::EmptyResponse)
    }
}
