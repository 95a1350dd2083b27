//! Message intake workflows.
//!
//! Each workflow reads the authoritative state from the store and stops at the
//! first failing step. Nothing is retried and nothing is rolled back: a
//! customer created in `ingest` survives a failed message insert.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::customers;
use crate::enrichment::{Enricher, EnrichmentError};
use crate::models::support::{Message, NewMessage};
use crate::store::{StoreError, SupportStore};

/// Default number of recent messages fed to the trend analysis.
pub const DEFAULT_TREND_WINDOW: i64 = 20;

/// Upper bound on the trend analysis window.
pub const MAX_TREND_WINDOW: i64 = 100;

/// Intake workflow errors.
#[derive(Debug, Error)]
pub enum SupportError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Message not found: {0}")]
    NotFound(String),

    #[error("Enrichment failed: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

/// A drafted reply plus the classification it was drafted from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplySuggestion {
    pub suggested_response: String,
    pub sentiment: String,
    pub category: String,
}

/// Trend paragraph and how many messages it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub analysis: String,
    pub message_count: usize,
}

/// Classify, resolve the sender, persist.
pub async fn ingest(
    store: &dyn SupportStore,
    enricher: &dyn Enricher,
    customer_name: &str,
    content: &str,
) -> Result<Message, SupportError> {
    let classification = enricher.analyze(content).await?;
    debug!(
        sentiment = %classification.sentiment,
        category = %classification.category,
        priority = %classification.priority,
        "message classified"
    );

    let customer = customers::resolve_or_create(store, customer_name).await?;
    let message = store
        .insert_message(NewMessage::new(&customer, content, classification))
        .await?;

    info!(
        message_id = %message.id,
        customer_id = %message.customer_id,
        priority = %message.priority,
        "message ingested"
    );
    Ok(message)
}

/// Load a message or fail with [`SupportError::NotFound`].
pub async fn get_message(store: &dyn SupportStore, id: Uuid) -> Result<Message, SupportError> {
    store
        .get_message(id)
        .await?
        .ok_or_else(|| SupportError::NotFound(id.to_string()))
}

/// Newest first; an empty priority string means no filter.
pub async fn list_messages(
    store: &dyn SupportStore,
    priority: Option<&str>,
) -> Result<Vec<Message>, SupportError> {
    let priority = priority.filter(|p| !p.is_empty());
    Ok(store.list_messages(priority, None).await?)
}

/// Summarize a single stored message.
pub async fn summarize(
    store: &dyn SupportStore,
    enricher: &dyn Enricher,
    id: Uuid,
) -> Result<String, SupportError> {
    let message = get_message(store, id).await?;
    Ok(enricher.summarize(&[message.content]).await?)
}

/// Draft a reply and write it to the message's analysis row if one exists.
///
/// The cache write never creates a row and its failure is only logged.
pub async fn suggest_reply(
    store: &dyn SupportStore,
    enricher: &dyn Enricher,
    id: Uuid,
) -> Result<ReplySuggestion, SupportError> {
    let message = get_message(store, id).await?;
    let suggestion = enricher
        .suggest_reply(&message.content, &message.sentiment, &message.category)
        .await?;

    match store.update_suggested_response(message.id, &suggestion).await {
        Ok(0) => debug!(message_id = %message.id, "no analysis row to cache suggestion"),
        Ok(rows) => debug!(message_id = %message.id, rows, "cached suggested response"),
        Err(e) => warn!(message_id = %message.id, error = %e, "failed to cache suggested response"),
    }

    Ok(ReplySuggestion {
        suggested_response: suggestion,
        sentiment: message.sentiment,
        category: message.category,
    })
}

/// Describe sentiment trends across the most recent `limit` messages.
pub async fn sentiment_trends(
    store: &dyn SupportStore,
    enricher: &dyn Enricher,
    limit: Option<i64>,
) -> Result<TrendReport, SupportError> {
    let limit = limit
        .unwrap_or(DEFAULT_TREND_WINDOW)
        .clamp(1, MAX_TREND_WINDOW);
    let messages = store.list_messages(None, Some(limit)).await?;
    if messages.is_empty() {
        return Err(SupportError::Validation("no messages to analyze".into()));
    }
    let analysis = enricher.sentiment_trends(&messages).await?;
    Ok(TrendReport {
        analysis,
        message_count: messages.len(),
    })
}
