//! Customer, message and analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enrichment::Classification;

/// A message sender, matched by exact display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One inbound customer message with its enrichment fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub content: String,
    pub sentiment: String,
    pub category: String,
    pub priority: String,
    pub urgency_level: String,
    pub created_at: DateTime<Utc>,
}

/// A message ready to be persisted. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub content: String,
    pub sentiment: String,
    pub category: String,
    pub priority: String,
    pub urgency_level: String,
}

impl NewMessage {
    /// Combine a resolved customer, the raw content and a classification.
    pub fn new(customer: &Customer, content: &str, classification: Classification) -> Self {
        Self {
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            content: content.to_string(),
            sentiment: classification.sentiment,
            category: classification.category,
            priority: classification.priority,
            urgency_level: classification.urgency_level,
        }
    }
}

/// Cached analysis for a message. At most one row per message by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AiAnalysis {
    pub id: Uuid,
    pub message_id: Uuid,
    pub summary: String,
    pub suggested_response: String,
    pub sentiment_score: f64,
    pub created_at: DateTime<Utc>,
}
