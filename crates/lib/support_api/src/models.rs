//! Request and response bodies.

use serde::{Deserialize, Serialize};
use support_core::models::auth::User;

/// Error envelope returned by every failing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token plus the authenticated user.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub customer_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesQuery {
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentimentTrendsQuery {
    pub limit: Option<i64>,
}

/// `{ "data": ... }` wrapper used by the read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyContext {
    pub sentiment: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestReplyResponse {
    pub suggested_response: String,
    pub context: ReplyContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentTrendsResponse {
    pub analysis: String,
    pub message_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}
