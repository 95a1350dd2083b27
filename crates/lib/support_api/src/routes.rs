//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";
pub const POST_API_REGISTER: &str = "/api/register";
pub const POST_API_LOGIN: &str = "/api/login";
/// Catch-all for unknown API paths.
pub const API_FALLBACK: &str = "/api/{*rest}";
/// `POST` creates, `GET` lists.
pub const API_MESSAGES: &str = "/api/messages";
pub const GET_API_MESSAGES_SENTIMENT_TRENDS: &str = "/api/messages/sentiment-trends";
pub const GET_API_MESSAGES_ID: &str = "/api/messages/{id}";
pub const GET_API_MESSAGES_ID_SUMMARY: &str = "/api/messages/{id}/summary";
pub const POST_API_MESSAGES_ID_SUGGEST_REPLY: &str = "/api/messages/{id}/suggest-reply";
