//! Message intake request handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use support_core::intake;
use support_core::models::support::Message;
use uuid::Uuid;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateMessageRequest, DataResponse, ListMessagesQuery, ReplyContext, SentimentTrendsQuery,
    SentimentTrendsResponse, SuggestReplyResponse, SummaryResponse,
};

/// Malformed ids can never match a stored message, so they are reported as missing.
fn parse_message_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Message not found".into()))
}

/// `POST /api/messages` — classify and store an inbound customer message.
pub async fn create_message_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let Json(body) = body?;
    if body.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer_name is required".into()));
    }
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content is required".into()));
    }

    let message = intake::ingest(
        state.store.as_ref(),
        state.enricher.as_ref(),
        &body.customer_name,
        &body.content,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /api/messages` — newest first, optional `?priority=` filter.
pub async fn list_messages_handler(
    State(state): State<AppState>,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let Query(query) = query?;
    let data = intake::list_messages(state.store.as_ref(), query.priority.as_deref()).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /api/messages/{id}`
pub async fn get_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Message>>> {
    let id = parse_message_id(&id)?;
    let data = intake::get_message(state.store.as_ref(), id).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /api/messages/{id}/summary`
pub async fn summary_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SummaryResponse>> {
    let id = parse_message_id(&id)?;
    let summary = intake::summarize(state.store.as_ref(), state.enricher.as_ref(), id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// `POST /api/messages/{id}/suggest-reply`
pub async fn suggest_reply_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuggestReplyResponse>> {
    let id = parse_message_id(&id)?;
    let suggestion =
        intake::suggest_reply(state.store.as_ref(), state.enricher.as_ref(), id).await?;
    Ok(Json(SuggestReplyResponse {
        suggested_response: suggestion.suggested_response,
        context: ReplyContext {
            sentiment: suggestion.sentiment,
            category: suggestion.category,
        },
    }))
}

/// `GET /api/messages/sentiment-trends` — trend paragraph over recent messages.
pub async fn sentiment_trends_handler(
    State(state): State<AppState>,
    query: Result<Query<SentimentTrendsQuery>, QueryRejection>,
) -> AppResult<Json<SentimentTrendsResponse>> {
    let Query(query) = query?;
    let report =
        intake::sentiment_trends(state.store.as_ref(), state.enricher.as_ref(), query.limit)
            .await?;
    Ok(Json(SentimentTrendsResponse {
        analysis: report.analysis,
        message_count: report.message_count,
    }))
}
