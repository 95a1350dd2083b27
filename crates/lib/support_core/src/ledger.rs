//! Customer, message and analysis persistence (PostgreSQL).

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::support::{Customer, Message, NewMessage};
use crate::uuid::uuidv7;

/// Find the oldest customer whose name matches exactly.
pub async fn find_customer_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, email, created_at
        FROM customers
        WHERE name = $1
        ORDER BY created_at ASC, id ASC
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Create a new customer with no email.
pub async fn create_customer(pool: &PgPool, name: &str) -> Result<Customer, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (id, name)
        VALUES ($1, $2)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(uuidv7())
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Insert a message, returning the stored row.
pub async fn insert_message(pool: &PgPool, message: &NewMessage) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages
            (id, customer_id, customer_name, content, sentiment, category, priority, urgency_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, customer_id, customer_name, content, sentiment, category,
                  priority, urgency_level, created_at
        "#,
    )
    .bind(uuidv7())
    .bind(message.customer_id)
    .bind(&message.customer_name)
    .bind(&message.content)
    .bind(&message.sentiment)
    .bind(&message.category)
    .bind(&message.priority)
    .bind(&message.urgency_level)
    .fetch_one(pool)
    .await
}

/// Get a message by ID.
pub async fn get_message(pool: &PgPool, id: &Uuid) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, customer_id, customer_name, content, sentiment, category,
               priority, urgency_level, created_at
        FROM messages
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List messages newest first, optionally filtered by exact priority.
pub async fn list_messages(
    pool: &PgPool,
    priority: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, customer_id, customer_name, content, sentiment, category,
               priority, urgency_level, created_at
        FROM messages
        WHERE ($1::text IS NULL OR priority = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(priority)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Set the suggested response on the analysis row(s) for a message.
///
/// Update-only: returns the number of rows touched, which is zero when no
/// analysis row exists yet.
pub async fn update_suggested_response(
    pool: &PgPool,
    message_id: &Uuid,
    suggestion: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE ai_analyses SET suggested_response = $1 WHERE message_id = $2")
        .bind(suggestion)
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
