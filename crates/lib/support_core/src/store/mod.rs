//! Storage seam for the four support tables.
//!
//! Workflows talk to a [`SupportStore`] instead of a pool so the HTTP layer
//! can be exercised against [`memory::MemoryStore`] in tests. Production uses
//! [`pg::PgStore`].

#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod pg;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::{NewUser, User, UserWithPassword};
use crate::models::support::{Customer, Message, NewMessage};

pub use pg::PgStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Persistence operations used by the auth flows and the intake workflows.
#[async_trait]
pub trait SupportStore: Send + Sync {
    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> bool;

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a user. Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// First customer (oldest) whose name equals `name` exactly.
    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError>;

    async fn create_customer(&self, name: &str) -> Result<Customer, StoreError>;

    async fn insert_message(&self, message: NewMessage) -> Result<Message, StoreError>;

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>, StoreError>;

    /// Newest first, optional exact priority filter, optional row limit.
    async fn list_messages(
        &self,
        priority: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, StoreError>;

    /// Update-if-exists on the analysis row for `message_id`; returns rows touched.
    async fn update_suggested_response(
        &self,
        message_id: Uuid,
        suggestion: &str,
    ) -> Result<u64, StoreError>;
}
