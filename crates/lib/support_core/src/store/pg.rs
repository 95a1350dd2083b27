//! PostgreSQL implementation of [`SupportStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, SupportStore};
use crate::auth::queries as users;
use crate::ledger;
use crate::models::auth::{NewUser, User, UserWithPassword};
use crate::models::support::{Customer, Message, NewMessage};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Store backed by a shared sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[async_trait]
impl SupportStore for PgStore {
    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        Ok(users::find_user_by_email(&self.pool, email).await?)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(users::email_exists(&self.pool, email).await?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        users::create_user(&self.pool, &new_user)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate(format!("email '{}'", new_user.email))
                } else {
                    StoreError::Db(e)
                }
            })
    }

    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        Ok(ledger::find_customer_by_name(&self.pool, name).await?)
    }

    async fn create_customer(&self, name: &str) -> Result<Customer, StoreError> {
        Ok(ledger::create_customer(&self.pool, name).await?)
    }

    async fn insert_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        Ok(ledger::insert_message(&self.pool, &message).await?)
    }

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>, StoreError> {
        Ok(ledger::get_message(&self.pool, &id).await?)
    }

    async fn list_messages(
        &self,
        priority: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, StoreError> {
        Ok(ledger::list_messages(&self.pool, priority, limit).await?)
    }

    async fn update_suggested_response(
        &self,
        message_id: Uuid,
        suggestion: &str,
    ) -> Result<u64, StoreError> {
        Ok(ledger::update_suggested_response(&self.pool, &message_id, suggestion).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::DEFAULT_ROLE;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            name: "Agent".into(),
            password_hash: "$2b$12$hash".into(),
            role: DEFAULT_ROLE.into(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn ping_reports_connected(pool: PgPool) {
        assert!(PgStore::new(pool).ping().await);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn duplicate_email_maps_to_duplicate(pool: PgPool) {
        let store = PgStore::new(pool);
        let user = store
            .create_user(new_user("agent@example.com"))
            .await
            .expect("first insert");
        assert_eq!(user.role, DEFAULT_ROLE);

        let err = store
            .create_user(new_user("agent@example.com"))
            .await
            .unwrap_err();
        match err {
            StoreError::Duplicate(what) => assert!(what.contains("agent@example.com"), "{what}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn user_lookup_carries_password_hash(pool: PgPool) {
        let store = PgStore::new(pool);
        assert!(!store.email_exists("a@example.com").await.expect("exists"));

        let created = store.create_user(new_user("a@example.com")).await.expect("insert");
        assert!(store.email_exists("a@example.com").await.expect("exists"));

        let found = store
            .find_user_by_email("a@example.com")
            .await
            .expect("find")
            .expect("user");
        assert_eq!(found.user, created);
        assert_eq!(found.password_hash, "$2b$12$hash");
        assert!(store.find_user_by_email("A@example.com").await.expect("find").is_none());
    }
}
