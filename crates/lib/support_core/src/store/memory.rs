//! In-process [`SupportStore`] for tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{StoreError, SupportStore};
use crate::models::auth::{NewUser, User, UserWithPassword};
use crate::models::support::{AiAnalysis, Customer, Message, NewMessage};
use crate::uuid::uuidv7;

#[derive(Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    customers: Vec<Customer>,
    messages: Vec<Message>,
    analyses: Vec<AiAnalysis>,
}

/// Vec-backed store mirroring the PostgreSQL semantics the workflows rely on.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn customer_count(&self) -> usize {
        self.tables.lock().await.customers.len()
    }

    pub async fn message_count(&self) -> usize {
        self.tables.lock().await.messages.len()
    }

    pub async fn analysis_count(&self) -> usize {
        self.tables.lock().await.analyses.len()
    }

    /// Seed an analysis row for a message (ingestion never creates one).
    pub async fn insert_analysis(&self, message_id: Uuid, summary: &str, score: f64) -> AiAnalysis {
        let analysis = AiAnalysis {
            id: uuidv7(),
            message_id,
            summary: summary.to_string(),
            suggested_response: String::new(),
            sentiment_score: score,
            created_at: Utc::now(),
        };
        self.tables.lock().await.analyses.push(analysis.clone());
        analysis
    }

    pub async fn analysis_for(&self, message_id: Uuid) -> Option<AiAnalysis> {
        self.tables
            .lock()
            .await
            .analyses
            .iter()
            .find(|a| a.message_id == message_id)
            .cloned()
    }
}

#[async_trait]
impl SupportStore for MemoryStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().any(|u| u.user.email == email))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.user.email == new_user.email) {
            return Err(StoreError::Duplicate(format!("email '{}'", new_user.email)));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            role: new_user.role,
            created_at: Utc::now(),
        };
        tables.users.push(UserWithPassword {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }

    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.customers.iter().find(|c| c.name == name).cloned())
    }

    async fn create_customer(&self, name: &str) -> Result<Customer, StoreError> {
        let customer = Customer {
            id: uuidv7(),
            name: name.to_string(),
            email: None,
            created_at: Utc::now(),
        };
        self.tables.lock().await.customers.push(customer.clone());
        Ok(customer)
    }

    async fn insert_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.customers.iter().any(|c| c.id == message.customer_id) {
            return Err(StoreError::Db(sqlx::Error::RowNotFound));
        }
        let stored = Message {
            id: uuidv7(),
            customer_id: message.customer_id,
            customer_name: message.customer_name,
            content: message.content,
            sentiment: message.sentiment,
            category: message.category,
            priority: message.priority,
            urgency_level: message.urgency_level,
            created_at: Utc::now(),
        };
        tables.messages.push(stored.clone());
        Ok(stored)
    }

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_messages(
        &self,
        priority: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| priority.is_none_or(|p| m.priority == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(rows)
    }

    async fn update_suggested_response(
        &self,
        message_id: Uuid,
        suggestion: &str,
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let mut touched = 0;
        for analysis in tables.analyses.iter_mut().filter(|a| a.message_id == message_id) {
            analysis.suggested_response = suggestion.to_string();
            touched += 1;
        }
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(customer: &Customer, priority: &str) -> NewMessage {
        NewMessage {
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            content: "hello".into(),
            sentiment: "Neutral".into(),
            category: "General Question".into(),
            priority: priority.into(),
            urgency_level: "Low".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let user = NewUser {
            email: "a@example.com".into(),
            name: "A".into(),
            password_hash: "x".into(),
            role: "agent".into(),
        };
        store.create_user(user.clone()).await.expect("first insert");
        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_priority() {
        let store = MemoryStore::new();
        let customer = store.create_customer("Budi").await.expect("customer");
        let first = store
            .insert_message(new_message(&customer, "High"))
            .await
            .expect("insert");
        let second = store
            .insert_message(new_message(&customer, "Low"))
            .await
            .expect("insert");

        let all = store.list_messages(None, None).await.expect("list");
        assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let high = store.list_messages(Some("High"), None).await.expect("list");
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, first.id);

        let limited = store.list_messages(None, Some(1)).await.expect("list");
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn message_requires_existing_customer() {
        let store = MemoryStore::new();
        let ghost = Customer {
            id: uuidv7(),
            name: "ghost".into(),
            email: None,
            created_at: Utc::now(),
        };
        assert!(store.insert_message(new_message(&ghost, "Low")).await.is_err());
    }

    #[tokio::test]
    async fn suggested_response_update_never_creates_rows() {
        let store = MemoryStore::new();
        let id = uuidv7();
        assert_eq!(store.update_suggested_response(id, "hi").await.expect("update"), 0);
        assert_eq!(store.analysis_count().await, 0);

        store.insert_analysis(id, "summary", 0.4).await;
        assert_eq!(store.update_suggested_response(id, "hi").await.expect("update"), 1);
        assert_eq!(store.analysis_for(id).await.expect("row").suggested_response, "hi");
    }
}
