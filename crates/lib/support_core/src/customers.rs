//! Customer directory: find-or-create by exact display name.

use tracing::info;

use crate::models::support::Customer;
use crate::store::{StoreError, SupportStore};

/// Return the first customer named exactly `name`, creating one if none exists.
///
/// There is no uniqueness constraint on name, so two concurrent calls with an
/// unseen name can both create a row. Later lookups return the oldest.
pub async fn resolve_or_create(
    store: &dyn SupportStore,
    name: &str,
) -> Result<Customer, StoreError> {
    if let Some(existing) = store.find_customer_by_name(name).await? {
        return Ok(existing);
    }
    let customer = store.create_customer(name).await?;
    info!(customer_id = %customer.id, "created customer");
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn same_name_reuses_customer() {
        let store = MemoryStore::new();
        let a = resolve_or_create(&store, "Budi Santoso").await.expect("create");
        let b = resolve_or_create(&store, "Budi Santoso").await.expect("resolve");
        assert_eq!(a.id, b.id);
        assert_eq!(store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn matching_is_exact() {
        let store = MemoryStore::new();
        let a = resolve_or_create(&store, "Budi").await.expect("create");
        let b = resolve_or_create(&store, "budi").await.expect("create");
        let c = resolve_or_create(&store, "Budi ").await.expect("create");
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.customer_count().await, 3);
    }
}
