use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Card, User};

use super::{CardStore, RecordStore, UserStore};

/// In-memory user store. Used by the test suite and local runs; iteration
/// order is key order.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<BTreeMap<i64, User>>,
}

#[async_trait]
impl RecordStore<i64, User> for MemoryUserStore {
    async fn exists(&self, key: &i64) -> anyhow::Result<bool> {
        Ok(self.rows.read().await.contains_key(key))
    }

    async fn get(&self, key: &i64) -> anyhow::Result<Option<User>> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn put(&self, key: i64, value: User) -> anyhow::Result<User> {
        self.rows.write().await.insert(key, value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &i64) -> anyhow::Result<Option<User>> {
        Ok(self.rows.write().await.remove(key))
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email && u.password == password)
            .cloned())
    }
}

/// In-memory card store, keyed by card number.
#[derive(Default)]
pub struct MemoryCardStore {
    rows: RwLock<BTreeMap<String, Card>>,
}

#[async_trait]
impl RecordStore<String, Card> for MemoryCardStore {
    async fn exists(&self, key: &String) -> anyhow::Result<bool> {
        Ok(self.rows.read().await.contains_key(key))
    }

    async fn get(&self, key: &String) -> anyhow::Result<Option<Card>> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn put(&self, key: String, value: Card) -> anyhow::Result<Card> {
        self.rows.write().await.insert(key, value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &String) -> anyhow::Result<Option<Card>> {
        Ok(self.rows.write().await.remove(key))
    }

    async fn list(&self) -> anyhow::Result<Vec<Card>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn find_by_owner(&self, user_id: i64) -> anyhow::Result<Option<Card>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn find_by_master(&self, master_id: i64) -> anyhow::Result<Vec<Card>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|c| c.master_id == master_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardStatus;

    fn card(number: &str, user_id: i64, master_id: i64) -> Card {
        Card {
            card_number: number.into(),
            user_id,
            master_id,
            card_holder_name: "Jane Doe".into(),
            status: CardStatus::Active,
            spending_limit: 1000.0,
            expiry_date: "04/2030".into(),
        }
    }

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let store = MemoryCardStore::default();
        let key = "4000-1111".to_string();

        assert!(!store.exists(&key).await.unwrap());
        store.put(key.clone(), card(&key, 1, 1)).await.unwrap();
        assert!(store.exists(&key).await.unwrap());
        assert_eq!(store.get(&key).await.unwrap().unwrap().user_id, 1);

        let removed = store.delete(&key).await.unwrap().unwrap();
        assert_eq!(removed.card_number, key);
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.delete(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_and_find_by_master_follow_key_order() {
        let store = MemoryCardStore::default();
        for number in ["c", "a", "b"] {
            store
                .put(number.to_string(), card(number, 9, 5))
                .await
                .unwrap();
        }

        let listed: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.card_number)
            .collect();
        assert_eq!(listed, ["a", "b", "c"]);

        let subs = store.find_by_master(5).await.unwrap();
        assert_eq!(subs.len(), 3);
        assert!(store.find_by_master(6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn credential_lookup_is_exact() {
        let store = MemoryUserStore::default();
        let user = User {
            user_id: 1,
            name: "Jane".into(),
            email: "jane@example.org".into(),
            password: "s3cret".into(),
            contact_number: "42".into(),
        };
        store.put(1, user).await.unwrap();

        assert!(store
            .find_by_credentials("jane@example.org", "s3cret")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_credentials("jane@example.org", "S3CRET")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_credentials("JANE@example.org", "s3cret")
            .await
            .unwrap()
            .is_none());
    }
}
