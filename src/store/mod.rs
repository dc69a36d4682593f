use async_trait::async_trait;

use crate::model::{Card, User};

pub mod memory;
pub mod postgres;

/// Key-addressed record store. Each call is atomic on its own; sequences of
/// calls are not, so check-then-act callers must serialize externally.
#[async_trait]
pub trait RecordStore<K, V>: Send + Sync {
    async fn exists(&self, key: &K) -> anyhow::Result<bool>;
    async fn get(&self, key: &K) -> anyhow::Result<Option<V>>;
    /// Upsert. Returns the record as stored.
    async fn put(&self, key: K, value: V) -> anyhow::Result<V>;
    /// Removes and returns the prior record, if any.
    async fn delete(&self, key: &K) -> anyhow::Result<Option<V>>;
    async fn list(&self) -> anyhow::Result<Vec<V>>;
}

/// User records keyed by user id, plus the secondary lookups login needs.
#[async_trait]
pub trait UserStore: RecordStore<i64, User> {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Exact, case-sensitive match on the stored (email, password) pair.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>>;
}

/// Card records keyed by card number, plus the ownership lookups.
#[async_trait]
pub trait CardStore: RecordStore<String, Card> {
    /// First card whose `user_id` matches, if any.
    async fn find_by_owner(&self, user_id: i64) -> anyhow::Result<Option<Card>>;
    /// Every card whose `master_id` matches, in store order.
    async fn find_by_master(&self, master_id: i64) -> anyhow::Result<Vec<Card>>;
}
