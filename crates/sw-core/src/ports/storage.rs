//! Durable key-value store port
//!
//! String keys, JSON-serialized string values. Mirrors the browser's local
//! storage contract; implementations may be file-backed or in-memory.

use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> anyhow::Result<()>;

    async fn contains_key(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.get_item(key).await?.is_some())
    }
}
