//! Bucket store contract and in-memory implementation
//!
//! This module defines the key/set storage abstraction the access-control
//! engine runs on, along with the in-memory backend used for tests and
//! single-process deployments.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Could not reach the backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A named collection of keys, each key mapping to a set of string members.
///
/// This is the only interface the access-control engine uses to persist
/// state. There are no joins and no recursive queries: graph traversal and
/// permission matching are implemented entirely above this layer.
///
/// # Contract
///
/// - Adding an existing member is idempotent; removing an absent member is
///   not an error.
/// - An absent key is indistinguishable from an empty set.
/// - Add/remove must be atomic per key. The engine issues concurrent
///   operations without locking of its own and relies on this guarantee.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Add members to the set at `key`, creating the key if absent.
    async fn add_to_set(&self, bucket: &str, key: &str, members: &[String]) -> StoreResult<()>;

    /// Remove members from the set at `key` if present.
    async fn remove_from_set(&self, bucket: &str, key: &str, members: &[String])
        -> StoreResult<()>;

    /// Get all members of the set at `key`. Absent keys yield an empty set.
    async fn get_set(&self, bucket: &str, key: &str) -> StoreResult<HashSet<String>>;

    /// Check whether `member` is in the set at `key`.
    async fn is_member(&self, bucket: &str, key: &str, member: &str) -> StoreResult<bool>;

    /// Delete the key entirely.
    async fn remove_key(&self, bucket: &str, key: &str) -> StoreResult<()>;
}

/// In-memory bucket store.
///
/// Suitable for tests and single-process applications. For shared or
/// persistent deployments, use the Redis backend.
///
/// Cloning is cheap and clones share the same underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    /// bucket -> key -> members
    buckets: Arc<RwLock<HashMap<String, HashMap<String, HashSet<String>>>>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish()
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BucketStore for MemoryStore {
    async fn add_to_set(&self, bucket: &str, key: &str, members: &[String]) -> StoreResult<()> {
        if members.is_empty() {
            return Ok(());
        }

        let mut buckets = self.buckets.write().await;
        let set = buckets
            .entry(bucket.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default();
        for member in members {
            set.insert(member.clone());
        }

        Ok(())
    }

    async fn remove_from_set(
        &self,
        bucket: &str,
        key: &str,
        members: &[String],
    ) -> StoreResult<()> {
        if members.is_empty() {
            return Ok(());
        }

        let mut buckets = self.buckets.write().await;
        if let Some(set) = buckets.get_mut(bucket).and_then(|b| b.get_mut(key)) {
            for member in members {
                set.remove(member);
            }
        }

        Ok(())
    }

    async fn get_set(&self, bucket: &str, key: &str) -> StoreResult<HashSet<String>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(bucket)
            .and_then(|b| b.get(key))
            .cloned()
            .unwrap_or_default())
    }

    async fn is_member(&self, bucket: &str, key: &str, member: &str) -> StoreResult<bool> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(bucket)
            .and_then(|b| b.get(key))
            .map(|set| set.contains(member))
            .unwrap_or(false))
    }

    async fn remove_key(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let mut buckets = self.buckets.write().await;
        if let Some(b) = buckets.get_mut(bucket) {
            b.remove(key);
        }

        Ok(())
    }
}
