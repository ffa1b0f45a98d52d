//! # Palisade Store
//!
//! Pluggable key/set storage backends for the Palisade access-control engine.
//!
//! ## Overview
//!
//! The engine keeps every granted/denied fact in a named **bucket** of keys,
//! each key holding a set of string members. This crate defines that contract
//! and ships two implementations:
//!
//! - [`MemoryStore`]: process-local, for tests and single-process embedding
//! - `RedisStore` (feature `redis`): one Redis key per `(bucket, key)` pair,
//!   backed by native Redis sets
//!
//! ## Contract
//!
//! A conforming backend must preserve set semantics (no duplicate members,
//! absent key behaves as an empty set) and per-key atomicity of add/remove.
//! The engine issues no retries of its own: any [`StoreError`] is immediately
//! fatal to the operation that triggered it, and retry policy belongs to the
//! backend or the embedding caller.
//!
//! ## Usage
//!
//! ```rust
//! use palisade_store::{BucketStore, MemoryStore};
//!
//! async fn example() -> Result<(), palisade_store::StoreError> {
//!     let store = MemoryStore::new();
//!     store.add_to_set("roles", "joed", &["guest".into()]).await?;
//!     assert!(store.is_member("roles", "joed", "guest").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `memory`: in-memory backend (enabled by default)
//! - `redis`: Redis backend

pub mod store;

#[cfg(feature = "redis")]
pub mod redis;

// Re-export main types for convenience
pub use store::{BucketStore, MemoryStore, StoreError, StoreResult};

#[cfg(feature = "redis")]
pub use redis::RedisStore;
