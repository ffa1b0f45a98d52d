//! # Palisade ACL
//!
//! A role-hierarchy access-control engine over pluggable key/set storage.
//!
//! ## Overview
//!
//! The engine answers one question: does a subject hold a requested set of
//! permissions on a resource? Grants attach to roles, roles form a directed
//! acyclic inheritance hierarchy, and every fact lives in a
//! [`BucketStore`](palisade_store::BucketStore) backend rather than process
//! memory, so any conforming backend (in-memory, Redis, ...) can be swapped
//! in without changing engine behavior.
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   ├─ grant manager      allow / remove_allow / add_role_parents
//!   ├─ assignment manager add_user_roles / has_role / role_users
//!   └─ resolution engine  is_allowed / allowed_permissions
//!                │
//!          six logical buckets (meta, parents, permissions,
//!          resources, roles, users) over one BucketStore
//! ```
//!
//! The store offers only coarse set-membership primitives; graph traversal
//! and wildcard matching happen entirely in this crate, one store round trip
//! per newly visited role, with nothing cached between calls.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use palisade_acl::Acl;
//! use palisade_store::MemoryStore;
//!
//! async fn example() -> Result<(), palisade_acl::AclError> {
//!     let acl = Acl::new(Arc::new(MemoryStore::new()));
//!
//!     // Build the role graph and grants
//!     acl.allow("foo", "blogs", vec!["edit", "view"]).await?;
//!     acl.allow("bar", "blogs", vec!["view", "delete"]).await?;
//!     acl.add_role_parents("baz", vec!["foo", "bar"]).await?;
//!
//!     // Assign a role and resolve access
//!     acl.add_user_roles("james", "baz").await?;
//!     assert!(acl.is_allowed("james", "blogs", vec!["edit", "delete"]).await?);
//!     assert!(!acl.is_allowed("james", "blogs", "publish").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Wildcards
//!
//! A grant on resource `*` covers every resource; a granted permission `*`
//! covers every permission request. Requesting permission `*` asks whether
//! the subject has any grant at all on the resource.
//!
//! ## `has_role` vs `is_allowed`
//!
//! [`Acl::has_role`] checks direct membership only, while [`Acl::is_allowed`]
//! resolves through the full inheritance hierarchy. Inheritance affects
//! permissions, not role membership. This asymmetry is part of the contract;
//! see the method documentation.
//!
//! ## Consistency
//!
//! Paired forward/inverse index writes (`roles`/`users`, and the
//! role-to-resource index) are two independent store writes, not a
//! transaction. A failure between them surfaces as
//! [`AclError::PartialWrite`] naming the side that failed; the caller
//! decides whether to retry or repair.

pub mod acl;
pub mod error;
pub mod schema;
pub mod types;

mod assignments;
mod grants;
mod resolve;

// Re-export main types for convenience
pub use acl::{Acl, AclOptions};
pub use error::{AclError, AclResult};
pub use schema::Buckets;
pub use types::{AllowEntry, AllowRequest, OneOrMany, SubjectId, WILDCARD};

// Re-export the storage layer so embedders need only one dependency
pub use palisade_store as store;
pub use palisade_store::{BucketStore, MemoryStore, StoreError};
