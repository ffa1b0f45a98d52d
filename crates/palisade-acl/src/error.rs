//! Error types for ACL operations
//!
//! The engine performs no local recovery and no silent retry: every failure
//! is surfaced to the immediate caller as one of these variants.

use palisade_store::StoreError;
use thiserror::Error;

/// ACL error types.
#[derive(Debug, Error)]
pub enum AclError {
    /// The storage backend failed; propagated unmodified
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Adding the parent edge would make the role graph cyclic
    #[error("Adding parent '{parent}' to role '{role}' would create a cycle")]
    Cycle {
        /// The role the edge was being added to
        role: String,
        /// The would-be-cyclic parent
        parent: String,
    },

    /// A paired forward/inverse write completed only one side.
    ///
    /// The data model is inconsistent until the caller retries or repairs;
    /// `applied` and `failed` name the bucket that was written and the bucket
    /// whose write failed.
    #[error("Partial write: bucket '{applied}' updated but bucket '{failed}' failed: {source}")]
    PartialWrite {
        /// Bucket whose write completed
        applied: String,
        /// Bucket whose write failed
        failed: String,
        /// The underlying store failure
        #[source]
        source: StoreError,
    },

    /// Empty role/resource/subject/permission name, or a malformed batch
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for ACL operations.
pub type AclResult<T> = Result<T, AclError>;
