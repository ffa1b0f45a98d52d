//! The ACL engine handle.
//!
//! [`Acl`] owns nothing but a handle to the bucket store and the bucket-name
//! configuration. Every operation is a self-contained sequence of store
//! calls: nothing is cached between calls, so external mutations are visible
//! to the next query, and concurrent operations rely only on the store's
//! per-key atomicity.

use palisade_store::BucketStore;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::AclResult;
use crate::schema::Buckets;

/// Construction configuration for [`Acl`].
#[derive(Debug, Clone, Default)]
pub struct AclOptions {
    /// Names of the six logical buckets
    pub buckets: Buckets,
}

/// The access-control engine.
///
/// Grants attach to roles, roles form an acyclic inheritance hierarchy, and
/// subjects gain permissions through the roles they hold, directly or via
/// any ancestor role.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use palisade_acl::Acl;
/// use palisade_store::MemoryStore;
///
/// async fn example() -> Result<(), palisade_acl::AclError> {
///     let acl = Acl::new(Arc::new(MemoryStore::new()));
///
///     acl.allow("guest", "blogs", "view").await?;
///     acl.add_user_roles("joed", "guest").await?;
///
///     assert!(acl.is_allowed("joed", "blogs", "view").await?);
///     assert!(!acl.is_allowed("joed", "blogs", "edit").await?);
///     Ok(())
/// }
/// ```
pub struct Acl {
    /// The storage backend; all state lives here
    store: Arc<dyn BucketStore>,

    /// Bucket-name configuration
    options: AclOptions,
}

impl std::fmt::Debug for Acl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Acl")
            .field("options", &self.options)
            .finish()
    }
}

impl Acl {
    /// Create an engine over `store` with default bucket names.
    pub fn new(store: Arc<dyn BucketStore>) -> Self {
        Self::with_options(store, AclOptions::default())
    }

    /// Create an engine over `store` with custom options.
    ///
    /// Overriding bucket names lets one store instance host several
    /// independent ACL namespaces.
    pub fn with_options(store: Arc<dyn BucketStore>, options: AclOptions) -> Self {
        Self { store, options }
    }

    /// The configuration this engine was built with.
    pub fn options(&self) -> &AclOptions {
        &self.options
    }

    pub(crate) fn store(&self) -> &dyn BucketStore {
        self.store.as_ref()
    }

    pub(crate) fn buckets(&self) -> &Buckets {
        &self.options.buckets
    }

    /// All ancestor roles reachable from `role` via parent edges.
    ///
    /// Breadth-first over fresh store reads; the visited set makes the walk
    /// terminate even on a graph corrupted by direct store manipulation.
    pub(crate) async fn ancestors(&self, role: &str) -> AclResult<HashSet<String>> {
        let buckets = self.buckets();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: Vec<String> = vec![role.to_string()];

        while let Some(current) = queue.pop() {
            for parent in self.store().get_set(&buckets.parents, &current).await? {
                if visited.insert(parent.clone()) {
                    queue.push(parent);
                }
            }
        }

        Ok(visited)
    }
}
