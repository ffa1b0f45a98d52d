//! Grant manager: role-to-permission grants and the role-parent graph.
//!
//! Grants are written as two paired updates, the `permissions` set and the
//! `resources` inverse index; the pair is not transactional and a mirror
//! failure surfaces as [`AclError::PartialWrite`]. Parent edges are guarded
//! by a cycle check over the existing graph before any edge is written.

use std::slice;

use crate::acl::Acl;
use crate::error::{AclError, AclResult};
use crate::schema::{grant_key, META_RESOURCES, META_ROLES};
use crate::types::{normalize, require_name, AllowRequest, OneOrMany};

impl Acl {
    /// Grant `permissions` on each of `resources` to each of `roles`.
    ///
    /// List arguments expand as a cartesian set of grants. Roles and
    /// resources come into existence implicitly here and are recorded in the
    /// `meta` registry.
    ///
    /// # Errors
    ///
    /// [`AclError::PartialWrite`] if a grant was written but its inverse
    /// `resources` index update failed; grants written earlier in the
    /// expansion stay applied.
    pub async fn allow(
        &self,
        roles: impl Into<OneOrMany<String>>,
        resources: impl Into<OneOrMany<String>>,
        permissions: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        let roles = normalize("role", roles.into())?;
        let resources = normalize("resource", resources.into())?;
        let permissions = normalize("permission", permissions.into())?;

        let buckets = self.buckets();
        self.store()
            .add_to_set(&buckets.meta, META_ROLES, &roles)
            .await?;
        self.store()
            .add_to_set(&buckets.meta, META_RESOURCES, &resources)
            .await?;

        for role in &roles {
            for resource in &resources {
                self.store()
                    .add_to_set(&buckets.permissions, &grant_key(role, resource), &permissions)
                    .await?;
                self.store()
                    .add_to_set(&buckets.resources, role, slice::from_ref(resource))
                    .await
                    .map_err(|e| AclError::PartialWrite {
                        applied: buckets.permissions.clone(),
                        failed: buckets.resources.clone(),
                        source: e,
                    })?;
            }
        }

        tracing::debug!(
            roles = ?roles,
            resources = ?resources,
            permissions = ?permissions,
            "Granted permissions"
        );

        Ok(())
    }

    /// Apply a batch of grant records as a sequence of [`Acl::allow`] calls.
    ///
    /// There is no transactional rollback across the batch: the first error
    /// surfaces and earlier grants stay applied.
    pub async fn allow_batch(
        &self,
        requests: impl IntoIterator<Item = AllowRequest>,
    ) -> AclResult<()> {
        for request in requests {
            if request.allows.is_empty() {
                return Err(AclError::InvalidArgument(
                    "batch allow record has an empty allows list".to_string(),
                ));
            }

            let roles = normalize("role", request.roles)?;
            for entry in request.allows {
                self.allow(
                    OneOrMany::Many(roles.clone()),
                    entry.resources,
                    entry.permissions,
                )
                .await?;
            }
        }

        Ok(())
    }

    /// Remove `permissions` on each of `resources` from each of `roles`.
    ///
    /// Removing a grant that does not exist is a no-op. When a grant set
    /// empties, its key is deleted and the resource is dropped from the
    /// role's inverse index.
    pub async fn remove_allow(
        &self,
        roles: impl Into<OneOrMany<String>>,
        resources: impl Into<OneOrMany<String>>,
        permissions: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        let roles = normalize("role", roles.into())?;
        let resources = normalize("resource", resources.into())?;
        let permissions = normalize("permission", permissions.into())?;

        let buckets = self.buckets();
        for role in &roles {
            for resource in &resources {
                let key = grant_key(role, resource);
                self.store()
                    .remove_from_set(&buckets.permissions, &key, &permissions)
                    .await?;

                let remaining = self.store().get_set(&buckets.permissions, &key).await?;
                if remaining.is_empty() {
                    self.store().remove_key(&buckets.permissions, &key).await?;
                    self.store()
                        .remove_from_set(&buckets.resources, role, slice::from_ref(resource))
                        .await
                        .map_err(|e| AclError::PartialWrite {
                            applied: buckets.permissions.clone(),
                            failed: buckets.resources.clone(),
                            source: e,
                        })?;
                }
            }
        }

        tracing::debug!(
            roles = ?roles,
            resources = ?resources,
            permissions = ?permissions,
            "Revoked permissions"
        );

        Ok(())
    }

    /// Add parent roles to `role`, so `role` inherits every grant of each
    /// parent (and transitively of the parents' ancestors).
    ///
    /// Parents that are already ancestors of `role` are skipped. The call
    /// validates every candidate before writing, so a rejected call inserts
    /// no edges at all.
    ///
    /// # Errors
    ///
    /// [`AclError::Cycle`] if adding an edge would make `role` reachable
    /// from itself; the error names the offending parent.
    pub async fn add_role_parents(
        &self,
        role: &str,
        parents: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        require_name("role", role)?;
        let parents = normalize("parent role", parents.into())?;

        let existing = self.ancestors(role).await?;
        let mut new_edges: Vec<String> = Vec::new();
        for parent in parents {
            if parent == role {
                return Err(AclError::Cycle {
                    role: role.to_string(),
                    parent,
                });
            }
            if existing.contains(&parent) {
                continue;
            }
            if self.ancestors(&parent).await?.contains(role) {
                return Err(AclError::Cycle {
                    role: role.to_string(),
                    parent,
                });
            }
            new_edges.push(parent);
        }

        let buckets = self.buckets();
        let mut names = new_edges.clone();
        names.push(role.to_string());
        self.store()
            .add_to_set(&buckets.meta, META_ROLES, &names)
            .await?;
        self.store()
            .add_to_set(&buckets.parents, role, &new_edges)
            .await?;

        tracing::debug!(role = %role, parents = ?new_edges, "Added role parents");

        Ok(())
    }

    /// Remove parent edges from `role`. Absent edges are a no-op.
    pub async fn remove_role_parents(
        &self,
        role: &str,
        parents: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        require_name("role", role)?;
        let parents = normalize("parent role", parents.into())?;

        self.store()
            .remove_from_set(&self.buckets().parents, role, &parents)
            .await?;

        tracing::debug!(role = %role, parents = ?parents, "Removed role parents");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::acl::Acl;
    use crate::error::AclError;
    use palisade_store::{BucketStore, MemoryStore};
    use std::sync::Arc;

    fn acl_over(store: MemoryStore) -> Acl {
        Acl::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_allow_records_grant_and_inverse_index() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.allow("member", "blogs", vec!["edit", "view", "delete"])
            .await
            .unwrap();

        let granted = store.get_set("permissions", "member@blogs").await.unwrap();
        assert_eq!(granted.len(), 3);
        assert!(granted.contains("edit"));

        let resources = store.get_set("resources", "member").await.unwrap();
        assert!(resources.contains("blogs"));

        let meta_roles = store.get_set("meta", "roles").await.unwrap();
        assert!(meta_roles.contains("member"));
        let meta_resources = store.get_set("meta", "resources").await.unwrap();
        assert!(meta_resources.contains("blogs"));
    }

    #[tokio::test]
    async fn test_allow_expands_cartesian_arguments() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.allow("admin", vec!["blogs", "forums"], "*").await.unwrap();

        assert!(store
            .is_member("permissions", "admin@blogs", "*")
            .await
            .unwrap());
        assert!(store
            .is_member("permissions", "admin@forums", "*")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_allow_rejects_empty_role_name() {
        let acl = acl_over(MemoryStore::new());

        let err = acl.allow("", "blogs", "view").await.unwrap_err();
        assert!(matches!(err, AclError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_remove_allow_clears_empty_grant_and_inverse_index() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.allow("member", "blogs", vec!["edit", "view"]).await.unwrap();
        acl.remove_allow("member", "blogs", "edit").await.unwrap();

        let granted = store.get_set("permissions", "member@blogs").await.unwrap();
        assert_eq!(granted.len(), 1);
        assert!(store.is_member("resources", "member", "blogs").await.unwrap());

        acl.remove_allow("member", "blogs", "view").await.unwrap();
        assert!(store
            .get_set("permissions", "member@blogs")
            .await
            .unwrap()
            .is_empty());
        assert!(!store.is_member("resources", "member", "blogs").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_allow_of_absent_grant_is_noop() {
        let acl = acl_over(MemoryStore::new());

        acl.remove_allow("ghost", "blogs", "view").await.unwrap();
    }

    #[tokio::test]
    async fn test_cycle_is_rejected() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.add_role_parents("A", "B").await.unwrap();
        let err = acl.add_role_parents("B", "A").await.unwrap_err();
        assert!(matches!(
            err,
            AclError::Cycle { ref role, ref parent } if role == "B" && parent == "A"
        ));

        // The rejected call must not have inserted the edge
        assert!(!store.is_member("parents", "B", "A").await.unwrap());
    }

    #[tokio::test]
    async fn test_transitive_cycle_is_rejected() {
        let acl = acl_over(MemoryStore::new());

        acl.add_role_parents("B", "C").await.unwrap();
        acl.add_role_parents("A", "B").await.unwrap();
        let err = acl.add_role_parents("C", "A").await.unwrap_err();
        assert!(matches!(err, AclError::Cycle { .. }));
    }

    #[tokio::test]
    async fn test_self_parent_is_rejected() {
        let acl = acl_over(MemoryStore::new());

        let err = acl.add_role_parents("A", "A").await.unwrap_err();
        assert!(matches!(err, AclError::Cycle { .. }));
    }

    #[tokio::test]
    async fn test_rejected_call_inserts_no_edges() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.add_role_parents("A", "B").await.unwrap();
        // "C" is fine on its own, but the later "A" makes the call cyclic
        let err = acl.add_role_parents("B", vec!["C", "A"]).await.unwrap_err();
        assert!(matches!(err, AclError::Cycle { .. }));

        assert!(store.get_set("parents", "B").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_ancestor_parent_is_skipped() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.add_role_parents("B", "C").await.unwrap();
        acl.add_role_parents("A", "B").await.unwrap();
        // C is already an ancestor of A through B
        acl.add_role_parents("A", "C").await.unwrap();

        assert!(!store.is_member("parents", "A", "C").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_role_parents() {
        let store = MemoryStore::new();
        let acl = acl_over(store.clone());

        acl.add_role_parents("baz", vec!["foo", "bar"]).await.unwrap();
        acl.remove_role_parents("baz", "foo").await.unwrap();

        let parents = store.get_set("parents", "baz").await.unwrap();
        assert!(!parents.contains("foo"));
        assert!(parents.contains("bar"));
    }
}
