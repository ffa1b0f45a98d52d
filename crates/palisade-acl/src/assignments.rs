//! Assignment manager: subject <-> role membership.
//!
//! Membership is kept in two mirrored buckets, `roles` (subject -> roles)
//! and `users` (role -> subjects). The pair is not transactional: a mirror
//! failure surfaces as [`AclError::PartialWrite`] naming the side that
//! failed, so the caller can retry or repair.

use std::collections::HashSet;

use crate::acl::Acl;
use crate::error::{AclError, AclResult};
use crate::schema::META_ROLES;
use crate::types::{normalize, require_name, OneOrMany, SubjectId};

impl Acl {
    /// Assign `roles` directly to `subject`.
    ///
    /// Idempotent: assigning a role the subject already holds changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`AclError::PartialWrite`] if the forward `roles` write completed but
    /// a mirror `users` write failed.
    pub async fn add_user_roles(
        &self,
        subject: impl Into<SubjectId>,
        roles: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;
        let roles = normalize("role", roles.into())?;

        let buckets = self.buckets();
        self.store()
            .add_to_set(&buckets.meta, META_ROLES, &roles)
            .await?;
        self.store()
            .add_to_set(&buckets.roles, subject.as_str(), &roles)
            .await?;

        let member = [subject.as_str().to_string()];
        for role in &roles {
            self.store()
                .add_to_set(&buckets.users, role, &member)
                .await
                .map_err(|e| AclError::PartialWrite {
                    applied: buckets.roles.clone(),
                    failed: buckets.users.clone(),
                    source: e,
                })?;
        }

        tracing::debug!(subject = %subject, roles = ?roles, "Assigned roles");

        Ok(())
    }

    /// Remove direct `roles` from `subject`. Absent assignments are a no-op.
    ///
    /// # Errors
    ///
    /// [`AclError::PartialWrite`] if the forward `roles` write completed but
    /// a mirror `users` write failed.
    pub async fn remove_user_roles(
        &self,
        subject: impl Into<SubjectId>,
        roles: impl Into<OneOrMany<String>>,
    ) -> AclResult<()> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;
        let roles = normalize("role", roles.into())?;

        let buckets = self.buckets();
        self.store()
            .remove_from_set(&buckets.roles, subject.as_str(), &roles)
            .await?;

        let member = [subject.as_str().to_string()];
        for role in &roles {
            self.store()
                .remove_from_set(&buckets.users, role, &member)
                .await
                .map_err(|e| AclError::PartialWrite {
                    applied: buckets.roles.clone(),
                    failed: buckets.users.clone(),
                    source: e,
                })?;
        }

        tracing::debug!(subject = %subject, roles = ?roles, "Removed roles");

        Ok(())
    }

    /// The roles directly assigned to `subject` (not the inheritance
    /// closure). Unknown subjects yield an empty set.
    pub async fn user_roles(&self, subject: impl Into<SubjectId>) -> AclResult<HashSet<String>> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;

        Ok(self
            .store()
            .get_set(&self.buckets().roles, subject.as_str())
            .await?)
    }

    /// The subjects directly holding `role`. Unknown roles yield an empty
    /// set.
    pub async fn role_users(&self, role: &str) -> AclResult<HashSet<String>> {
        require_name("role", role)?;

        Ok(self.store().get_set(&self.buckets().users, role).await?)
    }

    /// Whether `subject` holds `role` directly.
    ///
    /// This deliberately ignores inheritance: a subject "has" a role only if
    /// directly assigned, while [`Acl::is_allowed`] resolves permissions
    /// through the full role hierarchy. Callers expecting `has_role` to
    /// follow parent edges should use `is_allowed` instead.
    pub async fn has_role(&self, subject: impl Into<SubjectId>, role: &str) -> AclResult<bool> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;
        require_name("role", role)?;

        Ok(self
            .store()
            .is_member(&self.buckets().roles, subject.as_str(), role)
            .await?)
    }
}
