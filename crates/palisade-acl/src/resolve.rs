//! Resolution engine: permission matching over the role-inheritance closure.
//!
//! Resolution walks breadth-first from the subject's direct roles, one store
//! round trip per newly visited role, short-circuiting as soon as the
//! request is covered. Nothing is cached between calls: every query re-reads
//! the graph, so external role and grant mutations are visible immediately.

use std::collections::{HashSet, VecDeque};

use crate::acl::Acl;
use crate::error::AclResult;
use crate::schema::grant_key;
use crate::types::{normalize, require_name, OneOrMany, SubjectId, WILDCARD};

impl Acl {
    /// Whether `subject` holds all of `permissions` on `resource`, directly
    /// or through any ancestor of its roles.
    ///
    /// A grant on the wildcard resource `*` covers any concrete resource; a
    /// granted wildcard permission `*` covers any request. Requesting the
    /// wildcard permission asks whether the subject has any grant at all on
    /// the resource.
    ///
    /// Absence of data is never an error: an unknown subject, role, or
    /// resource resolves to `false`.
    pub async fn is_allowed(
        &self,
        subject: impl Into<SubjectId>,
        resource: &str,
        permissions: impl Into<OneOrMany<String>>,
    ) -> AclResult<bool> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;
        require_name("resource", resource)?;
        let requested = normalize("permission", permissions.into())?;

        let buckets = self.buckets();
        let direct = self
            .store()
            .get_set(&buckets.roles, subject.as_str())
            .await?;
        if direct.is_empty() {
            return Ok(false);
        }

        // A request of exactly `*` is satisfied by any non-empty grant
        let any_grant = requested.len() == 1 && requested[0] == WILDCARD;

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = direct.into_iter().collect();
        let mut satisfied: HashSet<String> = HashSet::new();

        while let Some(role) = queue.pop_front() {
            // Diamond inheritance visits a role twice; a corrupted graph
            // could even make it a cycle. Either way, skip.
            if !visited.insert(role.clone()) {
                continue;
            }

            let mut granted = self
                .store()
                .get_set(&buckets.permissions, &grant_key(&role, resource))
                .await?;
            granted.extend(
                self.store()
                    .get_set(&buckets.permissions, &grant_key(&role, WILDCARD))
                    .await?,
            );

            if any_grant && !granted.is_empty() {
                return Ok(true);
            }

            satisfied.extend(granted);
            if satisfied.contains(WILDCARD)
                || requested.iter().all(|p| satisfied.contains(p))
            {
                return Ok(true);
            }

            for parent in self.store().get_set(&buckets.parents, &role).await? {
                if !visited.contains(&parent) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(requested.iter().all(|p| satisfied.contains(p)))
    }

    /// Every permission token `subject` holds on `resource`, unioned across
    /// the full inheritance closure of its roles, including grants recorded
    /// under the wildcard resource.
    ///
    /// A literal `*` in the result means the subject holds all permissions
    /// on the resource. Unknown subjects yield an empty set.
    pub async fn allowed_permissions(
        &self,
        subject: impl Into<SubjectId>,
        resource: &str,
    ) -> AclResult<HashSet<String>> {
        let subject = subject.into();
        require_name("subject", subject.as_str())?;
        require_name("resource", resource)?;

        let buckets = self.buckets();
        let direct = self
            .store()
            .get_set(&buckets.roles, subject.as_str())
            .await?;

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = direct.into_iter().collect();
        let mut satisfied: HashSet<String> = HashSet::new();

        while let Some(role) = queue.pop_front() {
            if !visited.insert(role.clone()) {
                continue;
            }

            satisfied.extend(
                self.store()
                    .get_set(&buckets.permissions, &grant_key(&role, resource))
                    .await?,
            );
            satisfied.extend(
                self.store()
                    .get_set(&buckets.permissions, &grant_key(&role, WILDCARD))
                    .await?,
            );

            for parent in self.store().get_set(&buckets.parents, &role).await? {
                if !visited.contains(&parent) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(satisfied)
    }
}
