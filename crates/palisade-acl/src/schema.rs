//! Schema layer: logical bucket names and key encoding.
//!
//! The engine stores everything in six logical buckets. Bucket names are
//! configurable so one store instance can host several independent ACL
//! namespaces; the schema below is fixed.
//!
//! ```text
//! meta          "roles" / "resources" -> registry of known names
//! parents       role                  -> set of parent role names
//! permissions   "{role}@{resource}"   -> set of granted permission tokens
//! resources     role                  -> set of resources it has grants on
//! roles         subject id            -> set of directly-assigned roles
//! users         role                  -> set of subject ids holding it
//! ```

use serde::{Deserialize, Serialize};

/// Registry key for known role names in the `meta` bucket.
pub(crate) const META_ROLES: &str = "roles";

/// Registry key for known resource names in the `meta` bucket.
pub(crate) const META_RESOURCES: &str = "resources";

/// Names of the six logical buckets.
///
/// Override these to host multiple independent ACL namespaces on one store:
///
/// ```
/// use palisade_acl::Buckets;
///
/// let buckets = Buckets {
///     roles: "tenant1_roles".to_string(),
///     ..Buckets::default()
/// };
/// assert_eq!(buckets.meta, "meta");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
    /// Registry of known role and resource names
    pub meta: String,
    /// Role -> parent role names
    pub parents: String,
    /// Role+resource -> granted permission tokens
    pub permissions: String,
    /// Role -> resources it has grants on (inverse index)
    pub resources: String,
    /// Subject id -> directly-assigned role names
    pub roles: String,
    /// Role -> subject ids holding it (inverse index)
    pub users: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            meta: "meta".to_string(),
            parents: "parents".to_string(),
            permissions: "permissions".to_string(),
            resources: "resources".to_string(),
            roles: "roles".to_string(),
            users: "users".to_string(),
        }
    }
}

/// Compound key for a role's grant on one resource.
pub(crate) fn grant_key(role: &str, resource: &str) -> String {
    format!("{role}@{resource}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bucket_names() {
        let buckets = Buckets::default();
        assert_eq!(buckets.meta, "meta");
        assert_eq!(buckets.parents, "parents");
        assert_eq!(buckets.permissions, "permissions");
        assert_eq!(buckets.resources, "resources");
        assert_eq!(buckets.roles, "roles");
        assert_eq!(buckets.users, "users");
    }

    #[test]
    fn test_grant_key_format() {
        assert_eq!(grant_key("guest", "blogs"), "guest@blogs");
        assert_eq!(grant_key("admin", "*"), "admin@*");
    }
}
