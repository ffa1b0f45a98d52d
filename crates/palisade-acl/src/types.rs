//! Argument-shape types for the public ACL surface.
//!
//! The public operations accept either a scalar or a list for roles,
//! resources, and permissions, and subject ids may be strings or integers.
//! These types normalize every shape at the operation boundary before any
//! core logic runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{AclError, AclResult};

/// Wildcard token: all resources, or all permissions, depending on position.
pub const WILDCARD: &str = "*";

/// A scalar-or-list argument.
///
/// Public operations take `impl Into<OneOrMany<String>>` so callers can pass
/// a single name or a list interchangeably:
///
/// ```
/// use palisade_acl::OneOrMany;
///
/// let one: OneOrMany<String> = "view".into();
/// let many: OneOrMany<String> = vec!["view", "edit"].into();
/// assert_eq!(one.into_vec(), vec!["view"]);
/// assert_eq!(many.into_vec(), vec!["view", "edit"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value
    One(T),
    /// A list of values
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OneOrMany<String> {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|s| s.to_string()).collect())
    }
}

/// An opaque subject id, normalized to string form.
///
/// Subjects may be identified by strings or integers; both map onto the same
/// storage key space, so `SubjectId::from(7)` and `SubjectId::from("7")`
/// denote the same subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// The normalized string form used as a storage key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! subject_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SubjectId {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

subject_from_int!(u32, u64, usize, i32, i64);

/// One record of a batch grant: a set of roles, each given every
/// resource/permission combination listed in `allows`.
///
/// Deserializes from the JSON shape
/// `{"roles": ..., "allows": [{"resources": ..., "permissions": ...}, ...]}`
/// where every field accepts a scalar or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowRequest {
    /// Roles receiving the grants
    pub roles: OneOrMany<String>,
    /// Resource/permission combinations to grant
    pub allows: Vec<AllowEntry>,
}

/// One resource/permission combination within an [`AllowRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowEntry {
    /// Resources the permissions apply to
    pub resources: OneOrMany<String>,
    /// Permissions granted on each resource
    pub permissions: OneOrMany<String>,
}

/// Normalize a scalar-or-list argument to a deduplicated list, rejecting
/// empty lists and empty names.
pub(crate) fn normalize(kind: &str, values: OneOrMany<String>) -> AclResult<Vec<String>> {
    let values = values.into_vec();
    if values.is_empty() {
        return Err(AclError::InvalidArgument(format!(
            "{kind} list must not be empty"
        )));
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if value.is_empty() {
            return Err(AclError::InvalidArgument(format!(
                "{kind} name must not be empty"
            )));
        }
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }

    Ok(out)
}

/// Reject an empty name.
pub(crate) fn require_name(kind: &str, value: &str) -> AclResult<()> {
    if value.is_empty() {
        return Err(AclError::InvalidArgument(format!(
            "{kind} name must not be empty"
        )));
    }
    Ok(())
}
