use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest uid the authentication store accepts, in characters.
pub const MAX_USER_ID_LEN: usize = 128;

/// Opaque user identifier assigned by the authentication store.
///
/// The same value is the key of the profile document and the `userId`
/// foreign key carried by every auxiliary record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Accepts `raw` only if it is non-empty and at most [`MAX_USER_ID_LEN`] characters.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty() && raw.chars().count() <= MAX_USER_ID_LEN).then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// An entry in the authentication store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub uid: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityRecord {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: UserId::new(uid),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Validated input of a single deletion run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionTarget {
    pub uid: UserId,
    /// Accepted from callers but never consulted while deleting.
    pub email: Option<String>,
}

impl DeletionTarget {
    pub fn new(uid: UserId) -> Self {
        Self { uid, email: None }
    }
}
