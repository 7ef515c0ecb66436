use crate::model::{DeletionTarget, UserId};
use crate::orchestrator::DeletionError;
use serde::Deserialize;
use std::fmt;

/// The credential, read on its own so a malformed `uid` cannot mask a valid secret.
#[derive(Default, Deserialize)]
pub struct SecretQuery {
    pub secret: Option<String>,
}

impl fmt::Debug for SecretQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretQuery")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// User parameters of a deletion request. Unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserQuery {
    pub uid: Option<String>,
    pub email: Option<String>,
}

impl DeleteUserQuery {
    /// Validates the user parameters. Only call this once the secret has been checked.
    pub fn into_target(self) -> Result<DeletionTarget, DeletionError> {
        let raw = self.uid.ok_or(DeletionError::MissingUserId)?;
        let uid = UserId::parse(raw).ok_or(DeletionError::InvalidUserId)?;
        Ok(DeletionTarget {
            uid,
            email: self.email.filter(|email| !email.is_empty()),
        })
    }
}
