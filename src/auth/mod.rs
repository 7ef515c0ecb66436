//! Shared-secret check for the deletion endpoint.
//!
//! A request is allowed only when its `secret` parameter equals the configured
//! [`DeletionSecret`] exactly. No store is touched before this check passes.

use crate::runtime::DeletionSecret;
use std::fmt;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Both variants render as the same body so callers learn nothing about the secret.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Unauthorized")]
    Missing,
    #[error("Unauthorized")]
    Mismatch,
}

#[derive(Clone)]
pub struct RequestAuthenticator {
    expected: DeletionSecret,
}

impl RequestAuthenticator {
    pub fn new(expected: DeletionSecret) -> Self {
        Self { expected }
    }

    pub fn authorize(&self, presented: Option<&str>) -> Result<(), AuthorizationError> {
        let presented = presented.ok_or(AuthorizationError::Missing)?;
        if secrets_match(presented.as_bytes(), self.expected.as_bytes()) {
            Ok(())
        } else {
            Err(AuthorizationError::Mismatch)
        }
    }
}

impl fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("expected", &"<redacted>")
            .finish()
    }
}

/// Constant-time for equal lengths; a length mismatch is rejected immediately.
fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> RequestAuthenticator {
        RequestAuthenticator::new(DeletionSecret::from_static("s3cr3t"))
    }

    #[test]
    fn exact_secret_is_accepted() {
        assert_eq!(authenticator().authorize(Some("s3cr3t")), Ok(()));
    }

    #[test]
    fn near_misses_are_rejected() {
        let auth = authenticator();
        for candidate in ["", "s3cr3", "s3cr3t ", "S3CR3T", " s3cr3t", "s3cr3x"] {
            assert_eq!(
                auth.authorize(Some(candidate)),
                Err(AuthorizationError::Mismatch),
                "{candidate:?} should not match"
            );
        }
    }

    #[test]
    fn absent_secret_is_rejected() {
        let err = authenticator().authorize(None).unwrap_err();
        assert_eq!(err, AuthorizationError::Missing);
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn comparison_requires_identical_bytes() {
        assert!(secrets_match(b"s3cr3t", b"s3cr3t"));
        assert!(!secrets_match(b"s3cr3t", b"s3cr3"));
        assert!(!secrets_match(b"", b"s3cr3t"));
        assert!(!secrets_match("s3cr3€".as_bytes(), "s3cr3e".as_bytes()));
    }

    #[test]
    fn debug_output_hides_secret() {
        assert!(!format!("{:?}", authenticator()).contains("s3cr3t"));
    }
}
