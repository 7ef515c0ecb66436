//! Error types for the deletion sequence.

use crate::framework::StoreError;
use crate::model::{AuxiliaryCollection, UserId, MAX_USER_ID_LEN};
use crate::orchestrator::DeletionStage;
use thiserror::Error;

/// Errors that abort a deletion request.
///
/// The `Display` output is what the caller receives as the response body, so
/// store failures pass their message through unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeletionError {
    /// The request carried no `uid`.
    #[error("The uid query parameter is required")]
    MissingUserId,

    /// The query string could not be read, for example a repeated `uid`.
    #[error("{0}")]
    MalformedQuery(String),

    /// The `uid` is empty or too long to name a user.
    #[error(
        "The uid must be a non-empty string with at most {max} characters",
        max = MAX_USER_ID_LEN
    )]
    InvalidUserId,

    /// The authentication store has no record for this user.
    #[error("There is no user record corresponding to the provided identifier: {0}")]
    IdentityNotFound(UserId),

    /// Deleting the identity record failed for any other reason.
    #[error("{0}")]
    IdentityStore(StoreError),

    /// Deleting the profile document failed.
    #[error("{0}")]
    ProfileStore(StoreError),

    /// Querying or batch-deleting one auxiliary collection failed.
    #[error("{source}")]
    CollectionSweep {
        collection: AuxiliaryCollection,
        source: StoreError,
    },
}

impl DeletionError {
    /// The stage the request was in when it failed.
    pub fn stage(&self) -> DeletionStage {
        match self {
            DeletionError::MissingUserId
            | DeletionError::MalformedQuery(_)
            | DeletionError::InvalidUserId => DeletionStage::Authenticated,
            DeletionError::IdentityNotFound(_) | DeletionError::IdentityStore(_) => {
                DeletionStage::DeletingIdentity
            }
            DeletionError::ProfileStore(_) => DeletionStage::DeletingProfile,
            DeletionError::CollectionSweep { collection, .. } => {
                DeletionStage::Sweeping(*collection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_uid_message_states_the_limit() {
        assert_eq!(
            DeletionError::InvalidUserId.to_string(),
            format!("The uid must be a non-empty string with at most {MAX_USER_ID_LEN} characters")
        );
    }

    #[test]
    fn store_messages_pass_through_verbatim() {
        let err = DeletionError::CollectionSweep {
            collection: AuxiliaryCollection::Wishlists,
            source: StoreError::Backend("deadline exceeded".to_string()),
        };
        assert_eq!(err.to_string(), "deadline exceeded");
        assert_eq!(
            err.stage(),
            DeletionStage::Sweeping(AuxiliaryCollection::Wishlists)
        );
    }
}
