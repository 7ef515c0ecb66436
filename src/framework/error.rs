//! # Store Errors
//!
//! Errors raised by the identity and document stores, whichever backend sits
//! behind the [`IdentityStore`](super::IdentityStore) and
//! [`DocumentStore`](super::DocumentStore) traits.

/// Errors that can occur while talking to a store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Batch of {size} writes exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
    #[error("{0}")]
    Backend(String),
}
