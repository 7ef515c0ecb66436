//! # Store Traits
//!
//! The two external collaborators of the deletion flow. The orchestrator only
//! ever sees these traits, so the in-memory actors shipped with this crate can
//! be swapped for real backends without touching the deletion sequence.

use crate::framework::StoreError;
use crate::model::{Document, DocumentPath, FieldQuery, QueryPage, UserId, WriteBatch};
use async_trait::async_trait;

/// The authentication store holding identity records.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Removes the identity record of `uid`.
    ///
    /// Fails with [`StoreError::NotFound`] when no such record exists, so a
    /// second deletion of the same user is an error.
    async fn delete_user(&self, uid: &UserId) -> Result<(), StoreError>;
}

/// The document store holding profile and auxiliary collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// Deletes one document. Deleting a missing document succeeds.
    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError>;

    /// Returns one page of refs matching `query`. Stores may return fewer refs
    /// than requested; callers follow [`QueryPage::next_cursor`].
    async fn query(&self, query: FieldQuery) -> Result<QueryPage, StoreError>;

    /// Applies every write in `batch`, or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
