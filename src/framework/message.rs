//! # Store Messages
//!
//! Requests sent from the store clients to the in-memory store actors. Every
//! request carries a oneshot sender the actor answers on once the operation
//! has been applied.

use crate::framework::StoreError;
use crate::model::{
    Document, DocumentPath, FieldQuery, Fields, IdentityRecord, QueryPage, UserId, WriteBatch,
};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Operations understood by the identity actor.
#[derive(Debug)]
pub enum IdentityRequest {
    Create {
        record: IdentityRecord,
        respond_to: Response<()>,
    },
    Get {
        uid: UserId,
        respond_to: Response<Option<IdentityRecord>>,
    },
    Delete {
        uid: UserId,
        respond_to: Response<()>,
    },
}

/// Operations understood by the document actor.
///
/// `Commit` is processed as a single message, which is what makes a
/// [`WriteBatch`] all-or-nothing with respect to every other request.
#[derive(Debug)]
pub enum DocumentRequest {
    Set {
        path: DocumentPath,
        fields: Fields,
        respond_to: Response<()>,
    },
    Get {
        path: DocumentPath,
        respond_to: Response<Option<Document>>,
    },
    Delete {
        path: DocumentPath,
        respond_to: Response<()>,
    },
    Query {
        query: FieldQuery,
        respond_to: Response<QueryPage>,
    },
    Commit {
        batch: WriteBatch,
        respond_to: Response<()>,
    },
}
