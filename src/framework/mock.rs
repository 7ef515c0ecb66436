//! # Mock Stores & Testing Guide
//!
//! Two kinds of test doubles live here.
//!
//! ## Channel-level mocks
//!
//! [`create_mock_identity_client`] and [`create_mock_document_client`] return a real client
//! wired to a receiver you control. Pull requests off the receiver with the `expect_*`
//! helpers and answer them by hand. Use these to test a client in isolation.
//!
//! ```rust
//! use user_purge::framework::mock::{create_mock_identity_client, expect_identity_delete};
//! use user_purge::framework::IdentityStore;
//! use user_purge::model::UserId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_identity_client(10);
//!     let task = tokio::spawn(async move { client.delete_user(&UserId::new("u1")).await });
//!
//!     let (uid, responder) = expect_identity_delete(&mut receiver).await.unwrap();
//!     assert_eq!(uid.as_str(), "u1");
//!     responder.send(Ok(())).unwrap();
//!
//!     assert!(task.await.unwrap().is_ok());
//! }
//! ```
//!
//! ## Recording decorators
//!
//! [`RecordingIdentityStore`] and [`RecordingDocumentStore`] wrap any store, log every call
//! that reaches them and can be told to fail specific operations. Use these to assert how
//! far a deletion got, how many batches were committed, or that nothing was touched at all.
//!
//! | Need | Use |
//! |------|-----|
//! | Inspect the exact request a client sends | channel-level mock |
//! | Count calls against a real store | recording decorator |
//! | Fail the sweep of one collection | [`RecordingDocumentStore::fail_queries_for`] |

use crate::clients::{DocumentClient, IdentityClient};
use crate::framework::{
    DocumentRequest, DocumentStore, IdentityRequest, IdentityStore, Response, StoreError,
};
use crate::model::{Document, DocumentPath, FieldQuery, QueryPage, UserId, WriteBatch};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// CHANNEL-LEVEL MOCKS
// =============================================================================

/// Creates an identity client and the receiver its requests arrive on.
pub fn create_mock_identity_client(
    buffer_size: usize,
) -> (IdentityClient, mpsc::Receiver<IdentityRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (IdentityClient::new(sender), receiver)
}

/// Creates a document client and the receiver its requests arrive on.
pub fn create_mock_document_client(
    buffer_size: usize,
) -> (DocumentClient, mpsc::Receiver<DocumentRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DocumentClient::new(sender), receiver)
}

/// Helper to verify that the next message is an identity Delete request
pub async fn expect_identity_delete(
    receiver: &mut mpsc::Receiver<IdentityRequest>,
) -> Option<(UserId, Response<()>)> {
    match receiver.recv().await {
        Some(IdentityRequest::Delete { uid, respond_to }) => Some((uid, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a document Delete request
pub async fn expect_document_delete(
    receiver: &mut mpsc::Receiver<DocumentRequest>,
) -> Option<(DocumentPath, Response<()>)> {
    match receiver.recv().await {
        Some(DocumentRequest::Delete { path, respond_to }) => Some((path, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query(
    receiver: &mut mpsc::Receiver<DocumentRequest>,
) -> Option<(FieldQuery, Response<QueryPage>)> {
    match receiver.recv().await {
        Some(DocumentRequest::Query { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Commit request
pub async fn expect_commit(
    receiver: &mut mpsc::Receiver<DocumentRequest>,
) -> Option<(WriteBatch, Response<()>)> {
    match receiver.recv().await {
        Some(DocumentRequest::Commit { batch, respond_to }) => Some((batch, respond_to)),
        _ => None,
    }
}

// =============================================================================
// RECORDING DECORATORS
// =============================================================================

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call that reached a recording store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    DeleteUser(UserId),
    Get(DocumentPath),
    Delete(DocumentPath),
    Query { collection: String },
    Commit { paths: Vec<DocumentPath> },
}

impl StoreCall {
    /// Collection a document call is scoped to, if any.
    pub fn collection(&self) -> Option<&str> {
        match self {
            StoreCall::DeleteUser(_) => None,
            StoreCall::Get(path) | StoreCall::Delete(path) => Some(path.collection()),
            StoreCall::Query { collection } => Some(collection),
            StoreCall::Commit { paths } => paths.first().map(|p| p.collection()),
        }
    }
}

/// Wraps an [`IdentityStore`], recording calls and optionally failing them.
#[derive(Clone)]
pub struct RecordingIdentityStore {
    inner: Arc<dyn IdentityStore>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    failure: Arc<Mutex<Option<StoreError>>>,
}

impl RecordingIdentityStore {
    pub fn new(inner: Arc<dyn IdentityStore>) -> Self {
        Self {
            inner,
            calls: Arc::default(),
            failure: Arc::default(),
        }
    }

    /// Every subsequent `delete_user` fails with `error` without reaching the inner store.
    pub fn fail_with(&self, error: StoreError) {
        *lock(&self.failure) = Some(error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl IdentityStore for RecordingIdentityStore {
    async fn delete_user(&self, uid: &UserId) -> Result<(), StoreError> {
        lock(&self.calls).push(StoreCall::DeleteUser(uid.clone()));
        let failure = lock(&self.failure).clone();
        match failure {
            Some(error) => Err(error),
            None => self.inner.delete_user(uid).await,
        }
    }
}

/// Wraps a [`DocumentStore`], recording calls and failing chosen collections.
#[derive(Clone)]
pub struct RecordingDocumentStore {
    inner: Arc<dyn DocumentStore>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    query_failures: Arc<Mutex<HashMap<String, StoreError>>>,
    commit_failures: Arc<Mutex<HashMap<String, StoreError>>>,
}

impl RecordingDocumentStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            calls: Arc::default(),
            query_failures: Arc::default(),
            commit_failures: Arc::default(),
        }
    }

    /// Queries against `collection` fail with `error`.
    pub fn fail_queries_for(&self, collection: impl Into<String>, error: StoreError) {
        lock(&self.query_failures).insert(collection.into(), error);
    }

    /// Commits of batches scoped to `collection` fail with `error`.
    pub fn fail_commits_for(&self, collection: impl Into<String>, error: StoreError) {
        lock(&self.commit_failures).insert(collection.into(), error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Calls scoped to `collection`, in order.
    pub fn calls_for(&self, collection: &str) -> Vec<StoreCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.collection() == Some(collection))
            .cloned()
            .collect()
    }

    pub fn commit_count(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, StoreCall::Commit { .. }))
            .count()
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl DocumentStore for RecordingDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        self.record(StoreCall::Get(path.clone()));
        self.inner.get(path).await
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        self.record(StoreCall::Delete(path.clone()));
        self.inner.delete(path).await
    }

    async fn query(&self, query: FieldQuery) -> Result<QueryPage, StoreError> {
        self.record(StoreCall::Query {
            collection: query.collection.clone(),
        });
        let failure = lock(&self.query_failures).get(&query.collection).cloned();
        match failure {
            Some(error) => Err(error),
            None => self.inner.query(query).await,
        }
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let call = StoreCall::Commit {
            paths: batch.paths().to_vec(),
        };
        let failure = call
            .collection()
            .and_then(|collection| lock(&self.commit_failures).get(collection).cloned());
        self.record(call);
        match failure {
            Some(error) => Err(error),
            None => self.inner.commit(batch).await,
        }
    }
}
