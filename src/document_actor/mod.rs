//! # Document Actor
//!
//! In-memory document store organised as `collection -> id -> fields`.
//!
//! ## Behaviour
//!
//! * **Delete** of a missing document succeeds.
//! * **Query** walks a collection in id order and returns at most
//!   [`DocumentStoreLimits::page_cap`] refs per page, with a cursor when more remain.
//! * **Commit** validates the batch against [`DocumentStoreLimits::max_batch_writes`]
//!   before touching anything, then applies every delete. Since the actor handles one
//!   message at a time, no other request observes a half-applied batch.

use crate::clients::DocumentClient;
use crate::framework::{DocumentRequest, StoreError};
use crate::model::{Document, DocumentPath, FieldQuery, Fields, QueryPage, WriteBatch};
use std::collections::BTreeMap;
use std::ops::Bound;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const STORE: &str = "document";

/// Limits the in-memory store enforces, mirroring those of hosted document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStoreLimits {
    /// Maximum refs returned by one query page.
    pub page_cap: usize,
    /// Maximum writes accepted in one batch.
    pub max_batch_writes: usize,
}

impl Default for DocumentStoreLimits {
    fn default() -> Self {
        Self {
            page_cap: 500,
            max_batch_writes: 500,
        }
    }
}

/// Creates a new document actor and its client.
pub fn new(buffer_size: usize, limits: DocumentStoreLimits) -> (DocumentActor, DocumentClient) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let actor = DocumentActor {
        receiver,
        collections: BTreeMap::new(),
        limits,
    };
    (actor, DocumentClient::new(sender))
}

/// The server half of the document store. Must be driven with [`DocumentActor::run`].
pub struct DocumentActor {
    receiver: mpsc::Receiver<DocumentRequest>,
    collections: BTreeMap<String, BTreeMap<String, Fields>>,
    limits: DocumentStoreLimits,
}

impl DocumentActor {
    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(store = STORE, limits = ?self.limits, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DocumentRequest::Set {
                    path,
                    fields,
                    respond_to,
                } => {
                    debug!(store = STORE, %path, "Set");
                    self.collections
                        .entry(path.collection().to_string())
                        .or_default()
                        .insert(path.id().to_string(), fields);
                    let _ = respond_to.send(Ok(()));
                }
                DocumentRequest::Get { path, respond_to } => {
                    let document = self.get(&path);
                    debug!(store = STORE, %path, found = document.is_some(), "Get");
                    let _ = respond_to.send(Ok(document));
                }
                DocumentRequest::Delete { path, respond_to } => {
                    let existed = self.remove(&path);
                    info!(store = STORE, %path, existed, "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                DocumentRequest::Query { query, respond_to } => {
                    let page = self.query(&query);
                    debug!(
                        store = STORE,
                        collection = %query.collection,
                        matched = page.refs.len(),
                        more = page.next_cursor.is_some(),
                        "Query"
                    );
                    let _ = respond_to.send(Ok(page));
                }
                DocumentRequest::Commit { batch, respond_to } => {
                    let _ = respond_to.send(self.commit(batch));
                }
            }
        }

        info!(store = STORE, size = self.len(), "Shutdown");
    }

    fn len(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    fn get(&self, path: &DocumentPath) -> Option<Document> {
        self.collections
            .get(path.collection())
            .and_then(|docs| docs.get(path.id()))
            .map(|fields| Document {
                path: path.clone(),
                fields: fields.clone(),
            })
    }

    fn remove(&mut self, path: &DocumentPath) -> bool {
        self.collections
            .get_mut(path.collection())
            .and_then(|docs| docs.remove(path.id()))
            .is_some()
    }

    fn query(&self, query: &FieldQuery) -> QueryPage {
        let Some(docs) = self.collections.get(&query.collection) else {
            return QueryPage::default();
        };

        let page_size = query
            .limit
            .map_or(self.limits.page_cap, |limit| limit.min(self.limits.page_cap))
            .max(1);
        let lower = match &query.start_after {
            Some(cursor) => Bound::Excluded(cursor.clone()),
            None => Bound::Unbounded,
        };

        let mut matched = docs
            .range::<String, _>((lower, Bound::Unbounded))
            .filter(|(_, fields)| query.matches(fields))
            .map(|(id, _)| id);

        let refs: Vec<DocumentPath> = matched
            .by_ref()
            .take(page_size)
            .map(|id| DocumentPath::new(query.collection.as_str(), id.as_str()))
            .collect();
        let next_cursor = match matched.next() {
            Some(_) => refs.last().map(|path| path.id().to_string()),
            None => None,
        };

        QueryPage { refs, next_cursor }
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        let size = batch.len();
        if size > self.limits.max_batch_writes {
            warn!(
                store = STORE,
                size,
                limit = self.limits.max_batch_writes,
                "Batch rejected"
            );
            return Err(StoreError::BatchTooLarge {
                size,
                limit: self.limits.max_batch_writes,
            });
        }

        let removed = batch
            .into_paths()
            .iter()
            .filter(|path| self.remove(path))
            .count();
        info!(store = STORE, size, removed, "Committed");
        Ok(())
    }
}
