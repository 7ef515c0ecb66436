//! # Document Client
//!
//! Provides a high-level API for interacting with the document actor.
use crate::framework::{DocumentRequest, DocumentStore, Response, StoreError};
use crate::model::{Document, DocumentPath, FieldQuery, Fields, QueryPage, WriteBatch};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the document actor.
#[derive(Clone)]
pub struct DocumentClient {
    sender: mpsc::Sender<DocumentRequest>,
}

impl DocumentClient {
    pub fn new(sender: mpsc::Sender<DocumentRequest>) -> Self {
        Self { sender }
    }

    async fn request<T, F>(&self, build: F) -> Result<T, StoreError>
    where
        T: Send,
        F: FnOnce(Response<T>) -> DocumentRequest + Send,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Creates or replaces the document at `path`.
    #[instrument(skip(self, fields), fields(path = %path))]
    pub async fn set(&self, path: DocumentPath, fields: Fields) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| DocumentRequest::Set {
            path,
            fields,
            respond_to,
        })
        .await
    }
}

#[async_trait]
impl DocumentStore for DocumentClient {
    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let path = path.clone();
        self.request(|respond_to| DocumentRequest::Get { path, respond_to })
            .await
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        debug!("Sending request");
        let path = path.clone();
        self.request(|respond_to| DocumentRequest::Delete { path, respond_to })
            .await
    }

    #[instrument(skip(self, query), fields(collection = %query.collection))]
    async fn query(&self, query: FieldQuery) -> Result<QueryPage, StoreError> {
        debug!(?query, "Sending request");
        self.request(|respond_to| DocumentRequest::Query { query, respond_to })
            .await
    }

    #[instrument(skip(self, batch), fields(size = batch.len()))]
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| DocumentRequest::Commit { batch, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_document_client, expect_commit, expect_query};

    #[tokio::test]
    async fn query_returns_page_from_actor() {
        let (client, mut receiver) = create_mock_document_client(10);

        let query_task = tokio::spawn(async move {
            client
                .query(FieldQuery::eq("reviews", "userId", "user_1").limit(2))
                .await
        });

        let (query, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(query.collection, "reviews");
        assert_eq!(query.limit, Some(2));

        let page = QueryPage {
            refs: vec![DocumentPath::new("reviews", "r1")],
            next_cursor: Some("r1".to_string()),
        };
        responder.send(Ok(page.clone())).unwrap();

        assert_eq!(query_task.await.unwrap(), Ok(page));
    }

    #[tokio::test]
    async fn commit_sends_whole_batch_in_one_request() {
        let (client, mut receiver) = create_mock_document_client(10);

        let mut batch = WriteBatch::new();
        batch
            .delete(DocumentPath::new("favorites", "f1"))
            .delete(DocumentPath::new("favorites", "f2"));

        let commit_task = tokio::spawn(async move { client.commit(batch).await });

        let (received, responder) = expect_commit(&mut receiver)
            .await
            .expect("Expected Commit request");
        assert_eq!(received.len(), 2);
        responder.send(Ok(())).unwrap();

        assert!(commit_task.await.unwrap().is_ok());
    }
}
