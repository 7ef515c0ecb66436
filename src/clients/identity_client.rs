//! # Identity Client
//!
//! Provides a high-level API for interacting with the identity actor.
use crate::framework::{IdentityRequest, IdentityStore, Response, StoreError};
use crate::model::{IdentityRecord, UserId};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the identity actor.
#[derive(Clone)]
pub struct IdentityClient {
    sender: mpsc::Sender<IdentityRequest>,
}

impl IdentityClient {
    pub fn new(sender: mpsc::Sender<IdentityRequest>) -> Self {
        Self { sender }
    }

    async fn request<T, F>(&self, build: F) -> Result<T, StoreError>
    where
        T: Send,
        F: FnOnce(Response<T>) -> IdentityRequest + Send,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    #[instrument(skip(self, record), fields(uid = %record.uid))]
    pub async fn create_user(&self, record: IdentityRecord) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| IdentityRequest::Create { record, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, uid: &UserId) -> Result<Option<IdentityRecord>, StoreError> {
        debug!("Sending request");
        let uid = uid.clone();
        self.request(|respond_to| IdentityRequest::Get { uid, respond_to })
            .await
    }
}

#[async_trait]
impl IdentityStore for IdentityClient {
    #[instrument(skip(self))]
    async fn delete_user(&self, uid: &UserId) -> Result<(), StoreError> {
        debug!("Sending request");
        let uid = uid.clone();
        self.request(|respond_to| IdentityRequest::Delete { uid, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_identity_client, expect_identity_delete};

    #[tokio::test]
    async fn delete_user_forwards_uid_and_not_found() {
        let (client, mut receiver) = create_mock_identity_client(10);

        let delete_task =
            tokio::spawn(async move { client.delete_user(&UserId::new("user_1")).await });

        let (uid, responder) = expect_identity_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(uid.as_str(), "user_1");
        responder
            .send(Err(StoreError::NotFound("user_1".to_string())))
            .unwrap();

        let result = delete_task.await.unwrap();
        assert_eq!(result, Err(StoreError::NotFound("user_1".to_string())));
    }

    #[tokio::test]
    async fn closed_actor_surfaces_as_actor_closed() {
        let (client, receiver) = create_mock_identity_client(1);
        drop(receiver);

        let result = client.delete_user(&UserId::new("user_1")).await;
        assert_eq!(result, Err(StoreError::ActorClosed));
    }
}
