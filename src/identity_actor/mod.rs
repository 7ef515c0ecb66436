//! # Identity Actor
//!
//! In-memory authentication store. It owns every [`IdentityRecord`] and processes
//! [`IdentityRequest`]s one at a time, so no locking is needed around the record map.
//!
//! ## Usage
//!
//! ```rust
//! use user_purge::identity_actor;
//! use user_purge::framework::IdentityStore;
//! use user_purge::model::{IdentityRecord, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = identity_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     client.create_user(IdentityRecord::new("u1")).await?;
//!     client.delete_user(&UserId::new("u1")).await?;
//!     assert!(client.delete_user(&UserId::new("u1")).await.is_err());
//!     Ok(())
//! }
//! ```

use crate::clients::IdentityClient;
use crate::framework::{IdentityRequest, StoreError};
use crate::model::{IdentityRecord, UserId};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const STORE: &str = "identity";

/// Creates a new identity actor and its client.
pub fn new(buffer_size: usize) -> (IdentityActor, IdentityClient) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let actor = IdentityActor {
        receiver,
        records: HashMap::new(),
    };
    (actor, IdentityClient::new(sender))
}

/// The server half of the identity store. Must be driven with [`IdentityActor::run`].
pub struct IdentityActor {
    receiver: mpsc::Receiver<IdentityRequest>,
    records: HashMap<UserId, IdentityRecord>,
}

impl IdentityActor {
    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(store = STORE, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                IdentityRequest::Create { record, respond_to } => {
                    let _ = respond_to.send(self.create(record));
                }
                IdentityRequest::Get { uid, respond_to } => {
                    let record = self.records.get(&uid).cloned();
                    debug!(store = STORE, %uid, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                IdentityRequest::Delete { uid, respond_to } => {
                    let _ = respond_to.send(self.delete(&uid));
                }
            }
        }

        info!(store = STORE, size = self.records.len(), "Shutdown");
    }

    fn create(&mut self, record: IdentityRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.uid) {
            warn!(store = STORE, uid = %record.uid, "Already exists");
            return Err(StoreError::AlreadyExists(record.uid.to_string()));
        }
        let uid = record.uid.clone();
        self.records.insert(uid.clone(), record);
        info!(store = STORE, %uid, size = self.records.len(), "Created");
        Ok(())
    }

    fn delete(&mut self, uid: &UserId) -> Result<(), StoreError> {
        match self.records.remove(uid) {
            Some(_) => {
                info!(store = STORE, %uid, size = self.records.len(), "Deleted");
                Ok(())
            }
            None => {
                warn!(store = STORE, %uid, "Not found");
                Err(StoreError::NotFound(uid.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::IdentityStore;

    #[tokio::test]
    async fn delete_is_not_idempotent() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run());

        client
            .create_user(IdentityRecord::new("u1").with_email("u1@example.com"))
            .await
            .unwrap();
        let uid = UserId::new("u1");
        assert!(client.get_user(&uid).await.unwrap().is_some());

        client.delete_user(&uid).await.unwrap();
        assert!(client.get_user(&uid).await.unwrap().is_none());

        let second = client.delete_user(&uid).await;
        assert_eq!(second, Err(StoreError::NotFound("u1".to_string())));
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run());

        client.create_user(IdentityRecord::new("u1")).await.unwrap();
        let result = client.create_user(IdentityRecord::new("u1")).await;
        assert_eq!(result, Err(StoreError::AlreadyExists("u1".to_string())));
    }
}
