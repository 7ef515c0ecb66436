//! Fixture loading for the in-memory stores.
//!
//! ```json
//! {
//!   "identities": [{ "uid": "u1", "email": "u1@example.com" }],
//!   "documents": {
//!     "users": { "u1": { "name": "Ada" } },
//!     "favorites": { "f1": { "userId": "u1" } }
//!   }
//! }
//! ```

use crate::clients::{DocumentClient, IdentityClient};
use crate::framework::StoreError;
use crate::model::{DocumentPath, Fields, IdentityRecord};
use crate::runtime::PurgeSystem;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to load seed data: {0}")]
    Store(#[from] StoreError),
}

/// Initial contents of the identity and document stores.
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub identities: Vec<IdentityRecord>,
    /// `collection -> document id -> fields`
    #[serde(default)]
    pub documents: BTreeMap<String, BTreeMap<String, Fields>>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub async fn apply(
        self,
        identity: &IdentityClient,
        documents: &DocumentClient,
    ) -> Result<(), SeedError> {
        let identities = self.identities.len();
        for record in self.identities {
            identity.create_user(record).await?;
        }

        let mut loaded = 0;
        for (collection, docs) in self.documents {
            for (id, fields) in docs {
                documents
                    .set(DocumentPath::new(collection.as_str(), id), fields)
                    .await?;
                loaded += 1;
            }
        }

        info!(identities, documents = loaded, "Seed data loaded");
        Ok(())
    }
}

impl PurgeSystem {
    pub async fn seed(&self, fixture: Fixture) -> Result<(), SeedError> {
        fixture
            .apply(&self.identity_client, &self.document_client)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_actor::DocumentStoreLimits;
    use crate::framework::DocumentStore;

    #[tokio::test]
    async fn fixture_loads_identities_and_documents() {
        let fixture = Fixture::from_json(
            r#"{
                "identities": [{ "uid": "u1", "email": "u1@example.com" }],
                "documents": { "favorites": { "f1": { "userId": "u1" } } }
            }"#,
        )
        .unwrap();

        let system = PurgeSystem::new(DocumentStoreLimits::default());
        system.seed(fixture).await.unwrap();

        let record = system
            .identity_client
            .get_user(&"u1".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.email.as_deref(), Some("u1@example.com"));

        let doc = system
            .document_client
            .get(&DocumentPath::new("favorites", "f1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.field("userId"), Some(&serde_json::json!("u1")));

        system.shutdown().await.unwrap();
    }

    #[test]
    fn malformed_fixture_is_a_parse_error() {
        let err = Fixture::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
