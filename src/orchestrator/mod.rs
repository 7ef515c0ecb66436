//! # Deletion Orchestrator
//!
//! Runs the cascading deletion of one user, strictly in this order:
//!
//! 1. **Identity record** in the authentication store.
//! 2. **Profile document** at `users/{uid}`. Missing profiles are fine.
//! 3. **Auxiliary sweep** of each collection in [`AuxiliaryCollection::ALL`]: every
//!    document whose `userId` equals the uid is gathered (page by page) and deleted in
//!    one batch per collection.
//!
//! Each step is awaited before the next starts. The first failure aborts everything
//! after it and nothing already deleted is restored, so a failed request can leave the
//! user partially deleted. The [`DeletionError`] tells which stage failed.
//!
//! ```rust
//! use std::sync::Arc;
//! use user_purge::document_actor::{self, DocumentStoreLimits};
//! use user_purge::identity_actor;
//! use user_purge::model::{DeletionTarget, IdentityRecord, UserId};
//! use user_purge::orchestrator::DeletionOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (identity_actor, identity) = identity_actor::new(32);
//!     let (document_actor, documents) = document_actor::new(32, DocumentStoreLimits::default());
//!     tokio::spawn(identity_actor.run());
//!     tokio::spawn(document_actor.run());
//!
//!     identity.create_user(IdentityRecord::new("u1")).await?;
//!
//!     let orchestrator = DeletionOrchestrator::new(Arc::new(identity), Arc::new(documents));
//!     let report = orchestrator
//!         .delete_user(&DeletionTarget::new(UserId::new("u1")))
//!         .await?;
//!     assert_eq!(report.total_deleted(), 0);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod stage;
mod sweep;

pub use error::*;
pub use stage::*;

use crate::framework::{DocumentStore, IdentityStore, StoreError};
use crate::model::{AuxiliaryCollection, DeletionTarget, DocumentPath, UserId};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Page size requested from the document store while sweeping.
pub const DEFAULT_QUERY_PAGE_SIZE: usize = 300;

/// Documents removed from one auxiliary collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub collection: AuxiliaryCollection,
    pub deleted: usize,
}

/// Summary of a completed deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionReport {
    pub uid: UserId,
    pub swept: Vec<SweepOutcome>,
}

impl DeletionReport {
    pub fn total_deleted(&self) -> usize {
        self.swept.iter().map(|outcome| outcome.deleted).sum()
    }

    /// One batch is committed per collection that had anything to delete.
    pub fn batches_committed(&self) -> usize {
        self.swept.iter().filter(|outcome| outcome.deleted > 0).count()
    }
}

/// Executes the deletion sequence against an identity store and a document store.
#[derive(Clone)]
pub struct DeletionOrchestrator {
    identity: Arc<dyn IdentityStore>,
    documents: Arc<dyn DocumentStore>,
    page_size: usize,
}

impl DeletionOrchestrator {
    pub fn new(identity: Arc<dyn IdentityStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            identity,
            documents,
            page_size: DEFAULT_QUERY_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Deletes every trace of `target.uid`, stopping at the first failure.
    #[instrument(skip(self, target), fields(uid = %target.uid))]
    pub async fn delete_user(
        &self,
        target: &DeletionTarget,
    ) -> Result<DeletionReport, DeletionError> {
        let uid = &target.uid;
        debug!(has_email = target.email.is_some(), "Starting deletion");

        enter(DeletionStage::DeletingIdentity);
        self.identity
            .delete_user(uid)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => DeletionError::IdentityNotFound(uid.clone()),
                other => DeletionError::IdentityStore(other),
            })?;
        info!("Deleted identity record");

        enter(DeletionStage::DeletingProfile);
        let profile = DocumentPath::profile(uid);
        match self.documents.delete(&profile).await {
            Ok(()) | Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(DeletionError::ProfileStore(e)),
        }
        info!(path = %profile, "Deleted profile document");

        let mut swept = Vec::with_capacity(AuxiliaryCollection::ALL.len());
        for collection in AuxiliaryCollection::ALL {
            enter(DeletionStage::Sweeping(collection));
            let deleted = self.sweep(uid, collection).await?;
            swept.push(SweepOutcome {
                collection,
                deleted,
            });
        }

        let report = DeletionReport {
            uid: uid.clone(),
            swept,
        };
        enter(DeletionStage::Completed);
        info!(
            deleted = report.total_deleted(),
            batches = report.batches_committed(),
            "User completely deleted"
        );
        Ok(report)
    }
}

fn enter(stage: DeletionStage) {
    debug!(%stage, "Entering stage");
}
