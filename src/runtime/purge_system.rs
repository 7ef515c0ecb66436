use crate::clients::{DocumentClient, IdentityClient};
use crate::document_actor::{self, DocumentStoreLimits};
use crate::identity_actor;
use crate::orchestrator::DeletionOrchestrator;
use std::sync::Arc;
use tracing::{error, info};

const CHANNEL_CAPACITY: usize = 64;

/// Owns the in-memory store actors the deletion endpoint runs against.
///
/// `PurgeSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the identity and document actors
/// - **Dependency Wiring**: Handing store clients to the [`DeletionOrchestrator`]
///
/// # Example
///
/// ```ignore
/// let system = PurgeSystem::new(DocumentStoreLimits::default());
/// let orchestrator = system.orchestrator(300);
///
/// // ... serve requests ...
///
/// drop(orchestrator);
/// system.shutdown().await?;
/// ```
pub struct PurgeSystem {
    /// Client for the authentication store actor
    pub identity_client: IdentityClient,

    /// Client for the document store actor
    pub document_client: DocumentClient,

    /// Task handles for the running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PurgeSystem {
    /// Spawns both store actors. Must be called from within a Tokio runtime.
    pub fn new(limits: DocumentStoreLimits) -> Self {
        let (identity_actor, identity_client) = identity_actor::new(CHANNEL_CAPACITY);
        let (document_actor, document_client) = document_actor::new(CHANNEL_CAPACITY, limits);

        let identity_handle = tokio::spawn(identity_actor.run());
        let document_handle = tokio::spawn(document_actor.run());

        Self {
            identity_client,
            document_client,
            handles: vec![identity_handle, document_handle],
        }
    }

    /// Builds an orchestrator backed by this system's stores.
    pub fn orchestrator(&self, query_page_size: usize) -> DeletionOrchestrator {
        DeletionOrchestrator::new(
            Arc::new(self.identity_client.clone()),
            Arc::new(self.document_client.clone()),
        )
        .with_page_size(query_page_size)
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the clients closes the channels; each actor then drains and exits.
    /// Every other client clone (for example inside an orchestrator) must already be
    /// gone, otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down stores...");

        drop(self.identity_client);
        drop(self.document_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
