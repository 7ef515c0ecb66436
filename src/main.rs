//! # User Purge
//!
//! Serves the `/deleteUserCompletely` endpoint against in-memory stores.
//!
//! ## 📚 Quick Start
//!
//! ```bash
//! DELETION_SECRET=change-me SEED_FILE=fixtures/demo.json RUST_LOG=info cargo run
//! curl "localhost:8080/deleteUserCompletely?secret=change-me&uid=u1"
//! ```
//!
//! Settings are listed in [`user_purge::runtime::config`].

use user_purge::api::{self, AppState};
use user_purge::auth::RequestAuthenticator;
use user_purge::runtime::{setup_tracing, AppConfig, Fixture, PurgeSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting user purge service");

    // Start the stores before accepting traffic
    let system = PurgeSystem::new(config.store_limits);

    if let Some(path) = &config.seed_file {
        let fixture = Fixture::from_path(path).map_err(|e| e.to_string())?;
        system.seed(fixture).await.map_err(|e| e.to_string())?;
    }

    let state = AppState {
        authenticator: RequestAuthenticator::new(config.secret.clone()),
        orchestrator: system.orchestrator(config.query_page_size),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| e.to_string())?;
    info!(addr = %config.bind_addr, route = api::DELETE_USER_ROUTE, "Listening");

    let served = axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server stopped with an error");
    }

    // The router (and the orchestrator it owned) is gone, so the actors can drain.
    system.shutdown().await?;
    served.map_err(|e| e.to_string())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
