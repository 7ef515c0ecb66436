use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG`, `info` when unset
/// - **Span tracking**: Every request runs inside a `handler` span carrying the uid
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - One line per deleted record set and per request outcome
/// - `RUST_LOG=debug` - Adds stage transitions, query pages and store traffic
/// - `RUST_LOG=user_purge::orchestrator=debug` - Debug only for the deletion sequence
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
