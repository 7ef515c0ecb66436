//! HTTP surface: a single route that accepts any method.

pub mod delete_user;
pub mod error;
pub mod query;

use crate::auth::RequestAuthenticator;
use crate::orchestrator::DeletionOrchestrator;
use axum::{Router, routing::any};

pub use error::ApiError;
pub use query::{DeleteUserQuery, SecretQuery};

pub const DELETE_USER_ROUTE: &str = "/deleteUserCompletely";

/// Shared by every request; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: RequestAuthenticator,
    pub orchestrator: DeletionOrchestrator,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(DELETE_USER_ROUTE, any(delete_user::handler))
        .with_state(state)
}
