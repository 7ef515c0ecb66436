use crate::api::{ApiError, AppState, DeleteUserQuery, SecretQuery};
use crate::orchestrator::{DeletionError, DeletionStage};
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::field::Empty;

pub const COMPLETED_BODY: &str = "User completely deleted";

/// Deletes a user's identity record, profile and auxiliary documents.
///
/// `?secret=...&uid=...[&email=...]`
///
/// - 200 `User completely deleted`
/// - 403 `Unauthorized` when the secret is absent or wrong; nothing is touched
/// - 500 with the failure message otherwise; earlier deletions are not undone
#[tracing::instrument(skip_all, fields(method = %method, uid = Empty))]
pub async fn handler(
    State(state): State<AppState>,
    method: axum::http::Method,
    credential: Result<Query<SecretQuery>, QueryRejection>,
    query: Result<Query<DeleteUserQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    // A secret that cannot be read is treated as absent.
    let secret = match credential {
        Ok(Query(credential)) => credential.secret,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable secret parameter");
            None
        }
    };

    tracing::debug!(stage = %DeletionStage::Unauthenticated, "Entering stage");
    state
        .authenticator
        .authorize(secret.as_deref())
        .inspect_err(|e| tracing::warn!(reason = ?e, "rejected deletion request"))?;
    tracing::debug!(stage = %DeletionStage::Authenticated, "Entering stage");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let e = DeletionError::MalformedQuery(rejection.body_text());
            tracing::error!(
                error = %e,
                stage = %DeletionStage::Failed,
                failed_at = %e.stage(),
                "invalid deletion request"
            );
            return Err(e.into());
        }
    };

    let target = query.into_target().inspect_err(|e| {
        tracing::error!(
            error = %e,
            stage = %DeletionStage::Failed,
            failed_at = %e.stage(),
            "invalid deletion request"
        );
    })?;
    tracing::Span::current().record("uid", target.uid.as_str());

    state
        .orchestrator
        .delete_user(&target)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = %e,
                stage = %DeletionStage::Failed,
                failed_at = %e.stage(),
                "unable to delete user"
            );
        })?;

    Ok((StatusCode::OK, COMPLETED_BODY).into_response())
}
