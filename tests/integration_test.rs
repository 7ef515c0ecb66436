use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use user_purge::api::{self, AppState};
use user_purge::auth::RequestAuthenticator;
use user_purge::document_actor::DocumentStoreLimits;
use user_purge::framework::mock::{RecordingDocumentStore, RecordingIdentityStore};
use user_purge::framework::DocumentStore;
use user_purge::model::{DocumentPath, IdentityRecord, UserId, MAX_USER_ID_LEN};
use user_purge::orchestrator::DeletionOrchestrator;
use user_purge::runtime::{DeletionSecret, Fixture, PurgeSystem};

const SECRET: &str = "s3cr3t-value";

const FIXTURE: &str = r#"{
    "identities": [{ "uid": "u1", "email": "u1@example.com" }],
    "documents": {
        "users": { "u1": { "name": "Ada" } },
        "favorites": { "f1": { "userId": "u1" } },
        "reviews": { "r1": { "userId": "u1" } }
    }
}"#;

struct TestApp {
    router: Router,
    system: PurgeSystem,
    identity: RecordingIdentityStore,
    documents: RecordingDocumentStore,
}

async fn test_app() -> TestApp {
    let system = PurgeSystem::new(DocumentStoreLimits::default());
    system
        .seed(Fixture::from_json(FIXTURE).unwrap())
        .await
        .unwrap();

    let identity = RecordingIdentityStore::new(Arc::new(system.identity_client.clone()));
    let documents = RecordingDocumentStore::new(Arc::new(system.document_client.clone()));
    let state = AppState {
        authenticator: RequestAuthenticator::new(DeletionSecret::from_static(SECRET)),
        orchestrator: DeletionOrchestrator::new(
            Arc::new(identity.clone()),
            Arc::new(documents.clone()),
        ),
    };

    TestApp {
        router: api::router(state),
        system,
        identity,
        documents,
    }
}

async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_wrong_secret_is_forbidden_and_touches_nothing() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/deleteUserCompletely?secret=wrong&uid=u1",
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Unauthorized");
    assert!(app.identity.calls().is_empty());
    assert!(app.documents.calls().is_empty());
    assert!(app
        .system
        .identity_client
        .get_user(&UserId::new("u1"))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_missing_secret_is_forbidden() {
    let app = test_app().await;

    for uri in ["/deleteUserCompletely?uid=u1", "/deleteUserCompletely"] {
        let (status, body) = send(&app.router, Method::GET, uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body, "Unauthorized");
    }
    assert!(app.identity.calls().is_empty());
}

#[tokio::test]
async fn test_valid_request_deletes_user_completely() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}&uid=u1&email=u1%40example.com");

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "User completely deleted");
    for (collection, id) in [("users", "u1"), ("favorites", "f1"), ("reviews", "r1")] {
        let doc = app
            .system
            .document_client
            .get(&DocumentPath::new(collection, id))
            .await
            .unwrap();
        assert!(doc.is_none(), "{collection}/{id} survived");
    }
}

#[tokio::test]
async fn test_any_method_is_accepted() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}&uid=u1");

    let (status, _) = send(&app.router, Method::POST, &uri).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_request_reports_missing_identity() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}&uid=u1");

    let (first, _) = send(&app.router, Method::GET, &uri).await;
    let (second, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("no user record"), "unexpected body: {body}");
}

#[tokio::test]
async fn test_missing_uid_after_valid_secret_is_a_server_error() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}");

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "The uid query parameter is required");
    assert!(app.identity.calls().is_empty());
}

#[tokio::test]
async fn test_store_failure_message_is_returned_verbatim() {
    let app = test_app().await;
    app.documents.fail_queries_for(
        "favorites",
        user_purge::framework::StoreError::Backend("quota exhausted".to_string()),
    );
    let uri = format!("/deleteUserCompletely?secret={SECRET}&uid=u1");

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "quota exhausted");
}

#[tokio::test]
async fn test_other_paths_are_not_routed() {
    let app = test_app().await;
    let uri = format!("/deleteUser?secret={SECRET}&uid=u1");

    let (status, _) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.identity.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_uid_after_valid_secret_is_a_server_error() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}&uid=u1&uid=u2");

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("uid"), "unexpected body: {body}");
    assert!(app.identity.calls().is_empty());
    assert!(app.documents.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_secret_is_forbidden() {
    let app = test_app().await;
    let uri = format!("/deleteUserCompletely?secret={SECRET}&secret={SECRET}&uid=u1");

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Unauthorized");
    assert!(app.identity.calls().is_empty());
}

#[tokio::test]
async fn test_multibyte_uid_at_the_length_limit_is_deleted() {
    let app = test_app().await;
    let uid = "€".repeat(MAX_USER_ID_LEN);
    app.system
        .identity_client
        .create_user(IdentityRecord::new(uid.as_str()))
        .await
        .unwrap();
    let uri = format!(
        "/deleteUserCompletely?secret={SECRET}&uid={}",
        "%E2%82%AC".repeat(MAX_USER_ID_LEN)
    );

    let (status, body) = send(&app.router, Method::GET, &uri).await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    assert!(app
        .system
        .identity_client
        .get_user(&UserId::new(uid))
        .await
        .unwrap()
        .is_none());
}
