//! Integration tests for the HTTP clients against a mock backend.

use std::sync::Arc;

use sarathi_core::ApiError;
use sarathi_core::chat::AnswerSource;
use sarathi_core::session::{SessionRecord, SessionStore};
use sarathi_infrastructure::MemoryStore;
use sarathi_interaction::answer_client::HttpAnswerSource;
use sarathi_interaction::auth_client::{
    AuthClient, INVALID_CREDENTIALS_MESSAGE, LoginError, LoginRequest,
};
use sarathi_interaction::authenticator::Authenticator;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fresh_session() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MemoryStore::new())))
}

fn signed_in_session() -> Arc<SessionStore> {
    let session = fresh_session();
    session.record_login(&SessionRecord {
        token: "tok-123".to_string(),
        token_kind: "Bearer".to_string(),
        principal_id: "user@example.com".to_string(),
        issued_at: "2024-01-01T00:00:00Z".to_string(),
        lifetime_seconds: 3600,
    });
    session
}

fn answer_source(server: &MockServer, session: Arc<SessionStore>) -> HttpAnswerSource {
    HttpAnswerSource::new(format!("{}/api/questions", server.uri()), session)
}

fn auth_client(server: &MockServer) -> AuthClient {
    AuthClient::new(format!("{}/api/auth/login", server.uri()))
}

#[tokio::test]
async fn answer_request_carries_token_and_capitalized_question_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(body_json(json!({ "Question": "what is rag?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "42" })))
        .expect(1)
        .mount(&server)
        .await;

    let source = answer_source(&server, signed_in_session());
    let answer = source.answer("what is rag?").await.unwrap();

    assert_eq!(answer, "42");
}

#[tokio::test]
async fn answer_works_without_a_stored_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "guest" })))
        .mount(&server)
        .await;

    let source = answer_source(&server, fresh_session());

    assert_eq!(source.answer("hello").await.unwrap(), "guest");
}

#[tokio::test]
async fn rejected_token_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let source = answer_source(&server, signed_in_session());
    let err = source.answer("hello").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized { status: 401 });
}

#[tokio::test]
async fn failing_backend_maps_to_server_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = answer_source(&server, signed_in_session());
    let err = source.answer("hello").await.unwrap_err();

    assert_eq!(err, ApiError::ServerFault { status: 503 });
}

#[tokio::test]
async fn other_statuses_stay_unclassified_with_the_body_attached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .mount(&server)
        .await;

    let source = answer_source(&server, signed_in_session());
    let err = source.answer("hello").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Unclassified {
            status: Some(404),
            message: "no such route".to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_backend_maps_to_unreachable() {
    // Nothing listens on the discard port.
    let source = HttpAnswerSource::new("http://127.0.0.1:9/api/questions", fresh_session());

    let err = source.answer("hello").await.unwrap_err();

    assert_eq!(err, ApiError::Unreachable);
}

#[tokio::test]
async fn malformed_answer_body_stays_unclassified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = answer_source(&server, signed_in_session());
    let err = source.answer("hello").await.unwrap_err();

    match err {
        ApiError::Unclassified { status, message } => {
            assert_eq!(status, Some(200));
            assert!(message.starts_with("malformed answer body"), "{message}");
        }
        other => panic!("expected Unclassified, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_login_records_a_usable_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "authToken": "tok-777",
            "email": "user@example.com",
            "expiresIn": 3600,
            "tokenType": "Bearer",
            "timestamp": "2024-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = fresh_session();
    let authenticator = Authenticator::new(auth_client(&server), session.clone());

    let body = authenticator
        .sign_in("user@example.com", "hunter2")
        .await
        .unwrap();

    assert_eq!(body.auth_token, "tok-777");
    assert_eq!(session.authorization_header(), "Bearer tok-777");
    assert_eq!(session.principal().as_deref(), Some("user@example.com"));
    assert!(session.is_authenticated_at("2024-01-01T00:30:00Z".parse().unwrap()));

    // Signing out clears the record again.
    authenticator.sign_out();
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn rejected_credentials_leave_the_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "bad credentials",
        })))
        .mount(&server)
        .await;

    let session = fresh_session();
    let authenticator = Authenticator::new(auth_client(&server), session.clone());

    let err = authenticator
        .sign_in("user@example.com", "wrong")
        .await
        .unwrap_err();

    // The fixed wording wins over whatever the body said.
    assert_eq!(err, LoginError::InvalidCredentials { status: 401 });
    assert_eq!(err.to_string(), INVALID_CREDENTIALS_MESSAGE);
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn server_declared_failure_on_200_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Account disabled",
        })))
        .mount(&server)
        .await;

    let err = auth_client(&server)
        .login(&LoginRequest {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LoginError::Rejected {
            message: "Account disabled".to_string()
        }
    );
}

#[tokio::test]
async fn login_against_failing_backend_is_a_server_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let session = fresh_session();
    let authenticator = Authenticator::new(auth_client(&server), session);

    let err = authenticator
        .sign_in("user@example.com", "hunter2")
        .await
        .unwrap_err();

    assert_eq!(err, LoginError::ServerFault { status: 502 });
    assert_eq!(err.to_string(), "Server error. Please try again later.");
}

#[tokio::test]
async fn login_with_unreachable_backend_reads_as_connection_problem() {
    let client = AuthClient::new("http://127.0.0.1:9/api/auth/login");

    let err = client
        .login(&LoginRequest {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, LoginError::Unreachable);
    assert_eq!(
        err.to_string(),
        "Cannot connect to server. Please check your connection."
    );
}

#[tokio::test]
async fn unexpected_login_status_carries_the_body_explanation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "error": "Account locked",
        })))
        .mount(&server)
        .await;

    let err = auth_client(&server)
        .login(&LoginRequest {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LoginError::Other {
            message: "Account locked".to_string()
        }
    );
}
