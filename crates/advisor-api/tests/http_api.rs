//! HttpChatApi against a mock server.

use advisor_api::{ApiError, ChatApi, Credentials, EntryKind, HttpChatApi};
use advisor_config::ApiConfig;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpChatApi {
    let config = ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..ApiConfig::default()
    };
    HttpChatApi::new(&config, &Credentials::new("tok-123")).unwrap()
}

#[tokio::test]
async fn health_probe_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "Legal Advisor RAG API",
            "neo4j_connected": true,
            "documents_loaded": true,
            "message": "Connection successful"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).health().await.unwrap();
    assert!(report.is_ready());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn unhealthy_500_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "unhealthy",
            "error": "neo4j down"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn query_sends_question_session_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query/"))
        .and(header("authorization", "Token tok-123"))
        .and(body_json(json!({"question": "What is Khula?", "session_id": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Khula is...",
            "sources": [{"content": "Sec. 2, Ord. VIII"}],
            "session_id": "abc-123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .query("What is Khula?", None)
        .await
        .unwrap();
    assert_eq!(reply.answer.as_deref(), Some("Khula is..."));
    assert_eq!(reply.sources[0].content, "Sec. 2, Ord. VIII");
    assert_eq!(reply.session_id.as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn query_on_existing_session_passes_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query/"))
        .and(body_json(json!({"question": "And dower?", "session_id": "abc-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Dower is...",
            "sources": [],
            "session_id": "abc-123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .query("And dower?", Some("abc-123"))
        .await
        .unwrap();
    assert_eq!(reply.answer.as_deref(), Some("Dower is..."));
}

#[tokio::test]
async fn rejected_token_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})))
        .mount(&server)
        .await;

    let err = client_for(&server).list_sessions().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized(401));
}

#[tokio::test]
async fn list_sessions_and_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s-2", "name": "Inheritance shares", "updated_at": "2026-10-18T09:30:00Z"},
            {"id": "s-1", "name": "What is Khula?", "updated_at": "2026-10-17T12:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history/s-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "user", "content": "What is Khula?", "timestamp": "12:00"},
            {"type": "bot", "content": "Khula is...", "timestamp": "12:00"}
        ])))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let sessions = api.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, "s-2");
    assert_eq!(sessions[1].name, "What is Khula?");

    let entries = api.session_messages("s-1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, EntryKind::User);
    assert_eq!(entries[1].content, "Khula is...");
}

#[tokio::test]
async fn delete_session_hits_delete_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/s-1/delete/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_session("s-1").await.unwrap();
}

#[tokio::test]
async fn delete_failure_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/s-404/delete/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("session not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_session("s-404")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            body: "session not found".into()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_sessions().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        connect_timeout_secs: 1,
        ..ApiConfig::default()
    };
    let api = HttpChatApi::new(&config, &Credentials::new("tok")).unwrap();
    let err = api.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
}
