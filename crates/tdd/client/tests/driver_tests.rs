//! Driver tests against a mock directory.
//!
//! These verify the request shape for each operation (method, path, media
//! type) and that responses come back raw: statuses are passed through and
//! only transport failures become errors.

use serde_json::json;
use std::time::Duration;
use tdd_client::media;
use tdd_client::{ClientError, DirectoryClient, DirectoryConfig};
use tdd_model::ThingBuilder;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> DirectoryClient {
    DirectoryClient::new(DirectoryConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_create_anonymous_posts_td_json() {
    let server = MockServer::start().await;
    let td = ThingBuilder::new().build();

    Mock::given(method("POST"))
        .and(path("/things/"))
        .and(header("content-type", media::THING_DESCRIPTION))
        .and(body_json(&td))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", "/things/_:a1"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).create_anonymous(&td).await.unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.location(), Some("/things/_:a1"));
}

#[tokio::test]
async fn test_create_puts_under_identifier() {
    let server = MockServer::start().await;
    let id = "urn:uuid:6f1c1a2e-0000-4000-8000-000000000001";
    let td = ThingBuilder::new().id(id).build();

    Mock::given(method("PUT"))
        .and(path(format!("/things/{}", id)))
        .and(header("content-type", media::THING_DESCRIPTION))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).create(id, &td).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_patch_uses_merge_patch_media_type() {
    let server = MockServer::start().await;
    let patch = json!({"description": null}).as_object().cloned().unwrap();

    Mock::given(method("PATCH"))
        .and(path("/things/urn:example:lamp"))
        .and(header("content-type", media::MERGE_PATCH))
        .and(body_json(json!({"description": null})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .patch("urn:example:lamp", &patch)
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_retrieve_alias_and_list_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/td/urn:example:lamp"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"{"title": "lamp", "id": "urn:example:lamp"}"#,
                "application/td+json; charset=utf-8",
            ),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"[{"title": "lamp"}]"#, media::JSON_LD),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);

    let single = client.retrieve_td("urn:example:lamp").await.unwrap();
    assert_eq!(
        single.content_type(),
        Some("application/td+json; charset=utf-8")
    );
    assert_eq!(single.media_type().as_deref(), Some(media::THING_DESCRIPTION));
    assert_eq!(single.thing().unwrap()["title"], "lamp");

    let collection = client.list().await.unwrap();
    assert_eq!(collection.media_type().as_deref(), Some(media::JSON_LD));
    assert_eq!(collection.things().unwrap().len(), 1);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .and(header("user-agent", "lab-runner/2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", media::JSON_LD))
        .expect(1)
        .mount(&server)
        .await;

    let config = DirectoryConfig::new(server.uri()).with_user_agent("lab-runner/2");
    let response = DirectoryClient::new(config).unwrap().list().await.unwrap();
    assert_eq!(response.status(), 200);
}

// =============================================================================
// Status pass-through
// =============================================================================

#[tokio::test]
async fn test_error_statuses_are_not_errors() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/things/does-not-exist"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/things/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let deleted = client.delete("does-not-exist").await.unwrap();
    assert_eq!(deleted.status(), 404);
    assert_eq!(deleted.body_text(), "not found");

    let failed = client.retrieve("boom").await.unwrap();
    assert_eq!(failed.status(), 500);
    assert!(!failed.is_success());
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn test_request_deadline_is_enforced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = DirectoryConfig::new(server.uri()).with_request_timeout(Duration::from_millis(200));
    let client = DirectoryClient::new(config).unwrap();

    let err = client.list().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = DirectoryConfig::new(format!("http://{}", addr)).with_connect_timeout(Duration::from_secs(1));
    let client = DirectoryClient::new(config).unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
