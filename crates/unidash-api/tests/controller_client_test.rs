#![allow(clippy::unwrap_used)]
// Integration tests for `ControllerClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unidash_api::{ControllerClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ControllerClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        ControllerClient::new(base_url, "default".into(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("hunter2")).await.unwrap();
}

#[tokio::test]
async fn test_login_failure_reports_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "meta": { "rc": "error", "msg": "api.err.Invalid" }, "data": [] })),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;

    match result {
        Err(Error::Authentication { status, message }) => {
            assert_eq!(status, Some(400));
            assert!(message.contains("400"), "message: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_unreachable_is_transport_error() {
    // Nothing listens on the discard port.
    let client = ControllerClient::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        "default".into(),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.login("admin", &secret("pw")).await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "unifises=s3ss10n; Path=/")
                .set_body_json(json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .and(header("cookie", "unifises=s3ss10n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    assert!(client.has_session_cookie());

    let body = client.get_site_json("stat/sta").await.unwrap();
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_logout_posts_to_logout_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

// ── Data call tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_get_unauthorized_is_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_site_json("stat/sta").await.unwrap_err();
    assert!(err.is_auth_expired(), "expected SessionExpired, got: {err:?}");
}

#[tokio::test]
async fn test_get_server_error_is_status_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.get_site_json("stat/sta").await.unwrap_err();
    match err {
        Error::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_error_body_with_200() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": { "code": 401, "message": "Unauthorized" } })),
        )
        .mount(&server)
        .await;

    let err = client.get_site_json("stat/sta").await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired), "got: {err:?}");
}

#[tokio::test]
async fn test_non_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/sta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client.get_site_json("stat/sta").await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>login</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
