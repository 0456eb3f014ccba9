//! Integration tests for `GraphClient` transport behaviour using wiremock.
//!
//! Covers the cross-cutting concerns every endpoint relies on:
//!
//! - lazy token acquisition against `{authority}/{tenant}/oauth2/v2.0/token`
//! - one-shot refresh and resend after a 401
//! - retry of 429 / 503 with `Retry-After` or backoff
//! - mapping of error statuses to `GraphError`

use std::time::Duration;

use graph_dm::auth::{GRAPH_DEFAULT_SCOPE, TokenProvider};
use graph_dm::client::{ClientOptions, GraphClient, RetryPolicy};
use graph_dm::error::GraphError;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DM_PATH: &str = "/v1.0/deviceManagement";

fn fast_retry(max_retries: u32) -> Option<ClientOptions> {
    Some(ClientOptions {
        retry: RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
        },
        ..ClientOptions::default()
    })
}

fn mock_client(server: &MockServer, options: Option<ClientOptions>) -> GraphClient {
    let tp = TokenProvider::with_token("mock-token").unwrap();
    GraphClient::with_base_url(tp, &format!("{}/v1.0", server.uri()), options).unwrap()
}

/// Client whose provider must fetch tokens from the mock authority.
fn credential_client(server: &MockServer) -> GraphClient {
    let tp = TokenProvider::new("tenant-1", "cid", "s3cret", GRAPH_DEFAULT_SCOPE)
        .unwrap()
        .with_authority(&server.uri());
    GraphClient::with_base_url(tp, &format!("{}/v1.0", server.uri()), fast_retry(0)).unwrap()
}

fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_in": 3599,
        "ext_expires_in": 3599,
        "access_token": token
    })
}

// ── Authentication ─────────────────────────────────────────────────────

#[tokio::test]
async fn first_request_acquires_token_and_sends_bearer() {
    let server = MockServer::start().await;
    let client = credential_client(&server);

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=cid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("fresh-token")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "deviceManagement"
        })))
        .expect(2)
        .mount(&server)
        .await;

    // The second call reuses the cached token (token mock expects 1).
    client.device_management().get(None).await.unwrap();
    let dm = client.device_management().get(None).await.unwrap();
    assert_eq!(dm.id.as_deref(), Some("deviceManagement"));
}

#[tokio::test]
async fn unauthorized_refreshes_token_once_and_resends() {
    let server = MockServer::start().await;
    let client = credential_client(&server);

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("first")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("second")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.device_management().get(None).await.unwrap();
}

#[tokio::test]
async fn second_unauthorized_is_returned_to_caller() {
    let server = MockServer::start().await;
    let client = credential_client(&server);

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("t")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": "InvalidAuthenticationToken", "message": "Access token is empty."}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client.device_management().get(None).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(err.code(), Some("InvalidAuthenticationToken"));
}

#[tokio::test]
async fn token_endpoint_failure_keeps_aadsts_diagnostics() {
    let server = MockServer::start().await;
    let client = credential_client(&server);

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .mount(&server)
        .await;

    let err = client.device_management().get(None).await.unwrap_err();
    let GraphError::Auth { message, .. } = &err else {
        panic!("expected Auth error, got {err:?}");
    };
    assert!(message.contains("AADSTS7000215"), "message was: {message}");
}

// ── Throttling ─────────────────────────────────────────────────────────

#[tokio::test]
async fn throttled_request_is_retried_after_retry_after() {
    let server = MockServer::start().await;
    let client = mock_client(&server, fast_retry(3));

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriptionState": "active"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dm = client.device_management().get(None).await.unwrap();
    assert!(dm.subscription_state.is_some());
}

#[tokio::test]
async fn service_unavailable_is_retried_with_backoff() {
    let server = MockServer::start().await;
    let client = mock_client(&server, fast_retry(3));

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    client.device_management().get(None).await.unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn exhausted_throttling_maps_to_throttled() {
    let server = MockServer::start().await;
    let client = mock_client(&server, fast_retry(2));

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_string("slow down"),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = client.device_management().get(None).await.unwrap_err();
    let GraphError::Throttled { retry_after, body } = &err else {
        panic!("expected Throttled, got {err:?}");
    };
    assert_eq!(*retry_after, Some(Duration::ZERO));
    assert_eq!(body, "slow down");
}

// ── Error mapping ──────────────────────────────────────────────────────

#[tokio::test]
async fn not_found_carries_odata_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server, None);

    Mock::given(method("GET"))
        .and(path("/v1.0/deviceManagement/managedDevices/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {
                "code": "ResourceNotFound",
                "message": "Resource not found",
                "innerError": {
                    "date": "2026-10-01T10:00:00",
                    "request-id": "req-123",
                    "client-request-id": "creq-456"
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .device_management()
        .managed_devices()
        .by_id("missing")
        .get(None)
        .await
        .unwrap_err();

    let GraphError::Api { status, error, .. } = &err else {
        panic!("expected Api error, got {err:?}");
    };
    assert_eq!(status.as_u16(), 404);
    let error = error.as_ref().expect("OData error payload should parse");
    assert_eq!(error.code, "ResourceNotFound");
    assert_eq!(
        error.inner_error.as_ref().and_then(|i| i.request_id.as_deref()),
        Some("req-123")
    );
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;
    let client = mock_client(&server, fast_retry(3));

    Mock::given(method("GET"))
        .and(path(DM_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.device_management().get(None).await.unwrap_err();
    assert!(matches!(err, GraphError::Api { error: None, .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}
