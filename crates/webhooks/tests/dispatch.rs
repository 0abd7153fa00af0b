//! Integration tests for concurrent webhook dispatch.
//!
//! Tests verify destination filtering, signature headers, per-destination
//! isolation, and fail-open behavior against live mock endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadgate_webhooks::{
    Destination, DestinationRegistry, DispatcherConfig, WebhookDispatcher, WebhookError,
    WebhookResult, WebhookSigner,
};

const SECRET: &str = "whsec_test_secret_key_12345";

/// Registry serving a fixed destination list.
struct FixedRegistry {
    destinations: Vec<Destination>,
}

#[async_trait]
impl DestinationRegistry for FixedRegistry {
    async fn list_active_destinations(&self, account_id: &str) -> WebhookResult<Vec<Destination>> {
        Ok(self
            .destinations
            .iter()
            .filter(|d| d.account_id == account_id)
            .cloned()
            .collect())
    }
}

/// Registry whose backing store is unavailable.
struct FailingRegistry;

#[async_trait]
impl DestinationRegistry for FailingRegistry {
    async fn list_active_destinations(&self, _account_id: &str) -> WebhookResult<Vec<Destination>> {
        Err(WebhookError::RegistryError("store offline".into()))
    }
}

fn dispatcher(destinations: Vec<Destination>) -> WebhookDispatcher {
    WebhookDispatcher::new(Arc::new(FixedRegistry { destinations }))
}

async fn mount_ok(server: &MockServer, at: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_delivers_only_to_subscribed_active_destinations() {
    let server = MockServer::start().await;
    mount_ok(&server, "/subscribed", 1).await;
    mount_ok(&server, "/inactive", 0).await;
    mount_ok(&server, "/other-event", 0).await;

    let subscribed = Destination::new("acct_1", format!("{}/subscribed", server.uri()));
    let subscribed_id = subscribed.id.clone();
    let destinations = vec![
        subscribed,
        Destination::new("acct_1", format!("{}/inactive", server.uri())).disabled(),
        Destination::new("acct_1", format!("{}/other-event", server.uri()))
            .events(["form.created"]),
    ];

    let outcomes = dispatcher(destinations)
        .dispatch("acct_1", "lead.created", json!({"id": "lead_1"}))
        .await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].destination_id, subscribed_id);
    assert!(outcomes[0].is_success());
}

#[tokio::test]
async fn test_other_accounts_destinations_are_not_contacted() {
    let server = MockServer::start().await;
    mount_ok(&server, "/hook", 0).await;

    let destinations = vec![Destination::new(
        "acct_other",
        format!("{}/hook", server.uri()),
    )];

    let outcomes = dispatcher(destinations)
        .dispatch("acct_1", "lead.created", json!({}))
        .await;

    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_signed_delivery_carries_verifiable_signature() {
    let server = MockServer::start().await;
    mount_ok(&server, "/hook", 1).await;

    let destination = Destination::new("acct_1", format!("{}/hook", server.uri())).secret(SECRET);

    let outcomes = dispatcher(vec![destination])
        .dispatch("acct_1", "lead.created", json!({"id": "lead_1"}))
        .await;
    assert!(outcomes[0].is_success());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(
        request.headers.get("content-type").unwrap(),
        "application/json"
    );

    // The signature must verify against exactly the bytes that arrived.
    let signature = request
        .headers
        .get("x-signature")
        .expect("signed destination should receive X-Signature")
        .to_str()
        .unwrap();
    assert!(WebhookSigner::new(SECRET).verify(signature, &request.body));

    // The body is the canonical three-key envelope.
    let envelope: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(envelope["event"], "lead.created");
    assert_eq!(envelope["data"]["id"], "lead_1");
    assert_eq!(envelope.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unsigned_delivery_has_no_signature_header() {
    let server = MockServer::start().await;
    mount_ok(&server, "/hook", 1).await;

    let destination = Destination::new("acct_1", format!("{}/hook", server.uri()));
    assert!(destination.secret.is_none());

    let outcomes = dispatcher(vec![destination])
        .dispatch("acct_1", "lead.created", json!({}))
        .await;
    assert!(outcomes[0].is_success());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-signature").is_none());
}

#[tokio::test]
async fn test_identical_bytes_to_every_destination() {
    let server = MockServer::start().await;
    mount_ok(&server, "/first", 1).await;
    mount_ok(&server, "/second", 1).await;

    let destinations = vec![
        Destination::new("acct_1", format!("{}/first", server.uri())).secret(SECRET),
        Destination::new("acct_1", format!("{}/second", server.uri())),
    ];

    dispatcher(destinations)
        .dispatch("acct_1", "lead.created", json!({"id": "lead_1"}))
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_failing_destination_does_not_affect_others() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_ok(&server, "/good", 1).await;

    let bad = Destination::new("acct_1", format!("{}/bad", server.uri()));
    let good = Destination::new("acct_1", format!("{}/good", server.uri()));
    let (bad_id, good_id) = (bad.id.clone(), good.id.clone());

    let outcomes = dispatcher(vec![bad, good])
        .dispatch("acct_1", "lead.created", json!({}))
        .await;

    assert_eq!(outcomes.len(), 2);
    let bad_outcome = outcomes.iter().find(|o| o.destination_id == bad_id).unwrap();
    let good_outcome = outcomes
        .iter()
        .find(|o| o.destination_id == good_id)
        .unwrap();
    assert!(!bad_outcome.is_success());
    assert!(good_outcome.is_success());
}

#[tokio::test]
async fn test_connection_error_is_isolated() {
    let server = MockServer::start().await;
    mount_ok(&server, "/good", 1).await;

    // Nothing listens on the discard port; the attempt fails at connect time.
    let unreachable = Destination::new("acct_1", "http://127.0.0.1:9/hook");
    let good = Destination::new("acct_1", format!("{}/good", server.uri()));
    let good_id = good.id.clone();

    let outcomes = dispatcher(vec![unreachable, good])
        .dispatch("acct_1", "lead.created", json!({}))
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(
        outcomes
            .iter()
            .find(|o| o.destination_id == good_id)
            .unwrap()
            .is_success()
    );
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);
}

#[tokio::test]
async fn test_stalled_endpoint_is_timed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let destination = Destination::new("acct_1", format!("{}/slow", server.uri()));
    let dispatcher = WebhookDispatcher::with_config(
        Arc::new(FixedRegistry {
            destinations: vec![destination],
        }),
        DispatcherConfig::new().timeout(Duration::from_millis(200)),
    );

    let outcomes = dispatcher.dispatch("acct_1", "lead.created", json!({})).await;
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].is_success());
}

#[tokio::test]
async fn test_registry_failure_yields_no_outcomes() {
    let dispatcher = WebhookDispatcher::new(Arc::new(FailingRegistry));
    let outcomes = dispatcher.dispatch("acct_1", "lead.created", json!({})).await;
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_detached_dispatch_delivers_in_background() {
    let server = MockServer::start().await;
    mount_ok(&server, "/hook", 1).await;

    let destination = Destination::new("acct_1", format!("{}/hook", server.uri()));
    dispatcher(vec![destination]).dispatch_detached("acct_1", "lead.created", json!({}));

    // The caller did not await delivery; poll until the background task lands.
    for _ in 0..50 {
        if !server.received_requests().await.unwrap().is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("detached dispatch never reached the destination");
}
