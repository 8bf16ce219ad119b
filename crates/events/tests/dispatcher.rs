//! Dispatcher behaviour against an in-memory HTTP client.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;

use artisan_core::EventName;
use artisan_events::{ActivityStatus, WebhookDispatcher};

use common::{test_config, MockClient, Reply};

fn order_data() -> serde_json::Value {
    json!({
        "orderId": "A1",
        "orderNumber": "1001",
        "customerEmail": "a@b.com",
        "customerName": "Jane",
        "items": [],
        "totalAmount": 100,
    })
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_placed_success_returns_parsed_body() {
    let client = Arc::new(MockClient::ok_json(r#"{"received":true}"#));
    let dispatcher = WebhookDispatcher::with_client(test_config(), Arc::clone(&client));

    let result = dispatcher.send(EventName::OrderPlaced, &order_data()).await;

    assert!(result.success);
    assert_eq!(result.data, Some(json!({"received": true})));
    assert!(result.error.is_none());

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let (url, body) = &requests[0];
    assert_eq!(url, "https://hooks.example.com/webhook/order-placed");
    assert_eq!(body["trigger"], "order_placed");
    assert_eq!(body["order"]["orderId"], "A1");
    assert_eq!(body["order"]["customer"]["email"], "a@b.com");
}

#[tokio::test]
async fn every_event_posts_to_its_own_endpoint() {
    let client = Arc::new(MockClient::ok_json("{}"));
    let dispatcher = WebhookDispatcher::with_client(test_config(), Arc::clone(&client));

    for event in EventName::ALL {
        let result = dispatcher.send(event, &json!({})).await;
        assert!(result.success, "{event} should succeed");
    }

    let requests = client.requests();
    assert_eq!(requests.len(), EventName::COUNT);
    for ((url, body), event) in requests.iter().zip(EventName::ALL) {
        assert_eq!(url, dispatcher.config().endpoints.url_for(event));
        assert_eq!(body["trigger"], event.as_str());
        let ts = body["timestamp"].as_str().expect("timestamp is a string");
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "{event}: {ts}");
    }
}

#[tokio::test]
async fn missing_fields_are_sent_without_them() {
    let client = Arc::new(MockClient::ok_json("{}"));
    let dispatcher = WebhookDispatcher::with_client(test_config(), Arc::clone(&client));

    let result = dispatcher
        .send(EventName::PaymentConfirmed, &json!({ "amount": 42.5 }))
        .await;

    assert!(result.success);
    let (_, body) = &client.requests()[0];
    let payment = body["payment"].as_object().unwrap();
    assert_eq!(payment.len(), 1);
    assert_eq!(payment["amount"], 42.5);
}

#[tokio::test]
async fn site_origin_flows_into_links() {
    let client = Arc::new(MockClient::ok_json("{}"));
    let config = test_config().with_site_origin("https://shop.example.com");
    let dispatcher = WebhookDispatcher::with_client(config, Arc::clone(&client));

    dispatcher
        .send(EventName::AbandonedCart, &json!({ "cartId": "c-1" }))
        .await;

    let (_, body) = &client.requests()[0];
    assert_eq!(body["cart"]["cartUrl"], "https://shop.example.com/cart?id=c-1");
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_500_returns_status_text_failure() {
    let dispatcher = WebhookDispatcher::with_client(
        test_config(),
        MockClient::new(Reply::Status(500, "oops")),
    );

    let result = dispatcher.send(EventName::OrderPlaced, &order_data()).await;

    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(result.error.as_deref(), Some("Webhook failed: Internal Server Error"));
}

#[tokio::test]
async fn network_error_returns_failure() {
    let dispatcher =
        WebhookDispatcher::with_client(test_config(), MockClient::new(Reply::NetworkError));

    let result = dispatcher.send(EventName::UserRegistration, &json!({})).await;

    assert!(!result.success);
    let error = result.error.expect("failure carries a message");
    assert!(!error.is_empty());
    assert!(error.starts_with("HTTP request failed"));
}

#[tokio::test]
async fn non_json_success_body_is_a_failure() {
    let dispatcher = WebhookDispatcher::with_client(
        test_config(),
        MockClient::new(Reply::Status(200, "Workflow was started")),
    );

    let result = dispatcher.send(EventName::SocialPost, &json!({})).await;

    assert!(!result.success);
    assert_matches!(result.error.as_deref(), Some(msg) if msg.starts_with("Invalid JSON response"));
}

#[tokio::test]
async fn empty_success_body_is_a_failure() {
    let dispatcher = WebhookDispatcher::with_client(
        test_config(),
        MockClient::new(Reply::Status(204, "")),
    );

    let result = dispatcher.send(EventName::NewReview, &json!({})).await;

    assert!(!result.success);
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn each_dispatch_records_one_activity_entry() {
    let ok = WebhookDispatcher::with_client(test_config(), MockClient::ok_json(r#"{"id":7}"#));
    ok.send(EventName::InventoryUpdate, &json!({})).await;

    let entries = ok.activity().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].trigger, EventName::InventoryUpdate);
    assert_eq!(entries[0].status, ActivityStatus::Success);
    assert_eq!(entries[0].details, json!({"id": 7}));

    let failing = WebhookDispatcher::with_client(
        test_config(),
        MockClient::new(Reply::Status(502, "")),
    );
    failing.send(EventName::InventoryUpdate, &json!({})).await;

    let entries = failing.activity().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, ActivityStatus::Failed);
    assert_eq!(entries[0].details, json!("Webhook failed: Bad Gateway"));
}

#[tokio::test]
async fn concurrent_dispatches_share_the_log() {
    let dispatcher = Arc::new(WebhookDispatcher::with_client(
        test_config(),
        MockClient::ok_json("{}"),
    ));
    let mut rx = dispatcher.activity().subscribe();

    let handles: Vec<_> = [EventName::OrderPlaced, EventName::NewReview, EventName::SocialPost]
        .into_iter()
        .map(|event| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move { dispatcher.send(event, &json!({})).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().success);
    }

    assert_eq!(dispatcher.activity().len(), 3);
    for _ in 0..3 {
        let record = rx.recv().await.expect("subscriber sees every record");
        assert_eq!(record.status, ActivityStatus::Success);
    }
}
