//! End-to-end offer/answer exchange over a live listener.

use reqwest::StatusCode;
use signal_relay::store::Resource;
use signal_relay::RelayConfig;
use signal_relay_sdk::{ClientError, SignalClient};

mod common;

const OFFER: &str = "v=0\r\no=- 4611731400430051336 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n";
const ANSWER: &str = "v=0\r\no=- 1 2 IN IP4 127.0.0.1\r\ns=-\r\na=setup:active\r\n";

#[tokio::test]
async fn test_full_handshake() {
    let relay = common::start_relay().await;
    let caller = SignalClient::new(&relay.base_url(), "sig");
    let callee = SignalClient::new(&relay.base_url(), "sig");

    assert_eq!(caller.take_answer("room-1").await.unwrap(), None);

    caller.put_offer("room-1", OFFER).await.unwrap();
    assert_eq!(callee.get_offer("room-1").await.unwrap().as_deref(), Some(OFFER));

    callee.put_answer("room-1", ANSWER).await.unwrap();
    assert_eq!(caller.take_answer("room-1").await.unwrap().as_deref(), Some(ANSWER));
    assert_eq!(caller.take_answer("room-1").await.unwrap(), None);

    // the offer survives the answer being consumed
    assert_eq!(callee.get_offer("room-1").await.unwrap().as_deref(), Some(OFFER));
}

#[tokio::test]
async fn test_offer_absent_until_published() {
    let relay = common::start_relay().await;
    let res = common::client()
        .get(relay.url("/sig/empty-room/offer"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"detail":"Offer not found"}"#);
}

#[tokio::test]
async fn test_answer_last_write_wins() {
    let relay = common::start_relay().await;
    let client = SignalClient::new(&relay.base_url(), "sig");

    client.put_answer("r", "p1").await.unwrap();
    client.put_answer("r", "p2").await.unwrap();
    assert_eq!(client.take_answer("r").await.unwrap().as_deref(), Some("p2"));
    assert_eq!(client.take_answer("r").await.unwrap(), None);
}

#[tokio::test]
async fn test_take_answer_absent_is_empty_204() {
    let relay = common::start_relay().await;
    let res = common::client()
        .delete(relay.url("/sig/nobody/answer"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_offer_keeps_previous() {
    let relay = common::start_relay().await;
    let client = SignalClient::new(&relay.base_url(), "sig");
    client.put_offer("r", OFFER).await.unwrap();

    match client.put_offer("r", "").await {
        Err(ClientError::Status { status, detail }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(detail, "Offer body is empty");
        }
        other => panic!("expected 400, got {other:?}"),
    }
    assert_eq!(client.get_offer("r").await.unwrap().as_deref(), Some(OFFER));
}

#[tokio::test]
async fn test_health_checks() {
    let relay = common::start_relay().await;
    let client = SignalClient::new(&relay.base_url(), "sig");

    let plain = client.health(None).await.unwrap();
    assert_eq!(plain.status, "ok");
    assert_eq!(plain.room, None);

    let scoped = client.health(Some("r42")).await.unwrap();
    assert_eq!(scoped.status, "ok");
    assert_eq!(scoped.room.as_deref(), Some("r42"));

    let res = common::client().get(relay.url("/sig/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"ok"}"#);

    // health checks never create store entries
    assert!(relay.store.is_empty());
}

#[tokio::test]
async fn test_preflight_then_exchange() {
    let relay = common::start_relay().await;
    let http = common::client();

    let res = http
        .request(reqwest::Method::OPTIONS, relay.url("/sig/r/offer"))
        .header("origin", "https://peer-a.example")
        .header("access-control-request-method", "PUT")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");
    assert_eq!(
        res.headers()["access-control-allow-methods"],
        "GET, PUT, DELETE, OPTIONS"
    );
    assert!(relay.store.is_empty());

    let client = SignalClient::new(&relay.base_url(), "sig");
    assert_eq!(client.get_offer("r").await.unwrap(), None);
    client.put_offer("r", OFFER).await.unwrap();
    assert_eq!(client.get_offer("r").await.unwrap().as_deref(), Some(OFFER));
}

#[tokio::test]
async fn test_offer_delete_when_enabled() {
    let mut config = RelayConfig::default();
    config.signalling.allow_offer_delete = true;
    let relay = common::start_relay_with(config).await;
    let http = common::client();

    let client = SignalClient::new(&relay.base_url(), "sig");
    client.put_offer("r", OFFER).await.unwrap();

    let res = http.delete(relay.url("/sig/r/offer")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), OFFER);

    let res = http.delete(relay.url("/sig/r/offer")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(client.get_offer("r").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_offer_under_wrong_prefix_is_an_error() {
    let relay = common::start_relay().await;
    let right = SignalClient::new(&relay.base_url(), "sig");
    let wrong = SignalClient::new(&relay.base_url(), "wrong");

    assert_eq!(right.get_offer("r").await.unwrap(), None);
    right.put_offer("r", OFFER).await.unwrap();

    match wrong.get_offer("r").await {
        Err(ClientError::Status { status, detail }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(detail, "Unknown prefix");
        }
        other => panic!("expected unknown prefix, got {other:?}"),
    }
}

#[tokio::test]
async fn test_room_ids_with_reserved_characters() {
    let relay = common::start_relay().await;
    let client = SignalClient::new(&relay.base_url(), "sig");

    let scoped = client.health(Some("a b")).await.unwrap();
    assert_eq!(scoped.room.as_deref(), Some("a b"));

    client.put_offer("a b/c", OFFER).await.unwrap();
    assert_eq!(client.get_offer("a b/c").await.unwrap().as_deref(), Some(OFFER));
    assert_eq!(relay.store.get(Resource::Offer, "a b/c").as_deref(), Some(OFFER));
    assert_eq!(relay.store.len(), 1);

    // raw percent-encoded path reaches the same room
    let res = common::client()
        .get(relay.url("/sig/a%20b%2Fc/offer"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), OFFER);
}
