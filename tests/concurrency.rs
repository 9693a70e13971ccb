//! Concurrent writers and takers against a live relay.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use signal_relay_sdk::SignalClient;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_puts_yield_one_whole_value() {
    let relay = common::start_relay().await;
    let a = "A".repeat(16 * 1024);
    let b = "B".repeat(16 * 1024);

    let mut tasks = Vec::new();
    for payload in [a.clone(), b.clone()] {
        let client = SignalClient::new(&relay.base_url(), "sig");
        tasks.push(tokio::spawn(async move {
            client.put_answer("shared", &payload).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let client = SignalClient::new(&relay.base_url(), "sig");
    let value = client.take_answer("shared").await.unwrap().unwrap();
    assert!(value == a || value == b, "payload was corrupted");
    assert_eq!(client.take_answer("shared").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_takes_deliver_answer_once() {
    let relay = common::start_relay().await;
    let http = common::client();
    let takers = 16;

    for round in 0..10 {
        let room = format!("room-{round}");
        let expected = format!("answer-{round}");
        http.put(relay.url(&format!("/sig/{room}/answer")))
            .body(expected.clone())
            .send()
            .await
            .unwrap();

        let mut tasks = Vec::new();
        for _ in 0..takers {
            let http = http.clone();
            let url = relay.url(&format!("/sig/{room}/answer"));
            tasks.push(tokio::spawn(async move {
                let res = http.delete(url).send().await.unwrap();
                (res.status(), res.text().await.unwrap())
            }));
        }

        let mut delivered = Vec::new();
        for task in tasks {
            let (status, body) = task.await.unwrap();
            match status {
                StatusCode::OK => delivered.push(body),
                StatusCode::NO_CONTENT => assert!(body.is_empty()),
                other => panic!("unexpected status {other}"),
            }
        }
        assert_eq!(delivered, vec![expected]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_rooms_under_load() {
    let relay = common::start_relay().await;
    let concurrency = 20;
    let rooms_per_task = 25;

    let start = Instant::now();
    let mut tasks = Vec::new();
    for worker in 0..concurrency {
        let client = SignalClient::new(&relay.base_url(), "sig");
        tasks.push(tokio::spawn(async move {
            let mut seen = Vec::new();
            for i in 0..rooms_per_task {
                let room = format!("w{worker}-r{i}");
                let offer = format!("offer for {room}");
                client.put_offer(&room, &offer).await.unwrap();
                let fetched = client.get_offer(&room).await.unwrap();
                assert_eq!(fetched.as_deref(), Some(offer.as_str()));
                seen.push(room);
            }
            seen
        }));
    }

    let mut rooms = HashSet::new();
    for task in tasks {
        rooms.extend(task.await.unwrap());
    }
    let duration = start.elapsed();

    assert_eq!(rooms.len(), concurrency * rooms_per_task);
    assert_eq!(relay.store.len(), concurrency * rooms_per_task);
    assert!(duration < Duration::from_secs(30), "took {duration:?}");
}

#[tokio::test]
async fn test_shutdown_stops_serving() {
    let relay = common::start_relay().await;
    let client = SignalClient::new(&relay.base_url(), "sig");
    assert!(client.health(None).await.is_ok());

    relay.shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(common::client()
        .get(relay.url("/health"))
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .is_err());
}
