//! Shared utilities for integration tests.

use std::net::SocketAddr;

use signal_relay::{HttpServer, RelayConfig, RoomStore, Shutdown};
use tokio::net::TcpListener;

/// A relay running on an ephemeral local port.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub store: RoomStore,
    pub shutdown: Shutdown,
}

impl TestRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a relay with default settings.
pub async fn start_relay() -> TestRelay {
    start_relay_with(RelayConfig::default()).await
}

/// Start a relay with `config`; the listener address in it is ignored.
pub async fn start_relay_with(config: RelayConfig) -> TestRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let store = RoomStore::new();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store.clone());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestRelay {
        addr,
        store,
        shutdown,
    }
}

/// HTTP client that never pools or proxies, for test stability.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
