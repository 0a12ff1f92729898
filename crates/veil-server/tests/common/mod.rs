//! Common test utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use veil_server::{Server, ServerConfig};
use veil_session::{InMemoryStore, StoreConfig};

/// A test server that runs in the background.
pub struct TestServer {
    /// The server's address.
    pub addr: SocketAddr,
    /// HTTP client for this server.
    pub client: Client,
    /// The store behind the server, for closing it mid-test.
    pub store: Arc<InMemoryStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with ten-minute sessions and no background sweeping.
    pub async fn start() -> Result<Self> {
        Self::start_with(
            StoreConfig::new()
                .with_max_session_age(Duration::from_secs(600))
                .with_cleanup_task(false),
        )
        .await
    }

    /// Start a server over a store built from `store_config`.
    pub async fn start_with(store_config: StoreConfig) -> Result<Self> {
        let addr = find_available_port().await?;

        let store = Arc::new(InMemoryStore::new(store_config));

        let config = ServerConfig::new()
            .with_bind_address(addr)
            .with_request_logging(false);

        let server = Server::new(store.clone(), config);
        let handle = tokio::spawn(async move {
            let _ = server.run_on(addr).await;
        });

        let client = Client::new();
        wait_for_server(&client, addr).await?;

        Ok(Self {
            addr,
            client,
            store,
            _handle: handle,
        })
    }

    /// Get the base URL for the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// GET a path.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url(), path))
    }

    /// POST a path.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url(), path))
    }

    /// Open a session and return its id.
    pub async fn create_session(&self, algorithm: &str, key: &str) -> Result<String> {
        let resp = self
            .post("/api/v1/session")
            .json(&serde_json::json!({ "algorithm": algorithm, "key": key }))
            .send()
            .await?;
        anyhow::ensure!(resp.status().as_u16() == 201, "create returned {}", resp.status());

        let body: Value = resp.json().await?;
        body["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("response has no id: {}", body))
    }

    /// Check if server is healthy.
    pub async fn health(&self) -> Result<bool> {
        let resp = self.get("/health").send().await?;
        Ok(resp.status().is_success())
    }
}

/// Find an available port for the test server.
async fn find_available_port() -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

/// Wait for the server to become ready.
async fn wait_for_server(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{}/health", addr);

    let result = timeout(Duration::from_secs(5), async {
        loop {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    })
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!("Timeout waiting for server to start"),
    }
}
