//! Shared helpers for e2e tests. Received bodies are logged with `[e2e] received: ...`.
//! Run tests with `--nocapture` to see them.

use std::sync::Arc;

use advisor::AnalysisService;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; dropping `shutdown_tx` (or sending on it) stops it.
pub struct TestServer {
    pub base_url: String,
    pub shutdown_tx: Option<oneshot::Sender<()>>,
    pub handle: tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), self.handle).await;
    }
}

/// Binds to a random port and spawns the server with the given service.
pub async fn spawn_server(service: AnalysisService) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve::run_serve_on_listener(
        listener,
        Arc::new(service),
        async move {
            let _ = shutdown_rx.await;
        },
    ));
    TestServer {
        base_url: format!("http://{}", addr),
        shutdown_tx: Some(shutdown_tx),
        handle,
    }
}

/// POSTs `body` as JSON to `/api/analyze`; returns status and parsed body.
pub async fn post_analyze(
    server: &TestServer,
    body: serde_json::Value,
) -> (reqwest::StatusCode, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(server.url("/api/analyze"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    let text = resp.text().await.unwrap();
    eprintln!("[e2e] received: {} {}", status, text);
    let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    (status, json)
}
