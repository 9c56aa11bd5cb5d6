//! Shared helpers: spawn a server over a fresh temp store and shut it down on drop.

use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use nebula::{FsProjectStore, ProjectStore};

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<FsProjectStore>,
    base: tempfile::TempDir,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Store folder (`<base>/Nebula-Image-Manager`).
    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn base(&self) -> &Path {
        self.base.path()
    }

    /// Stops the server and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(std::time::Duration::from_secs(5), handle).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Binds a random port and spawns the server with graceful shutdown.
pub async fn spawn_server() -> TestServer {
    let base = tempfile::tempdir().unwrap();
    let store = Arc::new(FsProjectStore::new(base.path()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(serve::run_serve_on_listener(
        listener,
        store.clone() as Arc<dyn ProjectStore>,
        Some(rx),
    ));
    TestServer {
        base_url: format!("http://{}{}", addr, serve::ROUTE_PREFIX),
        store,
        base,
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

/// Returns status and JSON body; logs the body with `[e2e] received: ...` (see `--nocapture`).
pub async fn json_of(resp: reqwest::Response) -> (u16, serde_json::Value) {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap();
    eprintln!("[e2e] received: {}", text);
    let value = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    (status, value)
}

/// Returns status and the body decoded as one of the wire types.
pub async fn typed_of<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> (u16, T) {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap();
    eprintln!("[e2e] received: {}", text);
    (status, serde_json::from_str(&text).unwrap())
}

/// File names in the store folder that are not project files.
pub fn stray_files(root: &Path) -> Vec<String> {
    std::fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| !n.ends_with(".json"))
        .collect()
}
