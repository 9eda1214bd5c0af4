//! Helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use mock_fetch::{Request, Response, Result, Transport};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const API_URL: &str = "https://mock-fetch.test/api/v1";

/// Stands in for the real network: records requests, answers `202 real`.
#[derive(Default)]
pub struct StubTransport {
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, request: Request) -> Result<Response> {
        let url = request.url().to_string();
        self.requests.lock().push(request);
        Ok(Response::new(
            StatusCode::ACCEPTED,
            url,
            HeaderMap::new(),
            Bytes::from_static(b"real"),
        ))
    }
}

/// Data-pointer equality for transports.
pub fn same_transport(a: &Arc<dyn Transport>, b: &Arc<dyn Transport>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Start a local HTTP server to act as the real network.
pub async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route("/real", get(|| async { "from the network" }))
        .route("/echo", post(|body: String| async move { body }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Collects formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Capture this crate's debug logs on the current thread.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("mock_fetch=debug"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
