//! An in-process stand-in for the relay and trace service.
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use blxr_constants::RelayNetwork;
use blxr_relay::{RelayClient, RelayConfig};
use serde_json::Value;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// API key the mock client sends.
pub const TEST_AUTH: &str = "test-auth-key";

/// A request received by the [`MockRelay`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query.
    pub path: String,
    /// The `Authorization` header, if any.
    pub auth: Option<String>,
    /// The JSON body, or `Null` when the body was empty or not JSON.
    pub body: Value,
}

/// A queued reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A JSON body with a status.
    Json(StatusCode, Value),
    /// An empty body with a status.
    Empty(StatusCode),
}

impl MockReply {
    /// A successful JSON-RPC reply carrying `result`.
    pub fn result(id: u64, result: Value) -> Self {
        Self::Json(
            StatusCode::OK,
            serde_json::json!({"jsonrpc": "2.0", "id": id, "result": result}),
        )
    }

    /// A JSON-RPC error reply.
    pub fn error(status: StatusCode, id: u64, code: i64, message: &str) -> Self {
        Self::Json(
            status,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": code, "message": message},
            }),
        )
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self {
            Self::Json(status, body) => (status, Json(body)).into_response(),
            Self::Empty(status) => status.into_response(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
}

/// A local HTTP server that records every request and answers with queued
/// replies, in order. With nothing queued it answers `500` with an empty
/// body.
///
/// The server task is aborted on drop.
#[derive(Debug)]
pub struct MockRelay {
    addr: SocketAddr,
    shared: Shared,
    handle: JoinHandle<()>,
}

impl MockRelay {
    /// Bind to an ephemeral local port and start serving.
    pub async fn spawn() -> Self {
        let shared = Shared::default();
        let router = Router::new().fallback(record_and_reply).with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, shared, handle }
    }

    /// Base URL of the server.
    pub fn url(&self) -> reqwest::Url {
        reqwest::Url::parse(&format!("http://{}/", self.addr)).unwrap()
    }

    /// A client config pointing both the relay and the trace service at this
    /// server.
    pub fn config(&self, network: RelayNetwork) -> RelayConfig {
        RelayConfig::new(TEST_AUTH, network).with_relay_url(self.url()).with_trace_url(self.url())
    }

    /// A client talking to this server.
    pub fn client(&self, network: RelayNetwork) -> RelayClient {
        RelayClient::new(self.config(network)).unwrap()
    }

    /// Queue a reply.
    pub fn push(&self, reply: MockReply) {
        self.shared.replies.lock().unwrap().push_back(reply);
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// The most recent request. Panics if there is none.
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no requests received")
    }
}

impl Drop for MockRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_reply(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> MockReply {
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).map(ToOwned::to_owned);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    shared.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_owned(),
        auth,
        body,
    });

    shared
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(MockReply::Empty(StatusCode::INTERNAL_SERVER_ERROR))
}
