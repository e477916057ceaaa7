//! Common test utilities
//!
//! Provides an in-process mock Elasticsearch that understands just enough of
//! the REST API for the benchmark: index create/delete/exists, settings,
//! cluster health, refresh, `_bulk`, `_search` and `_count`.
//!
//! A bulk source containing a `"fail"` field is rejected as an item error.
//! Health waits succeed for existing indices and time out (408) otherwise.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct MockIndex {
    pub docs: HashMap<String, Value>,
    pub settings: Value,
    pub refresh_interval: Option<String>,
    pub refreshes: usize,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub indices: HashMap<String, MockIndex>,
    /// `"METHOD /path"` for every request, in arrival order
    pub requests: Vec<String>,
    pub searches: Vec<Value>,
    /// Query strings of `_cluster/health` requests
    pub health_queries: Vec<String>,
    pub bulk_requests: usize,
    /// Reject every bulk item with a 429
    pub reject_bulk: bool,
    /// Extra bytes appended to every bulk response
    pub bulk_padding: usize,
}

pub type SharedState = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub url: String,
    pub state: SharedState,
}

impl MockServer {
    pub fn doc_count(&self, index: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.indices.get(index).map(|i| i.docs.len()).unwrap_or(0)
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.state.lock().unwrap().indices.contains_key(index)
    }

    pub fn refresh_interval(&self, index: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.indices.get(index).and_then(|i| i.refresh_interval.clone())
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn searches(&self) -> Vec<Value> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn bulk_requests(&self) -> usize {
        self.state.lock().unwrap().bulk_requests
    }

    pub fn health_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().health_queries.clone()
    }

    pub fn reject_bulk(&self) {
        self.state.lock().unwrap().reject_bulk = true;
    }

    pub fn pad_bulk_responses(&self, bytes: usize) {
        self.state.lock().unwrap().bulk_padding = bytes;
    }

    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        let state = self.state.lock().unwrap();
        state.indices.get(index).and_then(|i| i.docs.get(id).cloned())
    }
}

/// Starts a mock server on an ephemeral port in a background thread.
pub fn spawn_mock() -> MockServer {
    let state: SharedState = Arc::new(Mutex::new(MockState::default()));
    let app = router(state.clone());
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind mock server");
            tx.send(listener.local_addr().expect("Failed to read address"))
                .expect("Failed to report address");
            axum::serve(listener, app).await.expect("Mock server failed");
        });
    });

    let addr = rx.recv().expect("Mock server did not start");
    MockServer {
        url: format!("http://{}", addr),
        state,
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/_bulk", post(bulk))
        .route("/_cluster/health/{index}", get(health))
        .route("/{index}", get(exists).put(create).delete(delete))
        .route("/{index}/_settings", put(update_settings))
        .route("/{index}/_refresh", post(refresh))
        .route("/{index}/_search", post(search).get(search))
        .route("/{index}/_count", get(count))
        .with_state(state)
}

fn not_found(index: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "type": "index_not_found_exception",
                "reason": format!("no such index [{}]", index)
            },
            "status": 404
        })),
    )
        .into_response()
}

async fn info(State(state): State<SharedState>) -> Json<Value> {
    state.lock().unwrap().requests.push("GET /".to_string());
    Json(json!({
        "name": "mock-node",
        "cluster_name": "mock-cluster",
        "version": {"number": "8.13.0"},
        "tagline": "You Know, for Search"
    }))
}

async fn exists(
    State(state): State<SharedState>,
    method: Method,
    Path(index): Path<String>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("{} /{}", method, index));
    if state.indices.contains_key(&index) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create(
    State(state): State<SharedState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /{}", index));
    if state.indices.contains_key(&index) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": {"type": "resource_already_exists_exception"},
                "status": 400
            })),
        )
            .into_response();
    }

    let settings: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.indices.insert(
        index.clone(),
        MockIndex {
            settings,
            ..Default::default()
        },
    );
    Json(json!({"acknowledged": true, "shards_acknowledged": true, "index": index}))
        .into_response()
}

async fn delete(State(state): State<SharedState>, Path(index): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /{}", index));
    match state.indices.remove(&index) {
        Some(_) => Json(json!({"acknowledged": true})).into_response(),
        None => not_found(&index),
    }
}

async fn update_settings(
    State(state): State<SharedState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /{}/_settings", index));
    let settings: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    match state.indices.get_mut(&index) {
        Some(idx) => {
            if let Some(interval) = settings["index"]["refresh_interval"].as_str() {
                idx.refresh_interval = Some(interval.to_string());
            }
            Json(json!({"acknowledged": true})).into_response()
        }
        None => not_found(&index),
    }
}

async fn health(
    State(state): State<SharedState>,
    Path(index): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("GET /_cluster/health/{}", index));
    state.health_queries.push(query.unwrap_or_default());
    if state.indices.contains_key(&index) {
        Json(json!({"cluster_name": "mock-cluster", "status": "green", "timed_out": false}))
            .into_response()
    } else {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({"cluster_name": "mock-cluster", "status": "red", "timed_out": true})),
        )
            .into_response()
    }
}

async fn refresh(State(state): State<SharedState>, Path(index): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("POST /{}/_refresh", index));
    match state.indices.get_mut(&index) {
        Some(idx) => {
            idx.refreshes += 1;
            Json(json!({"_shards": {"total": 1, "successful": 1, "failed": 0}})).into_response()
        }
        None => not_found(&index),
    }
}

async fn bulk(State(state): State<SharedState>, body: Bytes) -> Response {
    let text = String::from_utf8_lossy(&body).to_string();
    let mut state = state.lock().unwrap();
    state.requests.push("POST /_bulk".to_string());
    state.bulk_requests += 1;

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let mut items = Vec::new();
    let mut errors = false;

    while let Some(action_line) = lines.next() {
        let action: Value = match serde_json::from_str(action_line) {
            Ok(v) => v,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()})))
                    .into_response()
            }
        };
        let source: Value = lines
            .next()
            .and_then(|line| serde_json::from_str(line).ok())
            .unwrap_or(Value::Null);

        let index = action["index"]["_index"].as_str().unwrap_or_default().to_string();
        let id = action["index"]["_id"].as_str().unwrap_or_default().to_string();

        if state.reject_bulk {
            errors = true;
            items.push(json!({"index": {
                "_index": index, "_id": id, "status": 429,
                "error": {"type": "es_rejected_execution_exception", "reason": "queue full"}
            }}));
            continue;
        }

        if source.get("fail").is_some() {
            errors = true;
            items.push(json!({"index": {
                "_index": index, "_id": id, "status": 400,
                "error": {"type": "mapper_parsing_exception", "reason": "failed to parse"}
            }}));
            continue;
        }

        state
            .indices
            .entry(index.clone())
            .or_default()
            .docs
            .insert(id.clone(), source);
        items.push(json!({"index": {
            "_index": index, "_id": id, "status": 201, "result": "created"
        }}));
    }

    let mut response = json!({"took": 3, "errors": errors, "items": items});
    if state.bulk_padding > 0 {
        response["padding"] = Value::from("x".repeat(state.bulk_padding));
    }
    Json(response).into_response()
}

async fn search(
    State(state): State<SharedState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("POST /{}/_search", index));
    let query: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.searches.push(query);

    match state.indices.get(&index) {
        Some(idx) => Json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {"total": {"value": idx.docs.len(), "relation": "eq"}, "hits": []}
        }))
        .into_response(),
        None => not_found(&index),
    }
}

async fn count(State(state): State<SharedState>, Path(index): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("GET /{}/_count", index));
    match state.indices.get(&index) {
        Some(idx) => Json(json!({"count": idx.docs.len()})).into_response(),
        None => not_found(&index),
    }
}
