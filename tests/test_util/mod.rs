#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskdeck::persistence::file_credential_store::FileCredentialStore;
use taskdeck::remote::HttpConnectivity;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A request as the fake backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct BackendState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<String, VecDeque<(StatusCode, String)>>>,
    delays: Mutex<HashMap<String, Duration>>,
}

/// In-process stand-in for the task API. Every request is recorded and answered with the
/// responses queued for its method and path; the last queued response repeats. Unknown routes
/// get a 404.
pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn start() -> FakeBackend {
        let state = Arc::new(BackendState::default());
        let router = Router::new()
            .fallback(answer_request)
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fake backend should bind");
        let address = listener.local_addr().expect("fake backend has an address");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("fake backend crashed");
        });

        FakeBackend {
            base_url: format!("http://{address}"),
            state,
        }
    }

    /// Queues a response for requests like "GET /tasks/get_all_my_tasks"
    pub fn respond(&self, route: &str, status: StatusCode, body: serde_json::Value) {
        self.respond_raw(route, status, body.to_string());
    }

    pub fn respond_raw(&self, route: &str, status: StatusCode, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .expect("responses mutex poisoned")
            .entry(route.to_owned())
            .or_default()
            .push_back((status, body.into()));
    }

    /// Holds every answer to [route] back for [delay]
    pub fn delay(&self, route: &str, delay: Duration) {
        self.state
            .delays
            .lock()
            .expect("delays mutex poisoned")
            .insert(route.to_owned(), delay);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }

    /// "METHOD path" of every request received so far, in order
    pub fn routes_called(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }
}

async fn answer_request(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let route = format!("{method} {}", uri.path());
    state
        .requests
        .lock()
        .expect("requests mutex poisoned")
        .push(RecordedRequest {
            method,
            path: uri.path().to_owned(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });

    let delay = state
        .delays
        .lock()
        .expect("delays mutex poisoned")
        .get(&route)
        .copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = {
        let mut responses = state.responses.lock().expect("responses mutex poisoned");
        match responses.get_mut(&route) {
            Some(queued) if queued.len() > 1 => queued.pop_front().expect("queue is not empty"),
            Some(queued) if queued.len() == 1 => queued[0].clone(),
            _ => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"detail": "Not Found"}).to_string(),
            ),
        }
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Session context pointed at [base_url] with its credential file in a fresh temp dir. Keep the
/// returned [TempDir] alive for the whole test.
pub fn connectivity(base_url: &str) -> (HttpConnectivity<FileCredentialStore>, TempDir) {
    connectivity_with_timeout(base_url, Duration::from_secs(5))
}

pub fn connectivity_with_timeout(
    base_url: &str,
    request_timeout: Duration,
) -> (HttpConnectivity<FileCredentialStore>, TempDir) {
    let credential_dir = tempfile::tempdir().expect("temp dir should be created");
    let ext_cxn = HttpConnectivity::new(
        base_url,
        request_timeout,
        FileCredentialStore::new(credential_dir.path().join("credentials.json")),
    )
    .expect("connectivity should build");

    (ext_cxn, credential_dir)
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("listener has an address");
    drop(listener);

    format!("http://{address}")
}

pub fn task_json(task_id: i64, status: bool) -> serde_json::Value {
    serde_json::json!({
        "task_id": task_id,
        "task_title": format!("Task {task_id}"),
        "task_description": format!("Something to do for task {task_id}"),
        "status": status,
        "owner_id": 1,
    })
}

pub fn user_json() -> serde_json::Value {
    serde_json::json!({
        "username": "alice",
        "full_name": "Alice Liddell",
        "email": "alice@example.com",
        "role": "user",
    })
}
