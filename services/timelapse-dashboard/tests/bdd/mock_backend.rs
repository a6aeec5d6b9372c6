//! In-process Timelapse backend for BDD tests

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::task::JoinHandle;

/// Canned answer for one endpoint
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_string(),
            body: "[]".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub projects: Reply,
    pub entries: Reply,
    pub authorizations: Vec<String>,
}

type SharedBackend = Arc<Mutex<BackendState>>;

/// Backend serving `/projects` and `/entries` on an ephemeral port
#[derive(Debug)]
pub struct MockBackend {
    pub base_url: String,
    pub state: SharedBackend,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let router = Router::new()
            .route("/projects", get(projects_handler))
            .route("/entries", get(entries_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("mock backend state poisoned")
            .authorizations
            .clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn projects_handler(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    reply(&state, &headers, |s| s.projects.clone())
}

async fn entries_handler(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    reply(&state, &headers, |s| s.entries.clone())
}

fn reply(
    state: &SharedBackend,
    headers: &HeaderMap,
    pick: impl Fn(&BackendState) -> Reply,
) -> Response {
    let mut state = state.lock().expect("mock backend state poisoned");
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        state.authorizations.push(auth.to_string());
    }
    let reply = pick(&state);
    let status = StatusCode::from_u16(reply.status).expect("invalid status in reply");
    (
        status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}
