//! Dashboard web server: the rendered page plus a JSON view of its state

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::controller::Controller;
use crate::render::render_html;
use crate::view::ViewHandle;

/// Server application state
#[derive(Clone)]
pub struct ServerState {
    pub controller: Arc<Mutex<Controller>>,
    pub view: ViewHandle,
}

/// Build the dashboard axum router
pub fn build_router(controller: Controller) -> Router {
    let view = controller.view();
    let state = ServerState {
        controller: Arc::new(Mutex::new(controller)),
        view,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/view", get(view_handler))
        .route("/api/sign-in", post(sign_in_handler))
        .route("/api/sign-out", post(sign_out_handler))
        .route("/api/choose-account", post(choose_account_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<ServerState>) -> Response {
    let view = state.view.read().await;
    match render_html(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render dashboard: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn view_handler(State(state): State<ServerState>) -> impl IntoResponse {
    let view = state.view.read().await;
    Json(view.clone())
}

/// Credential posted by the welcome panel's sign-in form
#[derive(Deserialize)]
struct SignInForm {
    token: String,
}

async fn sign_in_handler(
    State(state): State<ServerState>,
    Form(form): Form<SignInForm>,
) -> Response {
    let result = state.controller.lock().await.sign_in(&form.token).await;
    completed(result)
}

async fn sign_out_handler(State(state): State<ServerState>) -> Response {
    let result = state.controller.lock().await.sign_out().await;
    completed(result)
}

async fn choose_account_handler(State(state): State<ServerState>) -> Response {
    let result = state.controller.lock().await.choose_account().await;
    completed(result)
}

fn completed(result: crate::Result<()>) -> Response {
    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::warn!("Dashboard action failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "message": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
