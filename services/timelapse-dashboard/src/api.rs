//! Backend API client: bearer-authenticated GETs and response classification

use std::sync::Arc;

use serde_json::{json, Value};

use crate::identity::IdToken;
use crate::io::HttpClient;

pub const PROJECTS_PATH: &str = "/projects";
pub const ENTRIES_PATH: &str = "/entries";

/// Client for the Timelapse backend
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created BackendClient for {}", base_url);
        Self { base_url, http }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` with the token as bearer credential.
    ///
    /// Non-2xx statuses come back as [`crate::DashboardError::Api`] carrying the
    /// classified body and the message to display.
    pub async fn get(&self, path: &str, token: &IdToken) -> crate::Result<Value> {
        let url = self.url(path);
        let response = self.http.get_bearer(&url, token.as_str()).await?;
        let body = classify_body(response.content_type.as_deref(), &response.body);

        if !(200..300).contains(&response.status) {
            let message = error_message(&body);
            tracing::debug!(
                "GET {} returned status {}: {}",
                path,
                response.status,
                message
            );
            return Err(crate::DashboardError::Api {
                status: response.status,
                message,
                body,
            });
        }

        Ok(body)
    }
}

/// Whether a `Content-Type` header value denotes JSON
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Parse JSON-typed bodies; wrap everything else as `{"message": <raw text>}`
pub fn classify_body(content_type: Option<&str>, body: &str) -> Value {
    if content_type.is_some_and(is_json_content_type) {
        match serde_json::from_str(body) {
            Ok(value) => return value,
            Err(e) => tracing::debug!("Body declared as JSON failed to parse: {}", e),
        }
    }
    json!({ "message": body })
}

/// Text for the error banner: the `message` field when present, else the whole body
pub fn error_message(body: &Value) -> String {
    match body.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => body.to_string(),
        Some(other) => other.to_string(),
    }
}
