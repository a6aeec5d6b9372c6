//! BDD test world for the timelapse dashboard

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cucumber::World;
use timelapse_dashboard::identity::TokenIdentityProvider;
use timelapse_dashboard::view::DashboardView;
use timelapse_dashboard::{build_controller, Config, Controller};

#[path = "mock_backend.rs"]
pub mod mock_backend;

use mock_backend::{BackendState, MockBackend};

/// An address nothing listens on
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:1";

#[derive(Debug, Default, World)]
pub struct DashboardWorld {
    pub backend_state: Option<BackendState>,
    pub backend: Option<MockBackend>,
    pub backend_unreachable: bool,
    pub sequential_requests: bool,
    pub provider_token: Option<String>,
    pub controller: Option<Controller>,
    pub view_before: Option<DashboardView>,
    pub last_error: Option<String>,
}

/// Unsigned ID token for a user with the given display name
pub fn token_for(name: &str) -> String {
    let claims = serde_json::json!({
        "iss": "https://accounts.google.com",
        "sub": format!("sub-{}", name.to_lowercase().replace(' ', "-")),
        "name": name,
        "email": format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.", header, payload)
}

impl DashboardWorld {
    pub fn backend_state_mut(&mut self) -> &mut BackendState {
        self.backend_state.get_or_insert_with(BackendState::default)
    }

    /// Start the backend (unless unreachable) and build the controller once
    pub async fn controller(&mut self) -> &mut Controller {
        if self.controller.is_none() {
            let mut config = Config::default();
            config.backend.sequential_requests = self.sequential_requests;
            config.backend.base_url = if self.backend_unreachable {
                UNREACHABLE_BACKEND.to_string()
            } else {
                let state = self.backend_state.take().unwrap_or_default();
                let backend = MockBackend::start(state).await;
                let url = backend.base_url.clone();
                self.backend = Some(backend);
                url
            };

            let provider = Arc::new(TokenIdentityProvider::new(
                config.identity.client_id.clone(),
                self.provider_token.clone(),
            ));
            let controller =
                build_controller(&config, provider).expect("failed to build controller");
            self.controller = Some(controller);
        }
        self.controller.as_mut().expect("controller just built")
    }

    pub async fn view(&mut self) -> DashboardView {
        let handle = self.controller().await.view();
        let view = handle.read().await;
        view.clone()
    }
}
