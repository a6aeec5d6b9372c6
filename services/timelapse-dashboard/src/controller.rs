//! Session and dashboard controller
//!
//! Drives the sign-in flow against an [`IdentityProvider`], fetches projects
//! and entries from the backend with the session token and keeps the
//! [`DashboardView`](crate::view::DashboardView) in step with the session.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::{BackendClient, ENTRIES_PATH, PROJECTS_PATH};
use crate::config::Config;
use crate::identity::{Identity, IdentityProvider};
use crate::io::HttpClient;
use crate::model::parse_projects;
use crate::session::Session;
use crate::view::{new_view_handle, ViewHandle};
use crate::DashboardError;

/// Owns the session and updates the shared view model
pub struct Controller {
    provider: Arc<dyn IdentityProvider>,
    backend: BackendClient,
    session: Session,
    view: ViewHandle,
    sequential_requests: bool,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("backend", &self.backend)
            .field("session", &self.session)
            .field("sequential_requests", &self.sequential_requests)
            .finish()
    }
}

impl Controller {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        backend: BackendClient,
        view: ViewHandle,
        sequential_requests: bool,
    ) -> Self {
        Self {
            provider,
            backend,
            session: Session::new(),
            view,
            sequential_requests,
        }
    }

    pub fn from_config(
        config: &Config,
        provider: Arc<dyn IdentityProvider>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let backend = BackendClient::new(&config.backend.base_url, http);
        Self::new(
            provider,
            backend,
            new_view_handle(),
            config.backend.sequential_requests,
        )
    }

    pub fn view(&self) -> ViewHandle {
        Arc::clone(&self.view)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Enter the signed-in flow if the provider already has a user,
    /// otherwise show the welcome panel with the sign-in affordance
    pub async fn initialize(&mut self) -> crate::Result<()> {
        if !self.provider.is_available() {
            tracing::warn!("Identity provider unavailable; staying signed out");
            return Ok(());
        }

        match self.provider.current_identity().await? {
            Some(identity) => {
                tracing::debug!("Identity provider reports an active sign-in");
                self.handle_sign_in(identity).await
            }
            None => {
                tracing::debug!("No active sign-in; showing welcome panel");
                let mut view = self.view.write().await;
                view.show_signed_out();
                view.attach_sign_in();
                Ok(())
            }
        }
    }

    /// Switch to the signed-in view and load projects and entries.
    ///
    /// An identity without a profile is ignored.
    pub async fn handle_sign_in(&mut self, identity: Identity) -> crate::Result<()> {
        let Identity { token, profile } = identity;
        let Some(profile) = profile else {
            tracing::debug!("Ignoring sign-in without a profile");
            return Ok(());
        };

        tracing::info!("Signed in as '{}'", profile.name);
        self.view.write().await.show_signed_in(&profile);
        self.session.sign_in(token, profile);

        self.load_dashboard().await;
        Ok(())
    }

    /// Sign out of the provider, then reset to the welcome panel.
    ///
    /// The reset happens even if the provider fails; its error is returned afterwards.
    pub async fn sign_out(&mut self) -> crate::Result<()> {
        let result = self.provider.sign_out().await;
        if let Err(e) = &result {
            tracing::warn!("Identity provider sign-out failed: {}", e);
        }

        self.session.sign_out();
        {
            let mut view = self.view.write().await;
            view.show_signed_out();
            view.attach_sign_in();
        }
        tracing::info!("Signed out");
        result
    }

    /// Hand a credential to the provider and continue as a regular sign-in
    pub async fn sign_in(&mut self, credential: &str) -> crate::Result<()> {
        let identity = self.provider.sign_in(credential).await?;
        self.handle_sign_in(identity).await
    }

    /// Prompt for an account and continue as a regular sign-in
    pub async fn choose_account(&mut self) -> crate::Result<()> {
        let identity = self.provider.select_account().await?;
        self.handle_sign_in(identity).await
    }

    /// GET `path` with the session token while the loading indicator is shown.
    ///
    /// Failures are reported on the error banner and returned.
    pub async fn authenticated_request(&self, path: &str) -> crate::Result<Value> {
        let Some(token) = self.session.token() else {
            return Err(DashboardError::Identity(format!(
                "cannot request {} while signed out",
                path
            )));
        };

        self.view.write().await.begin_request();
        let result = self.backend.get(path, token).await;

        let mut view = self.view.write().await;
        view.end_request();
        if let Err(e) = &result {
            tracing::warn!("Request for {} failed: {}", path, e);
            match e {
                DashboardError::Api { message, .. } => view.show_error(message.clone()),
                other => view.show_error(other.to_string()),
            }
        }
        result
    }

    async fn load_dashboard(&self) {
        let (projects, entries) = if self.sequential_requests {
            let projects = self.authenticated_request(PROJECTS_PATH).await;
            let entries = self.authenticated_request(ENTRIES_PATH).await;
            (projects, entries)
        } else {
            tokio::join!(
                self.authenticated_request(PROJECTS_PATH),
                self.authenticated_request(ENTRIES_PATH)
            )
        };

        let mut view = self.view.write().await;

        match projects.and_then(|body| parse_projects(&body)) {
            Ok(projects) => {
                tracing::debug!("Rendering {} projects", projects.len());
                view.render_projects(&projects);
            }
            Err(DashboardError::Json(e)) => {
                tracing::warn!("Projects response is not a list of projects: {}", e);
                view.render_projects(&[]);
            }
            Err(_) => {}
        }

        match entries {
            Ok(body) => view.render_entries(&body),
            Err(DashboardError::Api { body, .. }) => {
                view.render_entries(&json!({ "error": body }))
            }
            Err(_) => {}
        }
    }
}
