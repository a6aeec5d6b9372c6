//! Timelapse Dashboard - session and dashboard controller
//!
//! Signs a user in through an identity provider, loads their projects and
//! entries from the Timelapse backend and keeps a view model of the page in
//! step with the session.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod identity;
pub mod io;
pub mod model;
pub mod render;
pub mod server;
pub mod session;
pub mod view;

pub use config::{load_config, Config};
pub use controller::Controller;
pub use error::{DashboardError, Result};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::identity::IdentityProvider;
use crate::io::ReqwestHttpClient;

/// How the controller enters its first state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Use the provider's current sign-in status
    Initialize,
    /// Ask the provider for an account first
    ChooseAccount,
}

/// Build a controller wired to the reqwest transport
pub fn build_controller(
    config: &Config,
    provider: Arc<dyn IdentityProvider>,
) -> Result<Controller> {
    let timeout = config.backend.timeout_seconds.map(Duration::from_secs);
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(timeout)?);
    Ok(Controller::from_config(config, provider, http))
}

/// Bring the controller into its first state
pub async fn start(controller: &mut Controller, mode: StartMode) -> Result<()> {
    match mode {
        StartMode::Initialize => controller.initialize().await,
        StartMode::ChooseAccount => controller.choose_account().await,
    }
}

/// Serve the dashboard until Ctrl-C
pub async fn serve(controller: Controller, port: u16) -> Result<()> {
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let router = server::build_router(controller);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        DashboardError::Server(format!("Failed to bind dashboard to port {}: {}", port, e))
    })?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::debug!("Dashboard stopped");
    Ok(())
}
