//! Timelapse Dashboard CLI
//!
//! Signs in with an ID token, loads projects and entries from the backend and
//! either prints the dashboard once or serves it over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use timelapse_dashboard::identity::TokenIdentityProvider;
use timelapse_dashboard::render::render_text;
use timelapse_dashboard::{build_controller, load_config, serve, start, Config, StartMode};
use tracing::Level;

const TOKEN_ENV_VAR: &str = "TIMELAPSE_ID_TOKEN";

#[derive(Parser)]
#[command(name = "timelapse-dashboard")]
#[command(about = "Session and dashboard controller for the Timelapse backend")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ID token issued by the identity provider (defaults to $TIMELAPSE_ID_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Dashboard port (overrides config file)
    #[arg(long)]
    port: Option<u16>,

    /// Print the dashboard once and exit
    #[arg(long)]
    once: bool,

    /// Start with account selection instead of the current sign-in
    #[arg(long)]
    choose_account: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, backend_url={:?}, port={:?}, once={}, log_level={:?}",
        args.config,
        args.backend_url,
        args.port,
        args.once,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(backend_url) = args.backend_url {
        config.backend.base_url = backend_url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let token = args
        .token
        .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
        .filter(|t| !t.is_empty());
    let provider = Arc::new(TokenIdentityProvider::new(
        config.identity.client_id.clone(),
        token,
    ));
    tracing::debug!("Identity client '{}'", provider.client_id());

    let mode = if args.choose_account {
        StartMode::ChooseAccount
    } else {
        StartMode::Initialize
    };

    tracing::info!("Starting timelapse dashboard against {}", config.backend.base_url);
    let mut controller = build_controller(&config, provider)?;
    start(&mut controller, mode).await?;

    if args.once || !config.server.enabled {
        let view = controller.view();
        let view = view.read().await;
        print!("{}", render_text(&view));
        return Ok(());
    }

    serve(controller, config.server.port).await?;
    Ok(())
}
