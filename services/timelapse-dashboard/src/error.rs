//! Error types for the timelapse dashboard

/// Errors that can occur in the dashboard controller
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a status outside 200-299
    #[error("Backend returned status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
