use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elementor_caller::config::Config;
use elementor_caller::handlers::AppState;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration from the environment, builds the
/// ElevenLabs client and serves the router until the process is stopped.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elementor_caller=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let port = config.port;
    let state = AppState::from_config(config)?;
    tracing::info!(
        "✓ ElevenLabs client initialized: {}",
        state.voice_client.base_url()
    );

    let app = elementor_caller::app(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
