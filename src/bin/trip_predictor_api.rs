//! Trip Predictor API Server
//!
//! Loads the regression model and scaler once, then serves `POST /predict`.
//!
//! Usage:
//!   cargo run --bin trip_predictor_api
//!
//! Environment:
//!   PORT / PREDICTOR_PORT  - Server port (default: 5000)
//!   PREDICTOR_HOST         - Server host (default: 0.0.0.0)
//!   PREDICTOR_MODEL_PATH   - Model artifact (default: ./predictor.json)
//!   PREDICTOR_SCALER_PATH  - Scaler artifact (default: ./scaler.json)
//!   RUST_LOG               - Log level (default: info)

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use trip_predictor::{create_router, AppState, Predictor, ServerConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env();

    info!("📂 Model artifact:  {}", config.model_path.display());
    info!("📂 Scaler artifact: {}", config.scaler_path.display());

    let predictor = match Predictor::load(&config.model_path, &config.scaler_path) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!(code = e.code_str(), "❌ Failed to load artifacts: {}", e.client_message());
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(predictor));
    let app = create_router(state);

    let addr = config.socket_addr()?;

    info!("🚀 Trip Predictor API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /predict  - Score one trip");
    info!("  GET  /health   - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Trip Predictor API shutdown complete");

    Ok(())
}
