mod api;
mod config;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_risk::{ArtifactStore, SystemClock};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use config::ServiceConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = ServiceConfig::load()?;

    let paths = config.artifact_paths();
    let store = ArtifactStore::load(&paths).with_context(|| {
        format!(
            "failed loading model artifacts from {}",
            config.artifact_dir.display()
        )
    })?;
    if let Err(err) = store.schema_report() {
        warn!(error = %err, "artifacts disagree with the feature schema; predictions will fail");
    }

    let engine = store.into_engine();
    info!(
        bind = %config.bind_addr,
        model_id = %engine.model_id(),
        model_version = %engine.model_version(),
        clamp_inputs = config.clamp_inputs,
        "aqi-service started"
    );

    let state = AppState {
        engine: Arc::new(engine),
        clock: Arc::new(SystemClock),
        clamp_inputs: config.clamp_inputs,
    };
    let app = api::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed binding {}", config.bind_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("aqi-service stopped");
    Ok(())
}
