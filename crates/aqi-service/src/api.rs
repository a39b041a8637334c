mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/inputs", get(handlers::inputs))
        .route("/legend", get(handlers::legend))
        .route("/predict", post(handlers::predict))
}
