use aqi_risk::gauge::legend as legend_lines;
use aqi_risk::{FeatureValue, GaugeView, RawInputs, GAUGE_BANDS, INPUT_RANGES};
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub(super) struct PredictResponse {
    #[serde(flatten)]
    pub gauge: GaugeView,
    pub class_index: usize,
    pub features: Vec<FeatureValue>,
    /// Inputs that fell outside their control's range.
    pub out_of_range: Vec<&'static str>,
    /// Whether those inputs were snapped back before deriving.
    pub clamped: bool,
}

pub(super) async fn health(State(state): State<AppState>) -> Response {
    Json(json!({
        "status": "ok",
        "model_id": state.engine.model_id(),
        "model_version": state.engine.model_version(),
    }))
    .into_response()
}

pub(super) async fn inputs() -> Response {
    Json(INPUT_RANGES).into_response()
}

pub(super) async fn legend() -> Response {
    Json(json!({
        "bands": GAUGE_BANDS,
        "legend": legend_lines(),
    }))
    .into_response()
}

pub(super) async fn predict(
    State(state): State<AppState>,
    Json(raw): Json<RawInputs>,
) -> Response {
    let out_of_range = raw.out_of_range();
    let clamped = state.clamp_inputs && !out_of_range.is_empty();
    let inputs = if clamped { raw.clamped() } else { raw };

    match state.engine.assess(&inputs, &*state.clock) {
        Ok(assessment) => {
            let body = PredictResponse {
                gauge: GaugeView::from_prediction(&assessment.prediction),
                class_index: assessment.prediction.class_index,
                features: assessment.features.named(),
                out_of_range,
                clamped,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "prediction failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "prediction unavailable"})),
            )
                .into_response()
        }
    }
}
