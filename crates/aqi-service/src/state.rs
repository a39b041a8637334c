use std::sync::Arc;

use aqi_risk::{Clock, LoadedEngine};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LoadedEngine>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub clamp_inputs: bool,
}
