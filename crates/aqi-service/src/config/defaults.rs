use std::path::PathBuf;

use super::constants::{DEFAULT_ARTIFACT_DIR, DEFAULT_BIND_ADDR};
use super::types::ServiceConfig;

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            scaler_path: None,
            label_encoder_path: None,
            classifier_path: None,
            clamp_inputs: true,
        }
    }
}
