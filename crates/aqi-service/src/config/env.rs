use std::path::PathBuf;

use tracing::warn;

use super::types::ServiceConfig;
use super::util::{env_non_empty, parse_bool};

impl ServiceConfig {
    pub(super) fn apply_env_overrides(&mut self) {
        self.apply_env_server();
        self.apply_env_artifacts();
        self.apply_env_inputs();
    }

    fn apply_env_server(&mut self) {
        if let Some(v) = env_non_empty("AIRRISK_BIND") {
            self.bind_addr = v;
        }
    }

    fn apply_env_artifacts(&mut self) {
        if let Some(v) = env_non_empty("AIRRISK_ARTIFACT_DIR") {
            self.artifact_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty("AIRRISK_SCALER_PATH") {
            self.scaler_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env_non_empty("AIRRISK_LABEL_ENCODER_PATH") {
            self.label_encoder_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env_non_empty("AIRRISK_CLASSIFIER_PATH") {
            self.classifier_path = Some(PathBuf::from(v));
        }
    }

    fn apply_env_inputs(&mut self) {
        if let Some(v) = env_non_empty("AIRRISK_CLAMP_INPUTS") {
            match parse_bool(&v) {
                Some(parsed) => self.clamp_inputs = parsed,
                None => warn!(value = %v, "ignoring unparseable AIRRISK_CLAMP_INPUTS"),
            }
        }
    }
}
