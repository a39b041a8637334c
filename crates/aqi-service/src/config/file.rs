use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::paths::resolve_config_path;
use super::types::ServiceConfig;
use super::util::non_empty;

impl ServiceConfig {
    pub(super) fn apply_file_config(&mut self) -> Result<bool> {
        let path = resolve_config_path()?;
        let Some(path) = path else {
            return Ok(false);
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed reading config file {}", path.display()))?;
        let file_cfg: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("failed parsing TOML config {}", path.display()))?;

        self.apply_file_server(file_cfg.server);
        self.apply_file_artifacts(file_cfg.artifacts);
        self.apply_file_inputs(file_cfg.inputs);

        Ok(true)
    }

    fn apply_file_server(&mut self, server: Option<FileServerConfig>) {
        let Some(server) = server else {
            return;
        };
        if let Some(v) = non_empty(server.bind) {
            self.bind_addr = v;
        }
    }

    fn apply_file_artifacts(&mut self, artifacts: Option<FileArtifactsConfig>) {
        let Some(artifacts) = artifacts else {
            return;
        };
        if let Some(v) = non_empty(artifacts.dir) {
            self.artifact_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(artifacts.scaler) {
            self.scaler_path = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty(artifacts.label_encoder) {
            self.label_encoder_path = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty(artifacts.classifier) {
            self.classifier_path = Some(PathBuf::from(v));
        }
    }

    fn apply_file_inputs(&mut self, inputs: Option<FileInputsConfig>) {
        let Some(inputs) = inputs else {
            return;
        };
        if let Some(v) = inputs.clamp {
            self.clamp_inputs = v;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    server: Option<FileServerConfig>,
    #[serde(default)]
    artifacts: Option<FileArtifactsConfig>,
    #[serde(default)]
    inputs: Option<FileInputsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct FileServerConfig {
    #[serde(default)]
    bind: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileArtifactsConfig {
    #[serde(default)]
    dir: Option<String>,
    #[serde(default)]
    scaler: Option<String>,
    #[serde(default)]
    label_encoder: Option<String>,
    #[serde(default)]
    classifier: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileInputsConfig {
    #[serde(default)]
    clamp: Option<bool>,
}
