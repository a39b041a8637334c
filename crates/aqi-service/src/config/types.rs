use std::path::PathBuf;

use aqi_risk::ArtifactPaths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: String,
    /// Directory holding the three artifacts under their default names.
    pub artifact_dir: PathBuf,
    /// Per-artifact overrides; relative paths resolve against `artifact_dir`.
    pub scaler_path: Option<PathBuf>,
    pub label_encoder_path: Option<PathBuf>,
    pub classifier_path: Option<PathBuf>,
    /// Snap request inputs onto the input controls' ranges before deriving.
    pub clamp_inputs: bool,
}

impl ServiceConfig {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let defaults = ArtifactPaths::in_dir(&self.artifact_dir);
        let resolve = |path: &Option<PathBuf>, default: PathBuf| match path {
            Some(p) => self.artifact_dir.join(p),
            None => default,
        };
        ArtifactPaths {
            scaler: resolve(&self.scaler_path, defaults.scaler),
            label_encoder: resolve(&self.label_encoder_path, defaults.label_encoder),
            classifier: resolve(&self.classifier_path, defaults.classifier),
        }
    }
}
