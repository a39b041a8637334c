use std::path::{Path, PathBuf};

use tracing::info;

use super::{ClassifierArtifact, LabelEncoder, StandardScaler};
use crate::engine::{LoadedEngine, RiskEngine};
use crate::error::{ArtifactError, PredictError};

pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "aqi_model.json";

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub label_encoder: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            scaler: dir.join(DEFAULT_SCALER_FILE),
            label_encoder: dir.join(DEFAULT_LABEL_ENCODER_FILE),
            classifier: dir.join(DEFAULT_CLASSIFIER_FILE),
        }
    }
}

/// The loaded artifact triple. Read-only after [`ArtifactStore::load`].
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub scaler: StandardScaler,
    pub label_encoder: LabelEncoder,
    pub classifier: ClassifierArtifact,
}

impl ArtifactStore {
    /// Load and validate all three artifacts. Any failure is fatal for the
    /// caller; a partially loaded store is never returned.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let scaler = StandardScaler::from_file(&paths.scaler)?;
        let label_encoder = LabelEncoder::from_file(&paths.label_encoder)?;
        let classifier = ClassifierArtifact::from_file(&paths.classifier)?;

        info!(
            model_id = %classifier.model_id,
            model_version = %classifier.model_version,
            model_kind = classifier.model.kind(),
            features = scaler.mean.len(),
            classes = label_encoder.classes.len(),
            "loaded model artifacts"
        );

        Ok(Self {
            scaler,
            label_encoder,
            classifier,
        })
    }

    /// Shape agreement between the artifacts and the feature schema.
    ///
    /// Runs the same checks a prediction runs, without needing a vector.
    pub fn schema_report(&self) -> Result<(), PredictError> {
        self.engine_ref().check_schema()
    }

    fn engine_ref(&self) -> RiskEngine<&StandardScaler, &ClassifierArtifact, &LabelEncoder> {
        RiskEngine::new(&self.scaler, &self.classifier, &self.label_encoder)
    }

    pub fn into_engine(self) -> LoadedEngine {
        let model_id = self.classifier.model_id.clone();
        let model_version = self.classifier.model_version.clone();
        RiskEngine::new(self.scaler, self.classifier, self.label_encoder)
            .with_model_info(model_id, model_version)
    }
}
