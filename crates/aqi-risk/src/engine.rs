use serde::Serialize;
use tracing::{debug, warn};

use crate::artifacts::{
    ClassPredictor, ClassifierArtifact, FeatureTransform, LabelDecoder, LabelEncoder,
    StandardScaler,
};
use crate::clock::Clock;
use crate::error::{ArtifactKind, PredictError};
use crate::features::DerivedFeatures;
use crate::inputs::RawInputs;
use crate::risk::RiskLabel;
use crate::schema::{schema_mismatch, FEATURE_COUNT};

/// Engine over the artifact types loaded from disk.
pub type LoadedEngine = RiskEngine<StandardScaler, ClassifierArtifact, LabelEncoder>;

/// Scale, predict, decode. Holds no mutable state; call
/// [`predict`](RiskEngine::predict) per request from any number of threads.
#[derive(Debug, Clone)]
pub struct RiskEngine<T, P, D> {
    scaler: T,
    classifier: P,
    encoder: D,
    model_id: String,
    model_version: String,
}

/// Outcome of one successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: RiskLabel,
    pub class_index: usize,
    /// Gauge value in [0, 100].
    pub risk_score: u8,
    pub color: &'static str,
}

/// Features and prediction for one set of raw inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub features: DerivedFeatures,
    pub prediction: PredictionResult,
}

impl<T, P, D> RiskEngine<T, P, D>
where
    T: FeatureTransform,
    P: ClassPredictor,
    D: LabelDecoder,
{
    pub fn new(scaler: T, classifier: P, encoder: D) -> Self {
        Self {
            scaler,
            classifier,
            encoder,
            model_id: String::new(),
            model_version: String::new(),
        }
    }

    pub fn with_model_info(mut self, model_id: String, model_version: String) -> Self {
        self.model_id = model_id;
        self.model_version = model_version;
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Check every artifact's fitted shape against the feature schema.
    pub fn check_schema(&self) -> Result<(), PredictError> {
        self.check_scaler()?;
        if self.classifier.feature_count() != self.scaler.feature_count() {
            return Err(PredictError::mismatch(
                ArtifactKind::Classifier,
                format!(
                    "fitted on {} features, scaler emits {}",
                    self.classifier.feature_count(),
                    self.scaler.feature_count()
                ),
            ));
        }
        if self.classifier.class_count() > self.encoder.class_count() {
            return Err(PredictError::mismatch(
                ArtifactKind::LabelEncoder,
                format!(
                    "{} classes, classifier emits {}",
                    self.encoder.class_count(),
                    self.classifier.class_count()
                ),
            ));
        }
        Ok(())
    }

    fn check_scaler(&self) -> Result<(), PredictError> {
        if self.scaler.feature_count() != FEATURE_COUNT {
            return Err(PredictError::mismatch(
                ArtifactKind::Scaler,
                format!(
                    "fitted on {} features, schema has {FEATURE_COUNT}",
                    self.scaler.feature_count()
                ),
            ));
        }
        if let Some(names) = self.scaler.fitted_feature_names() {
            if let Some(detail) = schema_mismatch(names) {
                return Err(PredictError::mismatch(ArtifactKind::Scaler, detail));
            }
        }
        Ok(())
    }

    /// Run one feature vector through the artifacts.
    pub fn predict(&self, features: &DerivedFeatures) -> Result<PredictionResult, PredictError> {
        self.check_scaler()?;
        let scaled = self.scaler.transform(features.as_slice())?;

        if self.classifier.feature_count() != scaled.len() {
            return Err(PredictError::mismatch(
                ArtifactKind::Classifier,
                format!(
                    "fitted on {} features, got {}",
                    self.classifier.feature_count(),
                    scaled.len()
                ),
            ));
        }
        let class_index = self.classifier.predict(&scaled)?;

        let label = RiskLabel::from_decoded(self.encoder.decode(class_index)?);
        if !label.is_mapped() {
            warn!(
                label = %label,
                class_index,
                "unmapped label, using neutral color and zero risk score"
            );
        }

        let prediction = PredictionResult {
            class_index,
            risk_score: label.risk_score(),
            color: label.color(),
            label,
        };
        debug!(
            label = %prediction.label,
            class_index,
            risk_score = prediction.risk_score,
            "prediction complete"
        );
        Ok(prediction)
    }

    /// Derive features from raw inputs at the clock's current time, then
    /// predict.
    pub fn assess(
        &self,
        inputs: &RawInputs,
        clock: &(impl Clock + ?Sized),
    ) -> Result<Assessment, PredictError> {
        let features = DerivedFeatures::derive(inputs, clock);
        let prediction = self.predict(&features)?;
        Ok(Assessment {
            features,
            prediction,
        })
    }
}
