use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{check_finite, parse_json, read_json, FeatureTransform};
use crate::error::{ArtifactError, ArtifactKind, PredictError};

/// Standardization fitted per feature: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature center.
    pub mean: Vec<f64>,
    /// Per-feature divisor. Constant columns are exported with scale 1.
    pub scale: Vec<f64>,
    /// Columns seen at fit time (empty when fitted on a bare matrix).
    #[serde(default)]
    pub feature_names: Vec<String>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let kind = ArtifactKind::Scaler;
        if self.mean.is_empty() {
            return Err(ArtifactError::invalid(kind, "no features"));
        }
        if self.scale.len() != self.mean.len() {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "{} scale values for {} means",
                    self.scale.len(),
                    self.mean.len()
                ),
            ));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.mean.len() {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "{} feature names for {} features",
                    self.feature_names.len(),
                    self.mean.len()
                ),
            ));
        }
        check_finite(kind, "mean", &self.mean)?;
        check_finite(kind, "scale", &self.scale)?;
        if let Some(index) = self.scale.iter().position(|s| *s == 0.0) {
            return Err(ArtifactError::invalid(
                kind,
                format!("zero scale at index {index}"),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let scaler: Self = parse_json(ArtifactKind::Scaler, json)?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let scaler: Self = read_json(ArtifactKind::Scaler, path)?;
        scaler.validate()?;
        Ok(scaler)
    }
}

impl FeatureTransform for StandardScaler {
    fn feature_count(&self) -> usize {
        self.mean.len()
    }

    fn fitted_feature_names(&self) -> Option<&[String]> {
        if self.feature_names.is_empty() {
            None
        } else {
            Some(&self.feature_names)
        }
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if features.len() != self.mean.len() {
            return Err(PredictError::mismatch(
                ArtifactKind::Scaler,
                format!(
                    "got {} features, fitted on {}",
                    features.len(),
                    self.mean.len()
                ),
            ));
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}
