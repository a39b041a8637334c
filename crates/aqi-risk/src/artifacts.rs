//! Fitted artifacts and the capability traits the engine calls them through.
//!
//! The scaler, classifier and label encoder are trained offline and exported
//! as JSON. Once loaded they are immutable: the engine only borrows them, so a
//! single [`ArtifactStore`] can back any number of concurrent requests.

mod classifier;
mod encoder;
mod scaler;
mod store;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{ArtifactError, ArtifactKind, PredictError};

pub use classifier::{
    Classifier, ClassifierArtifact, DecisionTree, LinearModel, RandomForest, MAX_FOREST_CLASSES,
};
pub use encoder::LabelEncoder;
pub use scaler::StandardScaler;
pub use store::{ArtifactPaths, ArtifactStore};

/// Elementwise normalization applied before classification.
pub trait FeatureTransform {
    /// Number of features the transform was fitted on.
    fn feature_count(&self) -> usize;

    /// Column names recorded at fit time, when the artifact kept them.
    fn fitted_feature_names(&self) -> Option<&[String]> {
        None
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError>;
}

/// Maps a scaled feature vector to a class index.
pub trait ClassPredictor {
    /// Number of features the classifier was fitted on.
    fn feature_count(&self) -> usize;

    /// Number of classes the classifier can emit.
    fn class_count(&self) -> usize;

    fn predict(&self, scaled: &[f64]) -> Result<usize, PredictError>;
}

/// Inverse label mapping from class index to label string.
pub trait LabelDecoder {
    fn class_count(&self) -> usize;

    fn decode(&self, index: usize) -> Result<String, PredictError>;
}

impl<T: FeatureTransform + ?Sized> FeatureTransform for &T {
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn fitted_feature_names(&self) -> Option<&[String]> {
        (**self).fitted_feature_names()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        (**self).transform(features)
    }
}

impl<T: ClassPredictor + ?Sized> ClassPredictor for &T {
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn class_count(&self) -> usize {
        (**self).class_count()
    }

    fn predict(&self, scaled: &[f64]) -> Result<usize, PredictError> {
        (**self).predict(scaled)
    }
}

impl<T: LabelDecoder + ?Sized> LabelDecoder for &T {
    fn class_count(&self) -> usize {
        (**self).class_count()
    }

    fn decode(&self, index: usize) -> Result<String, PredictError> {
        (**self).decode(index)
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    artifact: ArtifactKind,
    json: &str,
) -> Result<T, ArtifactError> {
    serde_json::from_str(json).map_err(|source| ArtifactError::Parse {
        artifact,
        path: None,
        source,
    })
}

pub(crate) fn read_json<T: DeserializeOwned>(
    artifact: ArtifactKind,
    path: &Path,
) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(artifact, &content).map_err(|err| err.with_path(path.to_path_buf()))
}

pub(crate) fn check_finite(
    artifact: ArtifactKind,
    field: &str,
    values: &[f64],
) -> Result<(), ArtifactError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ArtifactError::invalid(
            artifact,
            format!("non-finite {field} at index {index}: {}", values[index]),
        )),
        None => Ok(()),
    }
}
