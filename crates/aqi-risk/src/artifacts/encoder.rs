use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{parse_json, read_json, LabelDecoder};
use crate::error::{ArtifactError, ArtifactKind, PredictError};

/// Fitted class list; index `i` decodes to `classes[i]`.
///
/// Encoders fitted with the usual tooling store classes sorted, so index 0 is
/// not necessarily the lowest risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let kind = ArtifactKind::LabelEncoder;
        if self.classes.is_empty() {
            return Err(ArtifactError::invalid(kind, "no classes"));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(ArtifactError::invalid(
                    kind,
                    format!("duplicate class '{class}'"),
                ));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let encoder: Self = parse_json(ArtifactKind::LabelEncoder, json)?;
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let encoder: Self = read_json(ArtifactKind::LabelEncoder, path)?;
        encoder.validate()?;
        Ok(encoder)
    }

    /// Forward mapping, label to class index.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}

impl LabelDecoder for LabelEncoder {
    fn class_count(&self) -> usize {
        self.classes.len()
    }

    fn decode(&self, index: usize) -> Result<String, PredictError> {
        self.classes
            .get(index)
            .cloned()
            .ok_or(PredictError::UnknownClassIndex {
                index,
                known: self.classes.len(),
            })
    }
}
