use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{check_finite, parse_json, read_json, ClassPredictor};
use crate::error::{ArtifactError, ArtifactKind, PredictError};
use crate::math::{argmax, argmax_count, dot};

/// Upper bound on a forest's declared class count.
pub const MAX_FOREST_CLASSES: usize = 1024;

/// Classifier file: model metadata plus one of the supported model families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// Human-readable model identifier.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub model_version: String,
    #[serde(flatten)]
    pub model: Classifier,
}

fn default_model_id() -> String {
    "aqi-risk-classifier".to_string()
}

/// Supported model families, tagged by `"kind"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Linear(LinearModel),
    RandomForest(RandomForest),
}

/// Multinomial linear model: one row of coefficients per class, argmax of
/// `W·x + b`. A single row is a binary model (class 1 when the logit is
/// positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_count: usize,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Ensemble of array-encoded decision trees.
///
/// When every tree carries per-leaf class distributions the forest averages
/// them and takes the most probable class, which is how scikit-learn's
/// `RandomForestClassifier.predict` decides. Otherwise each tree casts one
/// vote for its leaf class and the majority wins. The two rules can
/// disagree on close calls, so exports should include the distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub feature_count: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

/// Decision tree as parallel node arrays. Node 0 is the root; a negative
/// `feature` marks a leaf whose `class` is the prediction. Samples with
/// `x[feature] <= threshold` go left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub feature: Vec<i32>,
    pub threshold: Vec<f64>,
    pub left: Vec<i32>,
    pub right: Vec<i32>,
    pub class: Vec<Option<usize>>,
    /// Per-node class weights (training sample counts or fractions). Only
    /// leaf rows are read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<Vec<f64>>>,
}

impl ClassifierArtifact {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        self.model.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let artifact: Self = parse_json(ArtifactKind::Classifier, json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: Self = read_json(ArtifactKind::Classifier, path)?;
        artifact.validate()?;
        Ok(artifact)
    }
}

impl Classifier {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            Self::Linear(model) => model.validate(),
            Self::RandomForest(forest) => forest.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::RandomForest(_) => "random_forest",
        }
    }
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let kind = ArtifactKind::Classifier;
        if self.coefficients.is_empty() {
            return Err(ArtifactError::invalid(kind, "no coefficient rows"));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ArtifactError::invalid(
                kind,
                format!(
                    "{} intercepts for {} coefficient rows",
                    self.intercepts.len(),
                    self.coefficients.len()
                ),
            ));
        }
        for (row, coefficients) in self.coefficients.iter().enumerate() {
            if coefficients.len() != self.feature_count {
                return Err(ArtifactError::invalid(
                    kind,
                    format!(
                        "coefficient row {row} has {} weights, expected {}",
                        coefficients.len(),
                        self.feature_count
                    ),
                ));
            }
            check_finite(kind, "coefficient", coefficients)?;
        }
        check_finite(kind, "intercept", &self.intercepts)
    }

    fn decision(&self, scaled: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(w, b)| dot(w, scaled) + b)
            .collect()
    }
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid(ArtifactKind::Classifier, "empty forest"));
        }
        if self.n_classes == 0 {
            return Err(ArtifactError::invalid(ArtifactKind::Classifier, "zero classes"));
        }
        if self.n_classes > MAX_FOREST_CLASSES {
            return Err(ArtifactError::invalid(
                ArtifactKind::Classifier,
                format!(
                    "{} classes exceeds the limit of {MAX_FOREST_CLASSES}",
                    self.n_classes
                ),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_count, self.n_classes)
                .map_err(|reason| {
                    ArtifactError::invalid(ArtifactKind::Classifier, format!("tree {i}: {reason}"))
                })?;
        }
        Ok(())
    }

    /// Vote count per class.
    pub fn votes(&self, scaled: &[f64]) -> Vec<usize> {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            let class = tree.predict(scaled);
            if class < self.n_classes {
                votes[class] += 1;
            }
        }
        votes
    }

    /// Mean of the trees' normalized leaf distributions, or `None` when any
    /// tree lacks them.
    pub fn probabilities(&self, scaled: &[f64]) -> Option<Vec<f64>> {
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(scaled)?;
            let total: f64 = dist.iter().sum();
            if total > 0.0 {
                for (acc, w) in mean.iter_mut().zip(dist) {
                    *acc += w / total;
                }
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|p| *p /= n);
        Some(mean)
    }

    fn decide(&self, scaled: &[f64]) -> usize {
        match self.probabilities(scaled) {
            Some(mean) => argmax(&mean),
            None => argmax_count(&self.votes(scaled)),
        }
    }
}

impl DecisionTree {
    /// Structural checks. Children must come after their parent, which also
    /// guarantees traversal terminates.
    pub fn validate(&self, feature_count: usize, n_classes: usize) -> Result<(), String> {
        let n = self.feature.len();
        if n == 0 {
            return Err("no nodes".into());
        }
        if self.threshold.len() != n
            || self.left.len() != n
            || self.right.len() != n
            || self.class.len() != n
        {
            return Err("inconsistent node array lengths".into());
        }
        for i in 0..n {
            if self.is_leaf(i) {
                match self.class[i] {
                    Some(c) if c < n_classes => {}
                    Some(c) => return Err(format!("leaf {i} predicts class {c} of {n_classes}")),
                    None => return Err(format!("leaf {i} has no class")),
                }
                continue;
            }
            if self.feature[i] as usize >= feature_count {
                return Err(format!(
                    "node {i} splits on feature {} of {feature_count}",
                    self.feature[i]
                ));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {i} has non-finite threshold"));
            }
            for child in [self.left[i], self.right[i]] {
                if child <= i as i32 || child as usize >= n {
                    return Err(format!("node {i} has invalid child {child}"));
                }
            }
        }
        if let Some(value) = &self.value {
            if value.len() != n {
                return Err(format!("{} value rows for {n} nodes", value.len()));
            }
            for (i, row) in value.iter().enumerate() {
                if row.len() != n_classes {
                    return Err(format!(
                        "node {i} has {} class weights, expected {n_classes}",
                        row.len()
                    ));
                }
                if row.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("node {i} has a negative or non-finite class weight"));
                }
            }
        }
        Ok(())
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.feature[node] < 0
    }

    /// Walk from the root to a leaf and return its class. Only call on a
    /// validated tree.
    pub fn predict(&self, scaled: &[f64]) -> usize {
        self.class[self.leaf(scaled)].unwrap_or(0)
    }

    /// Class weights of the leaf `scaled` lands in, if the tree has them.
    pub fn leaf_distribution(&self, scaled: &[f64]) -> Option<&[f64]> {
        let leaf = self.leaf(scaled);
        self.value
            .as_ref()
            .and_then(|value| value.get(leaf))
            .map(Vec::as_slice)
    }

    fn leaf(&self, scaled: &[f64]) -> usize {
        let mut node = 0usize;
        loop {
            if self.is_leaf(node) {
                return node;
            }
            let value = scaled
                .get(self.feature[node] as usize)
                .copied()
                .unwrap_or(0.0);
            node = if value <= self.threshold[node] {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
    }
}

fn check_cardinality(expected: usize, scaled: &[f64]) -> Result<(), PredictError> {
    if scaled.len() != expected {
        return Err(PredictError::mismatch(
            ArtifactKind::Classifier,
            format!("got {} features, fitted on {expected}", scaled.len()),
        ));
    }
    Ok(())
}

impl ClassPredictor for Classifier {
    fn feature_count(&self) -> usize {
        match self {
            Self::Linear(model) => model.feature_count,
            Self::RandomForest(forest) => forest.feature_count,
        }
    }

    fn class_count(&self) -> usize {
        match self {
            Self::Linear(model) if model.coefficients.len() == 1 => 2,
            Self::Linear(model) => model.coefficients.len(),
            Self::RandomForest(forest) => forest.n_classes,
        }
    }

    fn predict(&self, scaled: &[f64]) -> Result<usize, PredictError> {
        check_cardinality(self.feature_count(), scaled)?;
        let class = match self {
            Self::Linear(model) => {
                let scores = model.decision(scaled);
                if scores.len() == 1 {
                    usize::from(scores[0] > 0.0)
                } else {
                    argmax(&scores)
                }
            }
            Self::RandomForest(forest) => forest.decide(scaled),
        };
        Ok(class)
    }
}

impl ClassPredictor for ClassifierArtifact {
    fn feature_count(&self) -> usize {
        self.model.feature_count()
    }

    fn class_count(&self) -> usize {
        self.model.class_count()
    }

    fn predict(&self, scaled: &[f64]) -> Result<usize, PredictError> {
        self.model.predict(scaled)
    }
}
