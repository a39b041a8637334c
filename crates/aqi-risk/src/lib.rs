//! Air quality health-risk inference.
//!
//! Seven ambient readings (particulates, gases, temperature, humidity) are
//! expanded into an 18-feature vector, normalized by a fitted scaler,
//! classified, and decoded into a categorical risk level with a display
//! color and a 0-100 gauge score.
//!
//! ```text
//! RawInputs ─┐
//!            ├─→ DerivedFeatures [x₀..x₁₇] ─→ scale ─→ predict ─→ decode ─→ RiskLabel ─→ GaugeView
//! Clock ─────┘
//! ```
//!
//! The scaler, classifier and label encoder are trained offline and shipped
//! as JSON artifacts. This crate performs inference only. Every artifact sits
//! behind a small capability trait ([`FeatureTransform`], [`ClassPredictor`],
//! [`LabelDecoder`]) so the pipeline runs against stubs as easily as against
//! the real files.

pub mod artifacts;
pub mod clock;
mod engine;
mod error;
mod features;
pub mod gauge;
mod inputs;
mod math;
mod risk;
pub mod schema;

pub use artifacts::{
    ArtifactPaths, ArtifactStore, ClassPredictor, Classifier, ClassifierArtifact, DecisionTree,
    FeatureTransform, LabelDecoder, LabelEncoder, LinearModel, RandomForest, StandardScaler,
    MAX_FOREST_CLASSES,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{Assessment, LoadedEngine, PredictionResult, RiskEngine};
pub use error::{ArtifactError, ArtifactKind, PredictError};
pub use features::{DerivedFeatures, FeatureValue, PRESSURE, WIND_DIRECTION, WIND_SPEED};
pub use gauge::{GaugeBand, GaugeView, GAUGE_BANDS};
pub use inputs::{InputRange, RawInputs, INPUT_RANGES};
pub use risk::{label_color, label_risk_score, RiskLabel, RiskLevel, UNMAPPED_COLOR, UNMAPPED_SCORE};
pub use schema::{FEATURE_COUNT, FEATURE_NAMES};

#[cfg(test)]
mod tests;
