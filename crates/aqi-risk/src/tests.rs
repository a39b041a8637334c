use std::cell::RefCell;

use chrono::NaiveDate;
use proptest::prelude::*;

use super::*;
use crate::gauge::{band_for, legend};
use crate::schema::{feature_index, schema_mismatch};

fn thursday_morning() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid instant"),
    )
}

fn scenario_inputs() -> RawInputs {
    RawInputs {
        pm25: 124.0,
        pm10: 210.0,
        no2: 75.0,
        ozone: 100.0,
        co: 3.6,
        temperature: 32.0,
        humidity: 70.0,
    }
}

fn minimum_inputs() -> RawInputs {
    RawInputs {
        pm25: 0.0,
        pm10: 0.0,
        no2: 0.0,
        ozone: 0.0,
        co: 0.0,
        temperature: -10.0,
        humidity: 0.0,
    }
}

fn schema_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

fn encoder() -> LabelEncoder {
    LabelEncoder {
        classes: vec![
            "Good".to_string(),
            "Hazardous".to_string(),
            "Moderate".to_string(),
            "Poor".to_string(),
            "Very Poor".to_string(),
        ],
    }
}

/// Identity transform that keeps a copy of every vector it is given.
struct RecordingScaler {
    names: Option<Vec<String>>,
    count: usize,
    seen: RefCell<Vec<Vec<f64>>>,
}

impl RecordingScaler {
    fn new() -> Self {
        Self {
            names: Some(schema_names()),
            count: FEATURE_COUNT,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl FeatureTransform for RecordingScaler {
    fn feature_count(&self) -> usize {
        self.count
    }

    fn fitted_feature_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.seen.borrow_mut().push(features.to_vec());
        Ok(features.to_vec())
    }
}

/// Always predicts the same class.
struct FixedPredictor {
    class: usize,
    features: usize,
}

impl ClassPredictor for FixedPredictor {
    fn feature_count(&self) -> usize {
        self.features
    }

    fn class_count(&self) -> usize {
        5
    }

    fn predict(&self, _scaled: &[f64]) -> Result<usize, PredictError> {
        Ok(self.class)
    }
}

fn fixed(class: usize) -> FixedPredictor {
    FixedPredictor {
        class,
        features: FEATURE_COUNT,
    }
}

fn assert_close(got: f64, expected: f64) {
    assert!(
        (got - expected).abs() < 1e-9,
        "expected {expected}, got {got}"
    );
}

#[test]
fn derived_vector_has_schema_length_and_order() {
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());
    assert_eq!(features.values.len(), FEATURE_COUNT);

    let named = features.named();
    let names: Vec<&str> = named.iter().map(|f| f.name).collect();
    assert_eq!(names, FEATURE_NAMES.to_vec());
}

#[test]
fn scenario_features_match_formulas() {
    let inputs = scenario_inputs();
    let features = DerivedFeatures::derive(&inputs, &thursday_morning());
    let get = |name: &str| features.get(name).expect("schema feature");

    assert_close(get("CO(GT)"), 3.6);
    assert_close(get("NOx(GT)"), 150.0);
    assert_close(get("NO2(GT)"), 75.0);
    assert_close(get("O3(GT)"), 100.0);
    assert_close(get("SO2(GT)"), 22.5);
    assert_close(get("PM2.5"), 124.0);
    assert_close(get("PM10"), 210.0);
    assert_close(get("Temperature"), 32.0);
    assert_close(get("Humidity"), 70.0);
    assert_close(get("Pressure"), 1013.0);
    assert_close(get("WindSpeed"), 2.0);
    assert_close(get("WindDirection"), 90.0);
    assert_close(get("CO_NOx_Ratio"), 3.6 / 151.0);
    assert_close(get("NOx_NO2_Ratio"), 150.0 / 76.0);
    assert_close(get("Temp_Humidity_Index"), 54.4);
    assert_close(get("AirQualityIndex"), 509.0);
    assert!((get("CO_NOx_Ratio") - 0.02384).abs() < 1e-5);
    assert!((get("NOx_NO2_Ratio") - 1.9737).abs() < 1e-4);
}

#[test]
fn calendar_features_follow_injected_clock() {
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());
    assert_eq!(features.get("DayOfWeek"), Some(3.0));
    assert_eq!(features.get("Hour"), Some(9.0));

    let sunday_late = FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 17)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .expect("valid instant"),
    );
    let features = DerivedFeatures::derive(&scenario_inputs(), &sunday_late);
    assert_eq!(features.get("DayOfWeek"), Some(6.0));
    assert_eq!(features.get("Hour"), Some(23.0));

    let monday_midnight = FixedClock(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid instant"),
    );
    let features = DerivedFeatures::derive(&scenario_inputs(), &monday_midnight);
    assert_eq!(features.get("DayOfWeek"), Some(0.0));
    assert_eq!(features.get("Hour"), Some(0.0));
}

#[test]
fn minimum_inputs_keep_ratios_finite() {
    let features = DerivedFeatures::derive(&minimum_inputs(), &thursday_morning());
    assert!(features.values.iter().all(|v| v.is_finite()));
    assert_eq!(features.get("CO_NOx_Ratio"), Some(0.0));
    assert_eq!(features.get("NOx_NO2_Ratio"), Some(0.0));
    assert_close(features.get("Temp_Humidity_Index").unwrap(), -10.0);
}

#[test]
fn out_of_range_inputs_propagate_unclamped() {
    let inputs = RawInputs {
        pm25: 9_000.0,
        temperature: -40.0,
        ..scenario_inputs()
    };
    let features = DerivedFeatures::derive(&inputs, &thursday_morning());
    assert_eq!(features.get("PM2.5"), Some(9_000.0));
    assert_eq!(features.get("Temperature"), Some(-40.0));
    assert_close(features.get("AirQualityIndex").unwrap(), 9_000.0 + 210.0 + 75.0 + 100.0);
}

#[test]
fn default_inputs_are_surface_defaults() {
    assert_eq!(RawInputs::default(), scenario_inputs());
}

#[test]
fn clamping_snaps_to_controls() {
    let inputs = RawInputs {
        pm25: 612.4,
        pm10: -5.0,
        no2: 74.6,
        ozone: 100.0,
        co: 12.25,
        temperature: -11.0,
        humidity: 55.5,
    };
    assert_eq!(
        inputs.out_of_range(),
        vec!["pm25", "pm10", "co", "temperature"]
    );
    let clamped = inputs.clamped();
    assert_eq!(clamped.pm25, 500.0);
    assert_eq!(clamped.pm10, 0.0);
    assert_eq!(clamped.no2, 75.0);
    assert_eq!(clamped.co, 10.0);
    assert_eq!(clamped.temperature, -10.0);
    assert_eq!(clamped.humidity, 56.0);
    assert!(clamped.out_of_range().is_empty());
}

#[test]
fn raw_inputs_accept_partial_json() {
    let inputs: RawInputs =
        serde_json::from_str(r#"{"pm25": 10, "O3": 42, "co": 0.5}"#).expect("parse inputs");
    assert_eq!(inputs.pm25, 10.0);
    assert_eq!(inputs.ozone, 42.0);
    assert_eq!(inputs.co, 0.5);
    assert_eq!(inputs.pm10, 210.0);
    assert_eq!(inputs.humidity, 70.0);
}

#[test]
fn scaler_receives_features_unmodified_and_in_order() {
    let scaler = RecordingScaler::new();
    let engine = RiskEngine::new(&scaler, fixed(3), encoder());
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let result = engine.predict(&features).expect("prediction");
    assert_eq!(result.label, RiskLabel::Known(RiskLevel::Poor));
    assert_eq!(result.class_index, 3);
    assert_eq!(result.risk_score, 50);
    assert_eq!(result.color, "#fb923c");

    let seen = scaler.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], features.values.to_vec());
}

#[test]
fn end_to_end_scenario_with_stub_artifacts() {
    let scaler = RecordingScaler::new();
    let engine = RiskEngine::new(&scaler, fixed(1), encoder());

    let assessment = engine
        .assess(&scenario_inputs(), &thursday_morning())
        .expect("assessment");
    assert_eq!(assessment.prediction.label.as_str(), "Hazardous");
    assert_eq!(assessment.prediction.risk_score, 95);
    assert_eq!(assessment.features.get("AirQualityIndex"), Some(509.0));

    let view = GaugeView::from_prediction(&assessment.prediction);
    assert_eq!(view.display_label, "HAZARDOUS");
    assert_eq!(view.color, "#7f1d1d");
    assert_eq!(view.value, 95);
    assert!(view.band_matches_level());
}

#[test]
fn inference_is_deterministic() {
    let scaler = StandardScaler {
        mean: vec![1.0; FEATURE_COUNT],
        scale: vec![2.0; FEATURE_COUNT],
        feature_names: schema_names(),
    };
    let mut coefficients = vec![vec![0.0; FEATURE_COUNT]; 5];
    coefficients[4][feature_index("AirQualityIndex").unwrap()] = 0.01;
    let classifier = ClassifierArtifact {
        model_id: "test".into(),
        model_version: "1".into(),
        model: Classifier::Linear(LinearModel {
            feature_count: FEATURE_COUNT,
            coefficients,
            intercepts: vec![0.0, 0.0, 0.0, 0.0, 1.0],
        }),
    };
    let engine = RiskEngine::new(scaler, classifier, encoder());
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let first = engine.predict(&features).expect("first");
    let second = engine.predict(&features).expect("second");
    assert_eq!(first, second);
    assert_eq!(first.label, RiskLabel::Known(RiskLevel::VeryPoor));
}

#[test]
fn scaler_with_wrong_cardinality_is_a_mismatch() {
    let mut scaler = RecordingScaler::new();
    scaler.count = FEATURE_COUNT - 1;
    scaler.names = None;
    let engine = RiskEngine::new(&scaler, fixed(0), encoder());
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let err = engine.predict(&features).unwrap_err();
    assert!(matches!(
        err,
        PredictError::ArtifactMismatch {
            artifact: ArtifactKind::Scaler,
            ..
        }
    ));
    assert!(scaler.seen.borrow().is_empty());
}

#[test]
fn scaler_fitted_on_reordered_columns_is_a_mismatch() {
    let mut names = schema_names();
    names.swap(0, 1);
    let scaler = StandardScaler {
        mean: vec![0.0; FEATURE_COUNT],
        scale: vec![1.0; FEATURE_COUNT],
        feature_names: names,
    };
    let engine = RiskEngine::new(scaler, fixed(0), encoder());
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let err = engine.predict(&features).unwrap_err();
    assert!(err.to_string().contains("feature 0 is 'NOx(GT)'"), "{err}");
}

#[test]
fn classifier_with_wrong_cardinality_is_a_mismatch() {
    let engine = RiskEngine::new(
        RecordingScaler::new(),
        FixedPredictor {
            class: 0,
            features: 12,
        },
        encoder(),
    );
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());
    let err = engine.predict(&features).unwrap_err();
    assert!(matches!(
        err,
        PredictError::ArtifactMismatch {
            artifact: ArtifactKind::Classifier,
            ..
        }
    ));
    assert!(engine.check_schema().is_err());
}

#[test]
fn undecodable_class_index_fails_the_request_only() {
    let engine = RiskEngine::new(RecordingScaler::new(), fixed(7), encoder());
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let err = engine.predict(&features).unwrap_err();
    assert_eq!(err, PredictError::UnknownClassIndex { index: 7, known: 5 });

    let healthy = RiskEngine::new(RecordingScaler::new(), fixed(0), encoder());
    assert!(healthy.predict(&features).is_ok());
}

#[test]
fn unmapped_label_falls_back_without_failing() {
    let encoder = LabelEncoder {
        classes: vec!["Severe".to_string()],
    };
    let engine = RiskEngine::new(RecordingScaler::new(), fixed(0), encoder);
    let features = DerivedFeatures::derive(&scenario_inputs(), &thursday_morning());

    let result = engine.predict(&features).expect("unmapped labels are not fatal");
    assert_eq!(result.label, RiskLabel::Unmapped("Severe".to_string()));
    assert_eq!(result.risk_score, UNMAPPED_SCORE);
    assert_eq!(result.color, UNMAPPED_COLOR);

    let view = GaugeView::from_prediction(&result);
    assert_eq!(view.display_label, "SEVERE");
    assert_eq!(view.band.level, "Good");
    assert!(!view.band_matches_level());
}

#[test]
fn label_lookups_are_total() {
    let expected = [
        ("Good", "#22c55e", 10),
        ("Moderate", "#eab308", 30),
        ("Poor", "#fb923c", 50),
        ("Very Poor", "#ef4444", 75),
        ("Hazardous", "#7f1d1d", 95),
        ("very poor", "white", 0),
        ("", "white", 0),
        ("Unknown", "white", 0),
    ];
    for (label, color, score) in expected {
        assert_eq!(label_color(label), color, "color for {label:?}");
        assert_eq!(label_risk_score(label), score, "score for {label:?}");
    }
}

#[test]
fn each_level_lands_in_its_own_band() {
    for level in RiskLevel::ALL {
        assert_eq!(level.band().level, level.as_str());
    }
}

#[test]
fn gauge_bands_cover_axis() {
    assert_eq!(band_for(0.0).level, "Good");
    assert_eq!(band_for(19.9).level, "Good");
    assert_eq!(band_for(20.0).level, "Moderate");
    assert_eq!(band_for(79.0).level, "Very Poor");
    assert_eq!(band_for(80.0).level, "Hazardous");
    assert_eq!(band_for(100.0).level, "Hazardous");
    assert_eq!(band_for(150.0).level, "Hazardous");
    assert_eq!(band_for(-3.0).level, "Good");

    let lines = legend();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "0–20% → Good");
    assert_eq!(lines[4], "80–100% → Hazardous");
}

#[test]
fn prediction_serializes_label_as_string() {
    let result = PredictionResult {
        label: RiskLabel::Known(RiskLevel::VeryPoor),
        class_index: 4,
        risk_score: 75,
        color: "#ef4444",
    };
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["label"], "Very Poor");
    assert_eq!(json["risk_score"], 75);
}

#[test]
fn schema_mismatch_reports_first_difference() {
    assert!(schema_mismatch(&FEATURE_NAMES).is_none());
    let short = &FEATURE_NAMES[..17];
    assert!(schema_mismatch(short)
        .unwrap()
        .contains("fitted on 17 features"));
}

proptest! {
    #[test]
    fn derivation_is_idempotent(
        pm25 in 0.0f64..=500.0,
        pm10 in 0.0f64..=600.0,
        no2 in 0.0f64..=300.0,
        ozone in 0.0f64..=300.0,
        co in 0.0f64..=10.0,
        temperature in -10.0f64..=50.0,
        humidity in 0.0f64..=100.0,
    ) {
        let inputs = RawInputs { pm25, pm10, no2, ozone, co, temperature, humidity };
        let clock = thursday_morning();
        let a = DerivedFeatures::derive(&inputs, &clock);
        let b = DerivedFeatures::derive(&inputs, &clock);
        prop_assert_eq!(a.values.len(), FEATURE_COUNT);
        for (x, y) in a.values.iter().zip(b.values.iter()) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
        prop_assert!(a.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn derived_ratios_match_definitions(
        no2 in 0.0f64..=300.0,
        co in 0.0f64..=10.0,
        temperature in -10.0f64..=50.0,
        humidity in 0.0f64..=100.0,
    ) {
        let inputs = RawInputs { no2, co, temperature, humidity, ..RawInputs::default() };
        let f = DerivedFeatures::derive(&inputs, &thursday_morning());
        let nox = 2.0 * no2;
        prop_assert_eq!(f.get("NOx(GT)"), Some(nox));
        prop_assert!((f.get("SO2(GT)").unwrap() - 0.3 * no2).abs() < 1e-9);
        prop_assert!((f.get("CO_NOx_Ratio").unwrap() - co / (nox + 1.0)).abs() < 1e-12);
        prop_assert!((f.get("NOx_NO2_Ratio").unwrap() - nox / (no2 + 1.0)).abs() < 1e-12);
        prop_assert!(
            (f.get("Temp_Humidity_Index").unwrap() - temperature * (1.0 + humidity / 100.0)).abs()
                < 1e-9
        );
    }
}
