#![no_main]

use aqi_risk::{
    ClassifierArtifact, DerivedFeatures, FixedClock, LabelEncoder, LoadedEngine, RawInputs,
    RiskEngine, StandardScaler, FEATURE_COUNT, FEATURE_NAMES,
};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static ENGINE: Lazy<Option<LoadedEngine>> = Lazy::new(|| {
    let scaler = StandardScaler::from_json(
        &serde_json::json!({
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
            "feature_names": FEATURE_NAMES,
        })
        .to_string(),
    )
    .ok()?;
    let mut coefficients = vec![vec![0.0; FEATURE_COUNT]; 5];
    for (row, weights) in coefficients.iter_mut().enumerate() {
        weights[15] = row as f64 * 0.01;
        weights[12] = 1.0 - row as f64 * 0.2;
    }
    let classifier = ClassifierArtifact::from_json(
        &serde_json::json!({
            "kind": "linear",
            "feature_count": FEATURE_COUNT,
            "coefficients": coefficients,
            "intercepts": [0.0, -1.0, -2.0, -3.0, -4.0],
        })
        .to_string(),
    )
    .ok()?;
    let encoder = LabelEncoder::from_json(
        r#"{"classes": ["Good", "Hazardous", "Moderate", "Poor", "Very Poor"]}"#,
    )
    .ok()?;
    Some(RiskEngine::new(scaler, classifier, encoder))
});

fn reading(data: &[u8], slot: usize) -> f64 {
    let mut buf = [0u8; 8];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = data.get(slot * 8 + i).copied().unwrap_or_default();
    }
    f64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    let mut values = [0.0; 7];
    for (slot, value) in values.iter_mut().enumerate() {
        *value = reading(data, slot);
    }
    let inputs = RawInputs::from_array(values);

    let day = data.get(56).copied().unwrap_or_default() as u32 % 28 + 1;
    let hour = data.get(57).copied().unwrap_or_default() as u32 % 24;
    let Some(now) = NaiveDate::from_ymd_opt(2024, 2, day).and_then(|d| d.and_hms_opt(hour, 0, 0))
    else {
        return;
    };
    let clock = FixedClock(now);

    let features = DerivedFeatures::derive(&inputs, &clock);
    assert_eq!(features.as_slice().len(), FEATURE_COUNT);
    let clamped = inputs.clamped();
    assert!(clamped.out_of_range().is_empty() || values.iter().any(|v| v.is_nan()));

    if let Some(engine) = ENGINE.as_ref() {
        let _ = engine.predict(&features);
        let _ = engine.assess(&clamped, &clock);
    }
});
