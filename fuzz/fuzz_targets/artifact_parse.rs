#![no_main]

use aqi_risk::{ClassPredictor, ClassifierArtifact, FeatureTransform, LabelEncoder, StandardScaler};
use libfuzzer_sys::fuzz_target;

// Forest artifacts declare a width without carrying per-feature data.
const MAX_PROBE_WIDTH: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Ok(scaler) = StandardScaler::from_json(&text) {
        let _ = scaler.transform(&vec![1.0; scaler.feature_count()]);
    }
    if let Ok(encoder) = LabelEncoder::from_json(&text) {
        let _ = encoder.encode("Good");
    }
    if let Ok(classifier) = ClassifierArtifact::from_json(&text) {
        if classifier.feature_count() <= MAX_PROBE_WIDTH {
            let _ = classifier.predict(&vec![0.0; classifier.feature_count()]);
        }
    }
});
