//! Feature schema shared by the deriver and the fitted artifacts.
//!
//! Position in [`FEATURE_NAMES`] is the contract: the scaler and classifier
//! were fitted on columns in exactly this order, and a reordered vector
//! produces wrong predictions without any numeric error.

/// Number of features in the model's input vector.
pub const FEATURE_COUNT: usize = 18;

/// Column names the artifacts were fitted on, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "CO(GT)",
    "NOx(GT)",
    "NO2(GT)",
    "O3(GT)",
    "SO2(GT)",
    "PM2.5",
    "PM10",
    "Temperature",
    "Humidity",
    "Pressure",
    "WindSpeed",
    "WindDirection",
    // Engineered ratios and indices
    "CO_NOx_Ratio",
    "NOx_NO2_Ratio",
    "Temp_Humidity_Index",
    "AirQualityIndex",
    // Calendar features from the local clock
    "DayOfWeek",
    "Hour",
];

/// Position of `name` in the schema.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|n| *n == name)
}

/// Compare fitted column names against the schema.
///
/// Returns a description of the first disagreement, or `None` when the names
/// match the schema exactly and in order.
pub fn schema_mismatch<S: AsRef<str>>(fitted: &[S]) -> Option<String> {
    if fitted.len() != FEATURE_COUNT {
        return Some(format!(
            "fitted on {} features, schema has {FEATURE_COUNT}",
            fitted.len()
        ));
    }
    FEATURE_NAMES
        .iter()
        .zip(fitted)
        .enumerate()
        .find(|(_, (expected, got))| **expected != got.as_ref())
        .map(|(i, (expected, got))| {
            format!(
                "feature {i} is '{}', schema expects '{expected}'",
                got.as_ref()
            )
        })
}
