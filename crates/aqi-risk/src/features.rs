use serde::Serialize;

use crate::clock::{day_of_week, hour_of_day, Clock};
use crate::inputs::RawInputs;
use crate::schema::{feature_index, FEATURE_COUNT, FEATURE_NAMES};

/// Wind speed the model was trained against; not user-supplied.
pub const WIND_SPEED: f64 = 2.0;
/// Wind direction in degrees; not user-supplied.
pub const WIND_DIRECTION: f64 = 90.0;
/// Sea-level pressure in hPa; not user-supplied.
pub const PRESSURE: f64 = 1013.0;

/// Feature vector for one prediction, in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    pub values: [f64; FEATURE_COUNT],
}

/// One named entry of a feature vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValue {
    pub name: &'static str,
    pub value: f64,
}

impl DerivedFeatures {
    /// Expand raw readings into the model's feature vector.
    ///
    /// Pure arithmetic: out-of-range inputs are neither clamped nor rejected.
    /// The `+ 1` in both ratio denominators keeps them finite when NO2 is 0.
    pub fn derive(inputs: &RawInputs, clock: &(impl Clock + ?Sized)) -> Self {
        let now = clock.local_now();

        let nox = inputs.no2 * 2.0;
        let so2 = inputs.no2 * 0.3;
        let temp_humidity_index =
            inputs.temperature + (inputs.humidity / 100.0) * inputs.temperature;
        let co_nox_ratio = inputs.co / (nox + 1.0);
        let nox_no2_ratio = nox / (inputs.no2 + 1.0);
        let air_quality_index = inputs.pm25 + inputs.pm10 + inputs.no2 + inputs.ozone;

        let values = [
            inputs.co,
            nox,
            inputs.no2,
            inputs.ozone,
            so2,
            inputs.pm25,
            inputs.pm10,
            inputs.temperature,
            inputs.humidity,
            PRESSURE,
            WIND_SPEED,
            WIND_DIRECTION,
            co_nox_ratio,
            nox_no2_ratio,
            temp_humidity_index,
            air_quality_index,
            f64::from(day_of_week(&now)),
            f64::from(hour_of_day(&now)),
        ];

        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value of a feature by schema name.
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    /// Name/value pairs in vector order.
    pub fn named(&self) -> Vec<FeatureValue> {
        FEATURE_NAMES
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| FeatureValue {
                name: *name,
                value: *value,
            })
            .collect()
    }
}
