use serde::{Deserialize, Serialize};

/// The seven user-supplied readings for one prediction.
///
/// Fields missing from a JSON body take the input surface defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    /// PM2.5 concentration.
    #[serde(alias = "PM2.5")]
    pub pm25: f64,
    /// PM10 concentration.
    #[serde(alias = "PM10")]
    pub pm10: f64,
    /// Nitrogen dioxide.
    #[serde(alias = "NO2")]
    pub no2: f64,
    /// Ozone (O3).
    #[serde(alias = "o3", alias = "O3")]
    pub ozone: f64,
    /// Carbon monoxide.
    #[serde(alias = "CO")]
    pub co: f64,
    /// Degrees Celsius.
    #[serde(alias = "temp")]
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

/// Range, default and granularity of one input control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Integer-valued control (slider steps of 1).
    pub integral: bool,
}

impl InputRange {
    /// Snap a value onto the control: round integral inputs, then clamp.
    pub fn clamp(&self, value: f64) -> f64 {
        let value = if self.integral { value.round() } else { value };
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Input controls in [`RawInputs`] field order.
pub const INPUT_RANGES: [InputRange; 7] = [
    InputRange {
        name: "pm25",
        label: "PM2.5",
        min: 0.0,
        max: 500.0,
        default: 124.0,
        integral: true,
    },
    InputRange {
        name: "pm10",
        label: "PM10",
        min: 0.0,
        max: 600.0,
        default: 210.0,
        integral: true,
    },
    InputRange {
        name: "no2",
        label: "NO₂",
        min: 0.0,
        max: 300.0,
        default: 75.0,
        integral: true,
    },
    InputRange {
        name: "ozone",
        label: "Ozone",
        min: 0.0,
        max: 300.0,
        default: 100.0,
        integral: true,
    },
    InputRange {
        name: "co",
        label: "CO",
        min: 0.0,
        max: 10.0,
        default: 3.6,
        integral: false,
    },
    InputRange {
        name: "temperature",
        label: "Temperature (°C)",
        min: -10.0,
        max: 50.0,
        default: 32.0,
        integral: true,
    },
    InputRange {
        name: "humidity",
        label: "Humidity (%)",
        min: 0.0,
        max: 100.0,
        default: 70.0,
        integral: true,
    },
];

impl RawInputs {
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.pm25,
            self.pm10,
            self.no2,
            self.ozone,
            self.co,
            self.temperature,
            self.humidity,
        ]
    }

    pub fn from_array(values: [f64; 7]) -> Self {
        let [pm25, pm10, no2, ozone, co, temperature, humidity] = values;
        Self {
            pm25,
            pm10,
            no2,
            ozone,
            co,
            temperature,
            humidity,
        }
    }

    /// Apply the input controls' clamping and rounding.
    ///
    /// Feature derivation never clamps; this is for surfaces that accept
    /// free-form numbers but want slider semantics.
    pub fn clamped(&self) -> Self {
        let mut values = self.to_array();
        for (value, range) in values.iter_mut().zip(INPUT_RANGES.iter()) {
            *value = range.clamp(*value);
        }
        Self::from_array(values)
    }

    /// Names of inputs that fall outside their control range.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        self.to_array()
            .iter()
            .zip(INPUT_RANGES.iter())
            .filter(|(value, range)| !range.contains(**value))
            .map(|(_, range)| range.name)
            .collect()
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        Self::from_array(INPUT_RANGES.map(|range| range.default))
    }
}
