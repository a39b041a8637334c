//! Gauge view handed to whatever renders the result.

use serde::Serialize;

use crate::engine::PredictionResult;
use crate::risk::{RiskLabel, RiskLevel};

/// One colored band on the 0-100 gauge axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: u8,
    pub to: u8,
    pub color: &'static str,
    pub level: &'static str,
}

/// Bands in axis order. Each covers `[from, to)`, the last also includes 100.
pub const GAUGE_BANDS: [GaugeBand; 5] = [
    GaugeBand {
        from: 0,
        to: 20,
        color: "#064e3b",
        level: "Good",
    },
    GaugeBand {
        from: 20,
        to: 40,
        color: "#4b5563",
        level: "Moderate",
    },
    GaugeBand {
        from: 40,
        to: 60,
        color: "#78350f",
        level: "Poor",
    },
    GaugeBand {
        from: 60,
        to: 80,
        color: "#7f1d1d",
        level: "Very Poor",
    },
    GaugeBand {
        from: 80,
        to: 100,
        color: "#450a0a",
        level: "Hazardous",
    },
];

/// Band containing `score`; scores outside the axis clamp to the end bands.
pub fn band_for(score: f64) -> &'static GaugeBand {
    GAUGE_BANDS
        .iter()
        .find(|band| score < f64::from(band.to))
        .unwrap_or(&GAUGE_BANDS[GAUGE_BANDS.len() - 1])
}

/// Legend lines, e.g. `0–20% → Good`.
pub fn legend() -> Vec<String> {
    GAUGE_BANDS
        .iter()
        .map(|band| format!("{}–{}% → {}", band.from, band.to, band.level))
        .collect()
}

/// Everything a renderer needs for the headline and the gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub label: RiskLabel,
    /// Uppercased label for the headline.
    pub display_label: String,
    pub color: &'static str,
    pub value: u8,
    pub suffix: &'static str,
    pub axis: [u8; 2],
    pub band: GaugeBand,
    pub bands: [GaugeBand; 5],
}

impl GaugeView {
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        Self {
            label: prediction.label.clone(),
            display_label: prediction.label.display_label(),
            color: prediction.color,
            value: prediction.risk_score,
            suffix: "%",
            axis: [0, 100],
            band: *band_for(f64::from(prediction.risk_score)),
            bands: GAUGE_BANDS,
        }
    }

    /// Whether the label landed in the band named after its own level.
    pub fn band_matches_level(&self) -> bool {
        match &self.label {
            RiskLabel::Known(level) => self.band.level == level.as_str(),
            RiskLabel::Unmapped(_) => false,
        }
    }
}

impl RiskLevel {
    /// The gauge band this level's score falls into.
    pub fn band(self) -> &'static GaugeBand {
        band_for(f64::from(self.risk_score()))
    }
}
