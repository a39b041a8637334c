use std::fmt;

use serde::{Serialize, Serializer};

/// Display color for labels outside the known risk levels.
pub const UNMAPPED_COLOR: &str = "white";
/// Gauge score for labels outside the known risk levels.
pub const UNMAPPED_SCORE: u8 = 0;

/// Health-risk categories the label encoder is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Hazardous,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        Self::Good,
        Self::Moderate,
        Self::Poor,
        Self::VeryPoor,
        Self::Hazardous,
    ];

    /// Label string as emitted by the label encoder.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Exact, case-sensitive match on the encoder label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == label)
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#22c55e",
            Self::Moderate => "#eab308",
            Self::Poor => "#fb923c",
            Self::VeryPoor => "#ef4444",
            Self::Hazardous => "#7f1d1d",
        }
    }

    /// Gauge position in [0, 100].
    pub fn risk_score(self) -> u8 {
        match self {
            Self::Good => 10,
            Self::Moderate => 30,
            Self::Poor => 50,
            Self::VeryPoor => 75,
            Self::Hazardous => 95,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded label. Labels the display tables don't know are kept verbatim
/// and rendered with the neutral fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    Known(RiskLevel),
    Unmapped(String),
}

impl RiskLabel {
    pub fn from_decoded(label: String) -> Self {
        match RiskLevel::from_label(&label) {
            Some(level) => Self::Known(level),
            None => Self::Unmapped(label),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(level) => level.as_str(),
            Self::Unmapped(label) => label,
        }
    }

    pub fn level(&self) -> Option<RiskLevel> {
        match self {
            Self::Known(level) => Some(*level),
            Self::Unmapped(_) => None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn color(&self) -> &'static str {
        self.level().map_or(UNMAPPED_COLOR, RiskLevel::color)
    }

    pub fn risk_score(&self) -> u8 {
        self.level().map_or(UNMAPPED_SCORE, RiskLevel::risk_score)
    }

    /// Uppercased headline text.
    pub fn display_label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RiskLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Color for any label string; unknown labels get [`UNMAPPED_COLOR`].
pub fn label_color(label: &str) -> &'static str {
    RiskLevel::from_label(label).map_or(UNMAPPED_COLOR, RiskLevel::color)
}

/// Gauge score for any label string; unknown labels get [`UNMAPPED_SCORE`].
pub fn label_risk_score(label: &str) -> u8 {
    RiskLevel::from_label(label).map_or(UNMAPPED_SCORE, RiskLevel::risk_score)
}
