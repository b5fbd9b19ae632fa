//! Technique names
//!
//! A [`Technique`] is a strategy name from the selection matrix. It is bound
//! to a granularity-specific implementation only at dispatch time, so the
//! same name can mean a column transform or a row transform.

use crate::domain::errors::VeilError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named anonymization technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    FullMasking,
    PartialMasking,
    NoiseInjection,
    CellSuppression,
    DifferentialPrivacyColumn,
    DifferentialPrivacy,
    TopBottomCoding,
    Microaggregation,
    Generalization,
    Binning,
    NoTransformation,
}

impl Technique {
    pub const ALL: [Technique; 11] = [
        Self::FullMasking,
        Self::PartialMasking,
        Self::NoiseInjection,
        Self::CellSuppression,
        Self::DifferentialPrivacyColumn,
        Self::DifferentialPrivacy,
        Self::TopBottomCoding,
        Self::Microaggregation,
        Self::Generalization,
        Self::Binning,
        Self::NoTransformation,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullMasking => "full_masking",
            Self::PartialMasking => "partial_masking",
            Self::NoiseInjection => "noise_injection",
            Self::CellSuppression => "cell_suppression",
            Self::DifferentialPrivacyColumn => "differential_privacy_column",
            Self::DifferentialPrivacy => "differential_privacy",
            Self::TopBottomCoding => "top_bottom_coding",
            Self::Microaggregation => "microaggregation",
            Self::Generalization => "generalization",
            Self::Binning => "binning",
            Self::NoTransformation => "no_transformation",
        }
    }

    /// Case-insensitive lookup; `None` for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }

    /// Techniques with a single-value variant
    pub fn is_scalar_direct(&self) -> bool {
        matches!(
            self,
            Self::FullMasking
                | Self::PartialMasking
                | Self::CellSuppression
                | Self::NoiseInjection
                | Self::Generalization
        )
    }

    /// Techniques that only make sense relative to other rows
    ///
    /// On the scalar path these are replaced by partial masking.
    pub fn requires_cross_row_context(&self) -> bool {
        matches!(
            self,
            Self::TopBottomCoding
                | Self::Microaggregation
                | Self::DifferentialPrivacyColumn
                | Self::Binning
        )
    }
}

impl AsRef<str> for Technique {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technique {
    type Err = VeilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| VeilError::InvalidInput(format!("Unknown technique: '{s}'")))
    }
}
