//! Context levels used to select a strategy
//!
//! Three small enums describe the context of an anonymization request:
//! the [`Granularity`] of the data, the assessed [`SensitivityLevel`] of the
//! attributes and the [`TrustLevel`] of the consumer. All three parse
//! case-insensitively and render lowercase.

use super::errors::VeilError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of data a technique is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// A single value
    Cell,
    /// One attribute across many records
    Column,
    /// One record across many attributes
    Row,
    /// Many records and many attributes
    Table,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::Cell, Self::Column, Self::Row, Self::Table];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Column => "column",
            Self::Row => "row",
            Self::Table => "table",
        }
    }
}

/// Assessed confidentiality of an attribute
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl SensitivityLevel {
    pub const ALL: [SensitivityLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// How far the data consumer is trusted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

macro_rules! impl_level_text {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = VeilError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|level| level.as_str() == normalized)
                    .ok_or_else(|| {
                        VeilError::InvalidInput(format!(concat!("Unknown ", $kind, ": '{}'"), s))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_level_text!(Granularity, "granularity");
impl_level_text!(SensitivityLevel, "sensitivity level");
impl_level_text!(TrustLevel, "trust level");
