//! Strategy selection matrix
//!
//! Maps (granularity, sensitivity, trust) to an ordered list of candidate
//! techniques. Earlier entries are preferred; the engine commits the first
//! one that succeeds.

use super::technique::Technique::{self, *};
use crate::domain::{Granularity, SensitivityLevel, TrustLevel};

/// Ordered candidate techniques for a context
pub fn strategies(
    granularity: Granularity,
    sensitivity: SensitivityLevel,
    trust: TrustLevel,
) -> &'static [Technique] {
    use Granularity as G;
    use SensitivityLevel as S;
    use TrustLevel as T;

    match (granularity, sensitivity, trust) {
        (G::Cell, S::High, T::Low) => &[CellSuppression, DifferentialPrivacyColumn, FullMasking],
        (G::Cell, S::High, T::Moderate) => &[TopBottomCoding, Microaggregation, PartialMasking],
        (G::Cell, S::High, T::High) => &[NoiseInjection],
        (G::Cell, S::Moderate, T::Low) => &[Microaggregation],
        (G::Cell, S::Moderate, T::Moderate) => &[Generalization, PartialMasking],
        (G::Cell, S::Moderate, T::High) => &[NoTransformation],
        (G::Cell, S::Low, T::Low) => &[NoiseInjection],
        (G::Cell, S::Low, _) => &[NoTransformation],

        (G::Column, S::High, T::Low) => &[Generalization, TopBottomCoding, FullMasking],
        (G::Column, S::High, T::Moderate) => &[CellSuppression, PartialMasking],
        (G::Column, S::High, T::High) => &[NoiseInjection],
        (G::Column, S::Moderate, T::Low) => &[Binning],
        (G::Column, S::Moderate, T::Moderate) => &[Binning, PartialMasking],
        (G::Column, S::Moderate, T::High) => &[NoTransformation],
        (G::Column, S::Low, T::Low) => &[Generalization],
        (G::Column, S::Low, _) => &[NoTransformation],

        (G::Row, S::High, T::Low) => &[FullMasking],
        (G::Row, S::High, T::Moderate) => &[Microaggregation, PartialMasking],
        (G::Row, S::High, T::High) => &[Microaggregation],
        (G::Row, S::Moderate, T::Low) => &[Generalization],
        (G::Row, S::Moderate, T::Moderate) => &[Microaggregation, PartialMasking],
        (G::Row, S::Moderate, T::High) => &[NoTransformation],
        (G::Row, S::Low, T::Low) => &[Microaggregation],
        (G::Row, S::Low, _) => &[NoTransformation],

        (G::Table, S::High, T::Low) => &[CellSuppression, DifferentialPrivacy, FullMasking],
        (G::Table, S::High, T::Moderate) => &[Microaggregation, PartialMasking],
        (G::Table, S::High, T::High) => &[Microaggregation],
        (G::Table, S::Moderate, T::Low) => &[Generalization],
        (G::Table, S::Moderate, T::Moderate) => &[Microaggregation, PartialMasking],
        (G::Table, S::Moderate, T::High) => &[NoTransformation],
        (G::Table, S::Low, T::Low) => &[Generalization],
        (G::Table, S::Low, _) => &[NoTransformation],
    }
}

/// String entry point to [`strategies`]
///
/// Keys are parsed case-insensitively. Any unknown key yields an empty list.
pub fn strategies_for(granularity: &str, sensitivity: &str, trust: &str) -> Vec<Technique> {
    match (
        granularity.parse::<Granularity>(),
        sensitivity.parse::<SensitivityLevel>(),
        trust.parse::<TrustLevel>(),
    ) {
        (Ok(g), Ok(s), Ok(t)) => strategies(g, s, t).to_vec(),
        _ => {
            tracing::debug!(granularity, sensitivity, trust, "No strategies for unknown context");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_candidates() {
        for g in Granularity::ALL {
            for s in SensitivityLevel::ALL {
                for t in TrustLevel::ALL {
                    assert!(!strategies(g, s, t).is_empty(), "{g}/{s}/{t}");
                }
            }
        }
    }

    #[test]
    fn test_cell_moderate_moderate() {
        assert_eq!(
            strategies_for("cell", "moderate", "moderate"),
            vec![Technique::Generalization, Technique::PartialMasking]
        );
    }

    #[test]
    fn test_string_entry_point_is_case_insensitive() {
        assert_eq!(
            strategies_for("TABLE", "High", "low"),
            vec![
                Technique::CellSuppression,
                Technique::DifferentialPrivacy,
                Technique::FullMasking
            ]
        );
    }

    #[test]
    fn test_unknown_keys_yield_empty() {
        assert!(strategies_for("dataset", "high", "low").is_empty());
        assert!(strategies_for("cell", "extreme", "low").is_empty());
        assert!(strategies_for("cell", "high", "none").is_empty());
    }
}
