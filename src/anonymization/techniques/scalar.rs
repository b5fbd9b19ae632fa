//! Single-value techniques
//!
//! Variants used when only one value is available and no other rows can be
//! consulted.

use super::TechniqueResult;
use crate::domain::value::{format_number, parse_number};
use crate::domain::TechniqueError;
use rand::Rng;

/// Replacement produced by scalar suppression
pub const SUPPRESSION_TOKEN: &str = "SUPPRESSED";

/// `*` repeated to the character length of the value
pub fn full_mask_value(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Mask the first half of the value, at least one character
pub fn partial_mask_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= 1 {
        return "*".to_string();
    }
    let masked = (len / 2).max(1);
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < masked { '*' } else { c })
        .collect()
}

/// Replace the value with [`SUPPRESSION_TOKEN`]
pub fn suppress_value(_value: &str) -> String {
    SUPPRESSION_TOKEN.to_string()
}

/// Scale a numeric value by `1 + u`, `u` uniform in `[-ratio, ratio)`
///
/// # Errors
///
/// Returns [`TechniqueError::NonNumeric`] when the value does not parse.
pub fn noise_value<R: Rng + ?Sized>(value: &str, ratio: f64, rng: &mut R) -> TechniqueResult<String> {
    let number =
        parse_number(value).ok_or_else(|| TechniqueError::NonNumeric(value.to_string()))?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(TechniqueError::invalid(
            "cell_noise_ratio",
            format!("must be within [0, 1], got {ratio}"),
        ));
    }

    let u = if ratio > 0.0 {
        rng.gen_range(-ratio..ratio)
    } else {
        0.0
    };
    Ok(format_number(number * (1.0 + u)))
}

/// Coarsen a value
///
/// Numbers are rounded half-up to the nearest multiple of 10; text becomes
/// `CAT_` followed by its first character uppercased.
pub fn generalize_value(value: &str) -> String {
    if let Some(number) = parse_number(value) {
        let rounded = (number / 10.0 + 0.5).floor() * 10.0;
        return format_number(rounded);
    }
    match value.trim().chars().next() {
        Some(first) => format!("CAT_{}", first.to_uppercase()),
        None => "CAT_EMPTY".to_string(),
    }
}
