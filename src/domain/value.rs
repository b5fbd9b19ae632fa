//! Cell values
//!
//! A [`Value`] is the content of one table cell: absent, a number or text.
//! Numeric techniques only ever look at [`Value::as_number`], which also
//! accepts text that parses as a number, so data loaded from text files can
//! be treated numerically without a conversion pass.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Content of a single table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or suppressed value
    #[default]
    Null,
    /// Numeric value
    Number(f64),
    /// Free text
    Text(String),
}

impl Value {
    /// Returns true for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric reading of the value
    ///
    /// Numbers are returned as-is, text is trimmed and parsed. Non-finite
    /// results (`inf`, `NaN`) are not considered numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => parse_number(s),
        }
    }

    /// Returns true when [`as_number`](Self::as_number) succeeds
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Textual rendering of a non-null value
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }
}

/// Parses a trimmed string as a finite `f64`
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Renders a number, dropping the fractional part of integral values
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
