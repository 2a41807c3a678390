//! Probability checks shared by every credence-bearing field

use std::fmt;

/// A numeric field as it was stored
///
/// Non-numeric text is kept verbatim so findings can quote the bad value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Numeric {
    /// Null or absent
    #[default]
    Null,
    /// Integer or real value
    Number(f64),
    /// Text that is not a number
    Text(String),
}

impl Numeric {
    /// The value as a float; `None` for null or text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(v) => Some(*v),
            Numeric::Null | Numeric::Text(_) => None,
        }
    }

    /// Whether the field is null
    pub fn is_null(&self) -> bool {
        matches!(self, Numeric::Null)
    }

    /// Whether the field holds a valid probability
    pub fn is_probability(&self) -> bool {
        is_probability(self.as_f64())
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<Option<f64>> for Numeric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Numeric::Null, Numeric::Number)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Text(raw) => f.write_str(raw),
            other => f.write_str(&display_value(other.as_f64())),
        }
    }
}

/// Check whether a value is a valid probability in [0.0, 1.0]
///
/// `None` (null or non-numeric in the store) and NaN fail. Values are never
/// clamped: an out-of-range credence is reported, not fixed.
///
/// # Examples
///
/// ```
/// use realitycheck_domain::is_probability;
///
/// assert!(is_probability(Some(0.0)));
/// assert!(is_probability(Some(1.0)));
/// assert!(!is_probability(Some(1.5)));
/// assert!(!is_probability(None));
/// ```
pub fn is_probability(value: Option<f64>) -> bool {
    match value {
        Some(v) => (0.0..=1.0).contains(&v),
        None => false,
    }
}

/// Render an optional numeric field the way findings quote it
pub fn display_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "None".to_string(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every value in the unit interval is a probability
        #[test]
        fn test_unit_interval_accepted(v in 0.0f64..=1.0) {
            prop_assert!(is_probability(Some(v)));
        }

        /// Property: anything above one is rejected
        #[test]
        fn test_above_one_rejected(v in 1.0f64..1e12) {
            prop_assume!(v > 1.0);
            prop_assert!(!is_probability(Some(v)));
        }

        /// Property: the quoted value parses back to the original
        #[test]
        fn test_display_value_parses_back(v in proptest::num::f64::NORMAL) {
            prop_assert_eq!(display_value(Some(v)).parse::<f64>().unwrap(), v);
        }
    }
}
