//! Parsing and validation of user-entered chain parameters.
//!
//! Values arrive as free text (command-line flags, a config file or a saved
//! session). Each field is read like a numeric text field: leading
//! whitespace is skipped and the longest leading number is taken, so
//! `"12kg"` reads as `12`. Such truncations are accepted but reported so
//! the user can be told which characters were ignored.

use std::fmt;
use std::sync::LazyLock;

use normal_modes::PhysicalParameters;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Inclusive range every parameter must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterWindow {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
}

impl Default for ParameterWindow {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 100.0,
        }
    }
}

impl ParameterWindow {
    /// Whether `value` is a usable parameter inside the window.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value != 0.0 && value >= self.min && value <= self.max
    }
}

impl fmt::Display for ParameterWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A number read from the start of a text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedField {
    /// The number.
    pub value: f64,
    /// Whether characters after the number were ignored.
    pub truncated: bool,
}

/// Reads the leading number of `input`.
///
/// Returns `None` when the text does not start with a number.
///
/// # Examples
///
/// ```rust
/// use twomass::input::parse_field;
///
/// assert_eq!(parse_field(" 42 ").unwrap().value, 42.0);
/// let parsed = parse_field("12abc").unwrap();
/// assert_eq!(parsed.value, 12.0);
/// assert!(parsed.truncated);
/// assert!(parse_field("abc").is_none());
/// ```
#[must_use]
pub fn parse_field(input: &str) -> Option<ParsedField> {
    let matched = NUMERIC_PREFIX.find(input)?;
    let value = matched.as_str().trim_start().parse::<f64>().ok()?;
    let truncated = !input[matched.end()..].trim_end().is_empty();
    Some(ParsedField { value, truncated })
}

/// Rejected parameter input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The field is not a number or falls outside the window.
    #[error(
        "All parameters must be numbers between {} and {}. ({name} = {input:?})",
        window.min,
        window.max
    )]
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Text as entered.
        input: String,
        /// Window that was applied.
        window: ParameterWindow,
    },
}

/// The five fields exactly as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParameters {
    /// Left wall spring.
    pub k1: String,
    /// Coupling spring.
    pub k2: String,
    /// Right wall spring.
    pub k3: String,
    /// Left mass.
    pub m1: String,
    /// Right mass.
    pub m2: String,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            k1: "10".into(),
            k2: "10".into(),
            k3: "10".into(),
            m1: "1".into(),
            m2: "1".into(),
        }
    }
}

impl RawParameters {
    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("k1", &self.k1),
            ("k2", &self.k2),
            ("k3", &self.k3),
            ("m1", &self.m1),
            ("m2", &self.m2),
        ]
    }
}

/// Field whose trailing text was ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationWarning {
    /// Field name.
    pub name: &'static str,
    /// Text as entered.
    pub input: String,
    /// Number that was used.
    pub value: f64,
}

impl fmt::Display for TruncationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {:?}: numeric values are assumed to be the numbers preceding the first \
             non-numeric character (using {})",
            self.name, self.input, self.value
        )
    }
}

/// Parameters that passed validation, with any truncation warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    /// Parameters ready for the solver.
    pub params: PhysicalParameters,
    /// Fields where trailing characters were ignored.
    pub warnings: Vec<TruncationWarning>,
}

/// Parses all five fields and applies the window.
///
/// # Errors
///
/// [`InputError::OutOfRange`] for the first field that is not a number,
/// is zero, or falls outside `window`.
pub fn validate(
    raw: &RawParameters,
    window: ParameterWindow,
) -> Result<ValidatedInput, InputError> {
    let mut values = [0.0; 5];
    let mut warnings = Vec::new();

    for (slot, (name, input)) in values.iter_mut().zip(raw.fields()) {
        let parsed = parse_field(input)
            .filter(|parsed| window.contains(parsed.value))
            .ok_or_else(|| InputError::OutOfRange {
                name,
                input: input.to_string(),
                window,
            })?;

        if parsed.truncated {
            warnings.push(TruncationWarning {
                name,
                input: input.to_string(),
                value: parsed.value,
            });
        }
        *slot = parsed.value;
    }

    let [k1, k2, k3, m1, m2] = values;
    Ok(ValidatedInput {
        params: PhysicalParameters::new(k1, k2, k3, m1, m2),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(k1: &str, k2: &str, k3: &str, m1: &str, m2: &str) -> RawParameters {
        RawParameters {
            k1: k1.into(),
            k2: k2.into(),
            k3: k3.into(),
            m1: m1.into(),
            m2: m2.into(),
        }
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_field("42").unwrap().value, 42.0);
        assert_eq!(parse_field("  3.5").unwrap().value, 3.5);
        assert_eq!(parse_field(".5").unwrap().value, 0.5);
        assert_eq!(parse_field("1e2").unwrap().value, 100.0);
        assert_eq!(parse_field("-7").unwrap().value, -7.0);
        assert!(!parse_field("42 ").unwrap().truncated);
    }

    #[test]
    fn test_parse_truncates_trailing_text() {
        let parsed = parse_field("12abc").unwrap();
        assert_eq!(parsed.value, 12.0);
        assert!(parsed.truncated);

        let parsed = parse_field("7.25 N/m").unwrap();
        assert_eq!(parsed.value, 7.25);
        assert!(parsed.truncated);

        // An exponent marker without digits is not part of the number.
        let parsed = parse_field("3e").unwrap();
        assert_eq!(parsed.value, 3.0);
        assert!(parsed.truncated);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(parse_field("").is_none());
        assert!(parse_field("abc").is_none());
        assert!(parse_field(".").is_none());
        assert!(parse_field("x12").is_none());
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let window = ParameterWindow::default();
        assert!(window.contains(1.0));
        assert!(window.contains(100.0));
        assert!(!window.contains(0.999));
        assert!(!window.contains(100.5));
        assert!(!window.contains(f64::NAN));
    }

    #[test]
    fn test_zero_rejected_even_in_wide_window() {
        let window = ParameterWindow {
            min: -10.0,
            max: 10.0,
        };
        assert!(!window.contains(0.0));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let input = validate(&RawParameters::default(), ParameterWindow::default()).unwrap();
        assert_eq!(
            input.params,
            PhysicalParameters::new(10.0, 10.0, 10.0, 1.0, 1.0)
        );
        assert!(input.warnings.is_empty());
    }

    #[test]
    fn test_validate_reports_truncations() {
        let input = validate(
            &raw("10", "20x", "30", "2kg", "3"),
            ParameterWindow::default(),
        )
        .unwrap();
        assert_eq!(input.params.k2(), 20.0);
        assert_eq!(input.params.m1(), 2.0);
        let names: Vec<_> = input.warnings.iter().map(|w| w.name).collect();
        assert_eq!(names, ["k2", "m1"]);
        assert!(input.warnings[0].to_string().contains("first non-numeric character"));
    }

    #[test]
    fn test_validate_rejects_out_of_window() {
        let err = validate(&raw("10", "10", "101", "1", "1"), ParameterWindow::default())
            .unwrap_err();
        let InputError::OutOfRange { name, input, .. } = &err;
        assert_eq!(*name, "k3");
        assert_eq!(input, "101");
        assert!(err
            .to_string()
            .starts_with("All parameters must be numbers between 1 and 100."));
    }

    #[test]
    fn test_validate_rejects_garbage_and_zero() {
        let window = ParameterWindow::default();
        assert!(validate(&raw("abc", "10", "10", "1", "1"), window).is_err());
        assert!(validate(&raw("10", "0", "10", "1", "1"), window).is_err());
        assert!(validate(&raw("10", "10", "10", "", "1"), window).is_err());
    }
}
