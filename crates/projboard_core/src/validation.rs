//! Field constraint checks for form input.
//!
//! # Responsibility
//! - Evaluate required/length/range constraints over primitive values.
//! - Hold the configurable rule set used by the input form.
//!
//! # Invariants
//! - `validate` is pure: no side effects, never panics.
//! - Length bounds only apply to text, numeric bounds only to numbers.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primitive value under validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// One value plus the constraints it must satisfy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validatable {
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Validatable {
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }
}

/// Returns whether every applicable constraint holds.
///
/// Text length is measured in characters after trimming surrounding
/// whitespace. `NaN` never satisfies a numeric bound.
pub fn validate(input: &Validatable) -> bool {
    match &input.value {
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            let length = trimmed.chars().count();
            if input.required && length == 0 {
                return false;
            }
            if input.min_length.is_some_and(|min| length < min) {
                return false;
            }
            if input.max_length.is_some_and(|max| length > max) {
                return false;
            }
            true
        }
        FieldValue::Number(number) => {
            if input.min.is_some_and(|min| number.is_nan() || *number < min) {
                return false;
            }
            if input.max.is_some_and(|max| number.is_nan() || *number > max) {
                return false;
            }
            true
        }
    }
}

/// Constraint set applied by the project input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    /// Minimum description length in characters.
    pub description_min_length: usize,
    /// Smallest accepted headcount.
    pub people_min: u8,
    /// Largest accepted headcount.
    pub people_max: u8,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            description_min_length: 5,
            people_min: 1,
            people_max: 5,
        }
    }
}

impl FormRules {
    /// Validates rule-set invariants before it is handed to a form.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.people_min == 0 {
            return Err(RulesError::ZeroPeopleMin);
        }
        if self.people_min > self.people_max {
            return Err(RulesError::InvertedPeopleRange {
                min: self.people_min,
                max: self.people_max,
            });
        }
        Ok(())
    }
}

/// Invalid configured form rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    ZeroPeopleMin,
    InvertedPeopleRange { min: u8, max: u8 },
}

impl Display for RulesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPeopleMin => write!(f, "people_min must be at least 1"),
            Self::InvertedPeopleRange { min, max } => {
                write!(f, "people_min ({min}) must be <= people_max ({max})")
            }
        }
    }
}

impl Error for RulesError {}
