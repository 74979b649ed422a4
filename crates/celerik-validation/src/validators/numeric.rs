//! Numeric value validators

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Validator for numeric constraints
///
/// Numbers and numeric strings are checked; null is skipped, anything else
/// is rejected as not numeric.
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Exclusive lower bound
    pub greater_than: Option<f64>,
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greater_than(mut self, bound: f64) -> Self {
        self.greater_than = Some(bound);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn get_numeric_value(value: &Value) -> Option<f64> {
        match value {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// First violated constraint, as a message
    fn violation(&self, field: &str, number: f64) -> Option<String> {
        if let Some(bound) = self.greater_than.filter(|bound| number <= *bound) {
            return Some(format!("'{}' must be greater than '{}'", field, bound));
        }
        if let Some(min) = self.min.filter(|min| number < *min) {
            return Some(format!("'{}' must be greater than or equal to '{}'", field, min));
        }
        if let Some(max) = self.max.filter(|max| number > *max) {
            return Some(format!("'{}' must be less than or equal to '{}'", field, max));
        }
        if self.integer_only && number.fract() != 0.0 {
            return Some(format!("'{}' must be an integer", field));
        }
        None
    }
}

#[async_trait]
impl ValidationRule for NumericValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let violation = match Self::get_numeric_value(value) {
            Some(number) => self.violation(field, number),
            None => Some(format!("'{}' must be a number", field)),
        };

        match violation {
            Some(default_message) => {
                let message = self.message.clone().unwrap_or(default_message);
                Err(ValidationError::with_code(field, message, "numeric")
                    .context(value.clone())
                    .into())
            }
            None => Ok(()),
        }
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "greater_than": self.greater_than,
            "min": self.min,
            "max": self.max,
            "integer_only": self.integer_only,
        }))
    }
}
