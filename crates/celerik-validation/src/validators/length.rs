//! String length validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Validates the character count of string values
///
/// Non-string and null values are skipped; combine with
/// [`RequiredValidator`](super::required::RequiredValidator) to reject those.
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub message: Option<String>,
}

impl LengthValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn create_error_message(&self, field: &str, length: usize) -> String {
        if let Some(ref custom_message) = self.message {
            return custom_message.clone();
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(
                "'{}' must be between {} and {} characters. You entered {} characters",
                field, min, max, length
            ),
            (Some(min), None) => format!("'{}' must be at least {} characters", field, min),
            (None, Some(max)) => format!("'{}' must be {} characters or fewer", field, max),
            (None, None) => format!("'{}' has an invalid length", field),
        }
    }
}

#[async_trait]
impl ValidationRule for LengthValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let Value::String(text) = value else {
            return Ok(());
        };

        let length = text.chars().count();
        let too_short = self.min.is_some_and(|min| length < min);
        let too_long = self.max.is_some_and(|max| length > max);

        if too_short || too_long {
            Err(ValidationError::with_code(field, self.create_error_message(field, length), "length").into())
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "min": self.min, "max": self.max }))
    }
}
