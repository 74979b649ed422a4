//! Membership validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Accepts only values from a fixed list
///
/// Null is skipped, as is a blank string when
/// [`skip_blank`](ChoiceValidator::skip_blank) is set. Comparison ignores
/// ASCII case unless [`case_sensitive`](ChoiceValidator::case_sensitive)
/// is set.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    pub choices: Vec<String>,
    pub case_sensitive: bool,
    pub skip_blank: bool,
    pub message: Option<String>,
}

impl ChoiceValidator {
    pub fn one_of<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            case_sensitive: false,
            skip_blank: false,
            message: None,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Treat an empty or whitespace-only string like null
    pub fn skip_blank(mut self, skip_blank: bool) -> Self {
        self.skip_blank = skip_blank;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn matches(&self, candidate: &str) -> bool {
        self.choices.iter().any(|choice| {
            if self.case_sensitive {
                choice == candidate
            } else {
                choice.eq_ignore_ascii_case(candidate)
            }
        })
    }
}

#[async_trait]
impl ValidationRule for ChoiceValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let candidate = match value {
            Value::Null => return Ok(()),
            Value::String(text) if self.skip_blank && text.trim().is_empty() => return Ok(()),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        if self.matches(&candidate) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("'{}' must be one of: {}", field, self.choices.join(", ")));
        Err(ValidationError::with_code(field, message, "choice").into())
    }

    fn rule_name(&self) -> &'static str {
        "choice"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "choices": self.choices, "case_sensitive": self.case_sensitive }))
    }
}
