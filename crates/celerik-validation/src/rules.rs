//! Per-field rule sets

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::traits::{ValidationRule, Validator};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Ordered validation rules keyed by serialized field name
///
/// Fields are checked in the order they were first declared, and each
/// field's rules in the order they were added, so the first reported error
/// is deterministic.
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: Vec<(String, Vec<Arc<dyn ValidationRule>>)>,
    request_rules: Vec<Arc<dyn ValidationRule>>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("validated_fields", &self.validated_fields())
            .field("request_rules_count", &self.request_rules.len())
            .finish()
    }
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation rule for a specific field
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        let field = field.into();
        let rule: Arc<dyn ValidationRule> = Arc::new(rule);
        match self.field_rules.iter_mut().find(|(name, _)| *name == field) {
            Some((_, rules)) => rules.push(rule),
            None => self.field_rules.push((field, vec![rule])),
        }
        self
    }

    /// Add a rule that receives the whole serialized payload
    pub fn request<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.request_rules.push(Arc::new(rule));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty() && self.request_rules.is_empty()
    }

    /// Field names that have rules, in declaration order
    pub fn validated_fields(&self) -> Vec<&str> {
        self.field_rules.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Validate an already serialized payload
    ///
    /// A field missing from `data` is validated as `null`.
    pub async fn validate_value(&self, data: &Value) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for (field, rules) in &self.field_rules {
            let value = data.get(field).unwrap_or(&Value::Null);
            for rule in rules {
                if let Err(rule_errors) = rule.validate(value, field).await {
                    errors.merge(rule_errors);
                }
            }
        }

        for rule in &self.request_rules {
            if let Err(rule_errors) = rule.validate(data, "request").await {
                errors.merge(rule_errors);
            }
        }

        errors.into_result()
    }
}

#[async_trait]
impl<T> Validator<T> for Rules
where
    T: Serialize + Sync,
{
    async fn validate(&self, payload: &T) -> ValidationResult<()> {
        let data = serde_json::to_value(payload).map_err(|err| {
            ValidationErrors::from(ValidationError::with_code("payload", err.to_string(), "serialization"))
        })?;
        self.validate_value(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{numeric::NumericValidator, required::RequiredValidator};
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct CreateOrder {
        customer_name: String,
        quantity: i64,
    }

    fn order_rules() -> Rules {
        Rules::new()
            .field("customerName", RequiredValidator::new())
            .field("quantity", NumericValidator::new().greater_than(0.0))
            .field("customerName", RequiredValidator::with_message("still required"))
    }

    #[tokio::test]
    async fn test_rules_validate_payload() {
        let rules = order_rules();
        assert_eq!(rules.validated_fields(), vec!["customerName", "quantity"]);

        let valid = CreateOrder {
            customer_name: "Ada".to_string(),
            quantity: 2,
        };
        assert!(rules.validate(&valid).await.is_ok());
    }

    #[tokio::test]
    async fn test_errors_follow_declaration_order() {
        let invalid = CreateOrder {
            customer_name: " ".to_string(),
            quantity: 0,
        };

        let errors = order_rules().validate(&invalid).await.unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["customerName", "customerName", "quantity"]);
        assert_eq!(errors.first().map(|e| e.code.as_str()), Some("required"));
    }

    #[tokio::test]
    async fn test_missing_field_is_null() {
        let rules = Rules::new().field("sortKey", RequiredValidator::new());
        let errors = rules.validate_value(&json!({})).await.unwrap_err();
        assert!(errors.has_field_errors("sortKey"));
    }
}
