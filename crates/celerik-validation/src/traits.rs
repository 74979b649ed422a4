//! Core validation traits

use crate::error::ValidationResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A check applied to one serialized field value
#[async_trait]
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Validates a whole payload of type `T`
#[async_trait]
pub trait Validator<T: ?Sized + Sync>: Send + Sync {
    async fn validate(&self, payload: &T) -> ValidationResult<()>;
}

/// Shared, type-erased validator as stored in a service registry
pub type BoxedValidator<T> = Arc<dyn Validator<T>>;
