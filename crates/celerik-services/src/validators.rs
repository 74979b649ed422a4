//! Validator registration

use celerik_core::{CoreResult, ServiceRegistry};
use celerik_validation::{BoxedValidator, Validator};
use std::sync::Arc;

/// Registers payload validators where [`ApiService::validate`] finds them
///
/// [`ApiService::validate`]: crate::service::ApiService::validate
pub trait ValidatorRegistry {
    /// Register `validator` as the validator of payloads of type `T`
    fn register_validator<T, V>(&mut self, validator: V) -> CoreResult<()>
    where
        T: Sync + 'static,
        V: Validator<T> + 'static;

    fn has_validator<T: Sync + 'static>(&self) -> bool;
}

impl ValidatorRegistry for ServiceRegistry {
    fn register_validator<T, V>(&mut self, validator: V) -> CoreResult<()>
    where
        T: Sync + 'static,
        V: Validator<T> + 'static,
    {
        let boxed: BoxedValidator<T> = Arc::new(validator);
        self.register_singleton(boxed)
    }

    fn has_validator<T: Sync + 'static>(&self) -> bool {
        self.contains::<BoxedValidator<T>>()
    }
}
