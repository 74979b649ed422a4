//! # celerik-validation
//!
//! Payload validation for celerik services. A [`Validator`] checks a typed
//! payload; [`Rules`] builds one from per-field rules applied to the
//! payload's serialized form, reporting failures in declaration order.

pub mod error;
pub mod rules;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use rules::Rules;
pub use traits::{BoxedValidator, ValidationRule, Validator};

// Built-in validators
pub use validators::{
    choice::ChoiceValidator, custom::CustomValidator, length::LengthValidator, numeric::NumericValidator,
    required::RequiredValidator,
};
