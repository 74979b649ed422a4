//! Idempotent registration of the cross-cutting services
//!
//! [`ApiBuilder`] runs each [`SetupStep`] at most once against a
//! [`ServiceRegistry`](crate::container::ServiceRegistry). Steps that only
//! make sense for the entity framework backend consult the `ServiceType`
//! configuration value and quietly skip otherwise.

pub mod api_builder;
pub mod ledger;
pub mod options;

pub use api_builder::{add_core_services, ApiBuilder};
pub use ledger::{RegistrationLedger, SetupStep};
pub use options::{
    ApiBehaviorOptions, ApiConfig, ClaimsIdentityOptions, IdentityOptions, LockoutOptions, PasswordOptions,
    SignInOptions, StoreOptions, TokenOptions, UserOptions,
};
