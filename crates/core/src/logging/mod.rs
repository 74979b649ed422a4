//! Logging setup driven by the `Logging` configuration section
//!
//! `Logging:Provider` selects the output layers; `Logging:LogLevel:*`
//! feeds the event filter. The resulting dispatch is owned by a
//! [`LoggerFactory`] which hands out category loggers.

pub mod factory;
pub mod provider;

pub use factory::{ConsoleLoggerOptions, Logger, LoggerFactory};
pub use provider::LogProvider;
