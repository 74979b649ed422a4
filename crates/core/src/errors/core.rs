use thiserror::Error;

/// Result alias used across the registration and runtime surface
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type for the celerik service scaffolding
///
/// Every variant is fatal during process startup: the builder propagates it
/// straight to the caller and nothing is retried.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("This method was already called: '{step}'")]
    DuplicateStep { step: String },

    #[error("Missing configuration value for key '{key}'")]
    MissingConfig { key: String },

    #[error("Invalid configuration value for key '{key}': '{value}'")]
    InvalidConfig { key: String, value: String },

    #[error("Argument '{name}' can not be null")]
    Argument { name: String },

    #[error("Service not found: {service_type}")]
    ServiceNotFound { service_type: String },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },

    #[error("No mapping configured from '{source_type}' to '{destination_type}'")]
    Mapping {
        source_type: String,
        destination_type: String,
    },

    #[error("Invalid resource file '{path}': {message}")]
    Localization { path: String, message: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a duplicate step error
    pub fn duplicate_step(step: impl Into<String>) -> Self {
        Self::DuplicateStep { step: step.into() }
    }

    /// Create a missing configuration error
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a missing argument error
    pub fn argument(name: impl Into<String>) -> Self {
        Self::Argument { name: name.into() }
    }

    /// Create a new service not found error
    pub fn service_not_found(service_type: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            service_type: service_type.into(),
        }
    }

    pub fn lock_error(resource: impl Into<String>) -> Self {
        Self::LockError {
            resource: resource.into(),
        }
    }

    pub fn mapping<S: ?Sized, D: ?Sized>() -> Self {
        Self::Mapping {
            source_type: std::any::type_name::<S>().to_string(),
            destination_type: std::any::type_name::<D>().to_string(),
        }
    }

    pub fn localization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Localization {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Check if the error is a repeated setup step
    pub fn is_duplicate_step(&self) -> bool {
        matches!(self, Self::DuplicateStep { .. })
    }

    /// Check if the error comes from a missing or invalid configuration value
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingConfig { .. } | Self::InvalidConfig { .. })
    }

    /// Check if the error is a missing argument
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::ServiceNotFound { .. })
    }
}
