use celerik_core::CoreError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by the service base types
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote service answered with a status other than 200 or 400
    #[error("Error calling '{url}'. Status code: {status}. Response: {body}")]
    Http { url: String, status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid service address: {0}")]
    Url(#[from] url::ParseError),

    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ServiceError {
    pub fn http(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Status code of an HTTP error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let error = ServiceError::http("http://localhost/orders/get", 503, "down");
        assert!(error.is_http());
        assert_eq!(error.status(), Some(503));
        assert_eq!(
            error.to_string(),
            "Error calling 'http://localhost/orders/get'. Status code: 503. Response: down"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let error = ServiceError::from(CoreError::service_not_found("Mapper"));
        assert_eq!(error.to_string(), "Service not found: Mapper");
        assert_eq!(error.status(), None);
    }
}
