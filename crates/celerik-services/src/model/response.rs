use crate::model::enums::{ApiMessageType, ApiStatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A failed operation, convertible into a failed [`ApiResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError<S = ApiStatusCode> {
    pub message: String,
    pub status_code: S,
}

impl<S> ApiError<S> {
    pub fn new(message: impl Into<String>, status_code: S) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl<S: fmt::Debug> fmt::Display for ApiError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.status_code, self.message)
    }
}

/// Uniform envelope returned by every service operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<D, S = ApiStatusCode> {
    pub data: Option<D>,
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub message_type: Option<ApiMessageType>,
    #[serde(default)]
    pub status_code: S,
}

impl<D, S: Default> Default for ApiResponse<D, S> {
    fn default() -> Self {
        Self {
            data: None,
            success: false,
            message: None,
            message_type: None,
            status_code: S::default(),
        }
    }
}

impl<D, S> ApiResponse<D, S> {
    /// Successful response carrying `data`
    pub fn success(data: D, message: Option<String>, status_code: S) -> Self {
        Self {
            data: Some(data),
            success: true,
            message,
            message_type: Some(ApiMessageType::Success),
            status_code,
        }
    }

    /// Failed response without data
    pub fn failure(message: impl Into<String>, status_code: S) -> Self {
        Self {
            data: None,
            success: false,
            message: Some(message.into()),
            message_type: Some(ApiMessageType::Error),
            status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl<D, S> From<ApiError<S>> for ApiResponse<D, S> {
    fn from(error: ApiError<S>) -> Self {
        Self::failure(error.message, error.status_code)
    }
}

impl<D: Serialize, S: Serialize> fmt::Display for ApiResponse<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Name and version a service reports about itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceInfo {
    pub name: String,
    pub version: String,
}
