//! Response envelope and the enumerations it carries

pub mod enums;
pub mod response;

pub use enums::{ApiChangeAction, ApiMessageType, ApiOperationType, ApiStatusCode, StatusCode};
pub use response::{ApiError, ApiResponse, ApiServiceInfo};
