//! Base types business services are built on

pub mod api_service;
pub mod ef;
pub mod http;

pub use api_service::{resolve_service, ApiService, InvalidPayload, OperationLog};
pub use ef::ApiServiceEf;
pub use http::ApiServiceHttp;
