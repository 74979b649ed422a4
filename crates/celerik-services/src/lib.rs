//! # celerik-services
//!
//! The response envelope, pagination and base service types business
//! services are written against: [`ApiService`] for in-process services,
//! [`ApiServiceEf`] when a data context is bound, and [`ApiServiceHttp`] to
//! call a remote service answering with the same envelope.

pub mod error;
pub mod model;
pub mod pagination;
pub mod service;
pub mod validators;

pub use error::{ServiceError, ServiceResult};
pub use model::{
    ApiChangeAction, ApiError, ApiMessageType, ApiOperationType, ApiResponse, ApiServiceInfo, ApiStatusCode, StatusCode,
};
pub use pagination::{
    PagedResponseExt, PaginationRequest, PaginationRequestValidator, PaginationResult, SortDirection, Sortable,
};
pub use service::{ApiService, ApiServiceEf, ApiServiceHttp, InvalidPayload, OperationLog};
pub use validators::ValidatorRegistry;
