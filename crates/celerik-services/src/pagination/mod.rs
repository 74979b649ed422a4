//! Page requests, paged results and their validation

pub mod request;
pub mod result;
pub mod validator;

pub use request::{PaginationRequest, SortDirection};
pub use result::{PagedResponseExt, PaginationResult};
pub use validator::{PaginationRequestValidator, Sortable};
