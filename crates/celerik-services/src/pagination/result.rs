use crate::model::{ApiResponse, StatusCode};
use crate::pagination::request::PaginationRequest;
use serde::{Deserialize, Serialize};

/// One page of items plus the paging metadata it was produced with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    pub page_number: i32,
    pub page_size: i32,
    pub sort_key: Option<String>,
    pub sort_direction: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub record_count: u64,
    pub page_count: u64,
}

impl<T> PaginationResult<T> {
    /// `page_count` is `record_count / page_size` rounded up
    pub fn new(request: &PaginationRequest, items: Vec<T>, record_count: u64) -> Self {
        let page_size = u64::try_from(request.page_size).unwrap_or_default();
        let page_count = if page_size == 0 {
            0
        } else {
            record_count.div_ceil(page_size)
        };

        Self {
            page_number: request.page_number,
            page_size: request.page_size,
            sort_key: request.sort_key.clone(),
            sort_direction: request.sort_direction.clone(),
            items,
            record_count,
            page_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

/// Shortcuts on paged responses
pub trait PagedResponseExt<T> {
    /// First item of the page, `None` for a failed or empty response
    fn first_or_default(&self) -> Option<&T>;
}

impl<T, S: StatusCode> PagedResponseExt<T> for ApiResponse<PaginationResult<T>, S> {
    fn first_or_default(&self) -> Option<&T> {
        self.data.as_ref().and_then(PaginationResult::first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiStatusCode;

    #[test]
    fn test_page_count_rounds_up() {
        let request = PaginationRequest::new(1, 20);
        let page = PaginationResult::new(&request, vec![1, 2, 3], 41);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.record_count, 41);

        let empty: PaginationResult<u8> = PaginationResult::new(&PaginationRequest::new(1, 0), Vec::new(), 5);
        assert_eq!(empty.page_count, 0);
    }

    #[test]
    fn test_first_or_default() {
        let request = PaginationRequest::new(1, 2);
        let response = ApiResponse::success(PaginationResult::new(&request, vec!["a", "b"], 2), None, ApiStatusCode::Ok);
        assert_eq!(response.first_or_default(), Some(&"a"));

        let failed: ApiResponse<PaginationResult<&str>> = ApiResponse::failure("nope", ApiStatusCode::Error);
        assert_eq!(failed.first_or_default(), None);
    }
}
