use celerik_core::Described;
use serde::{Deserialize, Serialize};

/// Direction of a sorted page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl Described for SortDirection {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[(SortDirection::Asc, "asc"), (SortDirection::Desc, "desc")];
}

/// A page request, as received from a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    pub page_number: i32,
    pub page_size: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            sort_key: None,
            sort_direction: None,
        }
    }
}

impl PaginationRequest {
    pub fn new(page_number: i32, page_size: i32) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort_key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(sort_key.into());
        self.sort_direction = Some(direction.description().to_string());
        self
    }

    /// Anything but `desc` sorts ascending
    pub fn is_ascending(&self) -> bool {
        self.sort_direction
            .as_deref()
            .map_or(true, |direction| !direction.eq_ignore_ascii_case(SortDirection::Desc.description()))
    }

    pub fn direction(&self) -> SortDirection {
        if self.is_ascending() {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// Number of items before the requested page
    pub fn offset(&self) -> usize {
        let page = usize::try_from(self.page_number.max(1) - 1).unwrap_or_default();
        page * usize::try_from(self.page_size.max(0)).unwrap_or_default()
    }
}
