use crate::pagination::request::{PaginationRequest, SortDirection};
use async_trait::async_trait;
use celerik_core::{Described, ServiceResources};
use celerik_validation::{ChoiceValidator, NumericValidator, Rules, ValidationResult, Validator};

/// Entity types that can be sorted by name
pub trait Sortable {
    /// Serialized names of the fields a page may be sorted by
    fn sortable_fields() -> &'static [&'static str];
}

/// Validates a [`PaginationRequest`]
///
/// Page number and size must be positive. A sort direction, when given
/// and not blank, must be `asc` or `desc`; a sort key, when given, not
/// blank and a field list is known, must name one of the fields. Both
/// comparisons ignore case.
#[derive(Debug, Clone)]
pub struct PaginationRequestValidator {
    rules: Rules,
    sortable_fields: Vec<String>,
}

impl Default for PaginationRequestValidator {
    fn default() -> Self {
        Self::with_sortable_fields(Vec::<String>::new())
    }
}

impl PaginationRequestValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort keys restricted to the fields of `E`
    pub fn for_sortable<E: Sortable>() -> Self {
        Self::with_sortable_fields(E::sortable_fields().iter().copied())
    }

    pub fn with_sortable_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sortable_fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let directions = SortDirection::variants().map(|direction| direction.description());

        let mut rules = Rules::new()
            .field("pageNumber", Self::positive("pageNumber"))
            .field("pageSize", Self::positive("pageSize"))
            .field(
                "sortDirection",
                ChoiceValidator::one_of(directions)
                    .skip_blank(true)
                    .message(ServiceResources::get("SortDirectionInvalid", &[])),
            );

        if !sortable_fields.is_empty() {
            let listed = sortable_fields.join(",");
            rules = rules.field(
                "sortKey",
                ChoiceValidator::one_of(sortable_fields.clone())
                    .skip_blank(true)
                    .message(ServiceResources::get("SortKeyInvalid", &[&listed])),
            );
        }

        Self { rules, sortable_fields }
    }

    pub fn sortable_fields(&self) -> &[String] {
        &self.sortable_fields
    }

    fn positive(field: &str) -> NumericValidator {
        NumericValidator::new()
            .greater_than(0.0)
            .integer_only(true)
            .message(ServiceResources::get("GreaterThan", &[&field, &0]))
    }
}

#[async_trait]
impl Validator<PaginationRequest> for PaginationRequestValidator {
    async fn validate(&self, payload: &PaginationRequest) -> ValidationResult<()> {
        Validator::<PaginationRequest>::validate(&self.rules, payload).await
    }
}
