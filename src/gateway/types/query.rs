//! Listing query parameters
//!
//! Field names match the wire names (camelCase). Paging bounds, direction and
//! identifiers are checked here; sort field names are not.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::models::page::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use crate::models::{SortDirection, validate_external_id};

fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

/// `asc` or `desc`, any case. The caller's spelling is forwarded.
pub fn validate_direction(value: &str) -> Result<(), ValidationError> {
    value.parse::<SortDirection>().map(|_| ()).map_err(|reason| {
        let mut err = ValidationError::new("direction");
        err.message = Some(reason.into());
        err
    })
}

/// `GET /v1/users/all`
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Zero-based page index
    #[serde(default = "default_page_number")]
    #[param(minimum = 0, default = 0)]
    #[validate(range(min = 0))]
    pub page_number: i64,
    /// Records per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, default = 10)]
    #[validate(range(min = 1))]
    pub page_size: i64,
    /// Field to sort by, passed to the user service as-is
    #[serde(default = "default_sort_by")]
    #[param(default = "creationDate")]
    pub sort_by: String,
    /// `asc` or `desc`
    #[param(example = "asc")]
    #[validate(custom(function = "validate_direction"))]
    pub direction: String,
    /// Only users whose first name matches
    pub first_name_filter: Option<String>,
    /// Only users whose last name matches
    pub last_name_filter: Option<String>,
}

/// `GET /v1/bills/all`
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BillListQuery {
    /// Zero-based page index
    #[serde(default = "default_page_number")]
    #[param(minimum = 0, default = 0)]
    #[validate(range(min = 0))]
    pub page_number: i64,
    /// Records per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 0, default = 10)]
    #[validate(range(min = 0))]
    pub size_number: i64,
    /// Field to sort by
    #[serde(default = "default_sort_by")]
    #[param(default = "creationDate")]
    pub sort_by: String,
    /// `asc` or `desc`
    #[param(example = "desc")]
    #[validate(custom(function = "validate_direction"))]
    pub direction: String,
    /// Include paid bills
    pub show_paid_bills: bool,
    /// Owner of the listed bills
    #[validate(custom(function = "validate_external_id"))]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::extract::rejection::QueryRejection;
    use axum::http::Uri;

    fn parse<T: serde::de::DeserializeOwned>(query: &str) -> Result<T, QueryRejection> {
        let uri: Uri = format!("/?{query}").parse().unwrap();
        Query::<T>::try_from_uri(&uri).map(|Query(value)| value)
    }

    #[test]
    fn test_user_query_defaults() {
        let q: UserListQuery = parse("direction=ASC").unwrap();
        assert_eq!(q.page_number, 0);
        assert_eq!(q.page_size, 10);
        assert_eq!(q.sort_by, "creationDate");
        assert_eq!(q.direction, "ASC");
        assert!(q.first_name_filter.is_none());
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_user_query_requires_direction() {
        assert!(parse::<UserListQuery>("pageNumber=0").is_err());
        let q: UserListQuery = parse("direction=sideways").unwrap();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_user_query_paging_bounds() {
        let q: UserListQuery = parse("direction=asc&pageNumber=-1").unwrap();
        assert!(q.validate().unwrap_err().field_errors().contains_key("page_number"));
        let q: UserListQuery = parse("direction=asc&pageSize=0").unwrap();
        assert!(q.validate().unwrap_err().field_errors().contains_key("page_size"));
    }

    #[test]
    fn test_bill_query_required_fields() {
        assert!(parse::<BillListQuery>("direction=asc&userId=U1").is_err());
        assert!(parse::<BillListQuery>("direction=asc&showPaidBills=maybe&userId=U1").is_err());

        let q: BillListQuery = parse("direction=desc&showPaidBills=false&userId=U1").unwrap();
        assert_eq!(q.size_number, 10);
        assert!(!q.show_paid_bills);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_bill_query_rejects_bad_owner_and_size() {
        let q: BillListQuery =
            parse("direction=asc&showPaidBills=true&userId=a%2Fb&sizeNumber=-1").unwrap();
        let errors = q.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("user_id"));
        assert!(fields.contains_key("size_number"));
    }

    #[test]
    fn test_bill_query_accepts_zero_size() {
        let q: BillListQuery =
            parse("direction=asc&showPaidBills=true&userId=U1&sizeNumber=0").unwrap();
        assert_eq!(q.size_number, 0);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_bill_query_rejects_dot_segment_owner() {
        let q: BillListQuery = parse("direction=asc&showPaidBills=true&userId=..").unwrap();
        assert!(q.validate().unwrap_err().field_errors().contains_key("user_id"));
    }
}
