//! Gateway types module
//!
//! ## Input Types
//! - [`ValidatedQuery`] / [`ValidatedJson`]: extractors that run `validator`
//!   before a handler sees the value
//! - [`UserListQuery`] / [`BillListQuery`]: listing parameters
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: envelope for errors and gateway-owned endpoints
//! - [`ApiError`]: handler error, including the downstream failure mapping
//!
//! ## Submodules
//! - [`error`]: `ApiError`, `ApiResult`, `TextResult`
//! - [`extract`]: validating extractors
//! - [`query`]: listing query parameters
//! - [`response`]: response envelope and error codes

pub mod error;
pub mod extract;
pub mod query;
pub mod response;

// Re-export commonly used types at module root
pub use error::{ApiError, ApiResult, TextResult, ok};
pub use extract::{ValidatedJson, ValidatedQuery};
pub use query::{BillListQuery, UserListQuery};
pub use response::{ApiResponse, ErrorBody, error_codes};
