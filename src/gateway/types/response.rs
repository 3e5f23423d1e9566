//! Response envelope and error codes
//!
//! - `ApiResponse<T>`: envelope for errors and gateway-owned endpoints
//! - `error_codes`: standard error code constants
//!
//! Records and pages forwarded from a backend are returned bare; only bodies
//! the gateway synthesizes itself use the envelope.

use serde::Serialize;
use utoipa::ToSchema;

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Error envelope as documented in OpenAPI
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = 4004)]
    pub code: i32,
    #[schema(example = "User not found")]
    pub msg: String,
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const DOWNSTREAM_REJECTED: i32 = 1000;
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const CONFLICT: i32 = 1009;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const BAD_GATEWAY: i32 = 5002;
}
