//! Gateway error type and downstream failure mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::{ValidationError, ValidationErrors};

use super::response::{ApiResponse, error_codes};
use crate::downstream::DownstreamError;

/// Error returned by every handler; rendered as `{code, msg}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

/// Handler result carrying a JSON body
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Handler result carrying a plain-text confirmation
pub type TextResult = Result<String, ApiError>;

/// Wrap a forwarded body.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, error_codes::BAD_GATEWAY, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    /// One 400 listing every failing field, sorted by field name.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs.iter().map(describe).collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();
        Self::bad_request(format!("Invalid request: {}", fields.join("; ")))
    }

    /// 400 for a single field checked outside a `Validate` derive.
    pub fn invalid_field(field: &str, error: &ValidationError) -> Self {
        Self::bad_request(format!("Invalid request: {}: {}", field, describe(error)))
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match &*error.code {
            "range" => match (error.params.get("min"), error.params.get("max")) {
                (Some(min), None) => format!("must be at least {}", min),
                (None, Some(max)) => format!("must be at most {}", max),
                _ => "out of range".to_string(),
            },
            code => format!("failed {} check", code),
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}

impl From<DownstreamError> for ApiError {
    fn from(err: DownstreamError) -> Self {
        let mapped = match &err {
            DownstreamError::Status {
                service,
                status,
                message,
            } => match *status {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ApiError::new(*status, error_codes::INVALID_PARAMETER, message.clone())
                }
                StatusCode::NOT_FOUND => ApiError::not_found(message.clone()),
                StatusCode::CONFLICT => {
                    ApiError::new(StatusCode::CONFLICT, error_codes::CONFLICT, message.clone())
                }
                s if s.is_client_error() => {
                    ApiError::new(s, error_codes::DOWNSTREAM_REJECTED, message.clone())
                }
                s if s.is_server_error() => ApiError::service_unavailable(format!(
                    "{} service unavailable: {}",
                    service, message
                )),
                s => ApiError::bad_gateway(format!(
                    "{} service answered with unexpected status {}",
                    service, s
                )),
            },
            DownstreamError::Transport {
                service, timeout, ..
            } => {
                if *timeout {
                    ApiError::service_unavailable(format!("{} service timed out", service))
                } else {
                    ApiError::service_unavailable(format!("{} service unreachable", service))
                }
            }
            DownstreamError::Decode { service, .. } => {
                ApiError::bad_gateway(format!("{} service sent an invalid response", service))
            }
            DownstreamError::InvalidRequest(_) => ApiError::internal("Internal error"),
        };

        if mapped.status.is_server_error() {
            tracing::warn!(
                status = mapped.status.as_u16(),
                code = mapped.code,
                error = %err,
                "Downstream failure"
            );
        } else {
            tracing::debug!(
                status = mapped.status.as_u16(),
                code = mapped.code,
                error = %err,
                "Downstream rejected request"
            );
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn status_error(status: StatusCode, message: &str) -> DownstreamError {
        DownstreamError::Status {
            service: "users",
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_downstream_client_errors_keep_status() {
        let err = ApiError::from(status_error(StatusCode::BAD_REQUEST, "lastName is blank"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INVALID_PARAMETER);
        assert_eq!(err.msg, "lastName is blank");

        let err = ApiError::from(status_error(StatusCode::UNPROCESSABLE_ENTITY, "bad"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, error_codes::INVALID_PARAMETER);

        let err = ApiError::from(status_error(StatusCode::CONFLICT, "exists"));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, error_codes::CONFLICT);

        let err = ApiError::from(status_error(StatusCode::GONE, "gone"));
        assert_eq!(err.status, StatusCode::GONE);
        assert_eq!(err.code, error_codes::DOWNSTREAM_REJECTED);
    }

    #[test]
    fn test_downstream_not_found() {
        let err = ApiError::from(status_error(StatusCode::NOT_FOUND, "User not found"));
        assert_eq!(err, ApiError::not_found("User not found"));
    }

    #[test]
    fn test_server_and_transport_failures_are_unavailable() {
        let err = ApiError::from(status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, error_codes::SERVICE_UNAVAILABLE);

        let err = ApiError::from(DownstreamError::Transport {
            service: "bills",
            message: "timed out".to_string(),
            timeout: true,
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.msg, "bills service timed out");
    }

    #[test]
    fn test_decode_failure_is_bad_gateway() {
        let err = ApiError::from(DownstreamError::Decode {
            service: "bills",
            message: "expected value".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, error_codes::BAD_GATEWAY);
    }

    #[derive(Validate)]
    struct Paging {
        #[validate(range(min = 0))]
        page_number: i64,
        #[validate(range(min = 1))]
        page_size: i64,
    }

    #[test]
    fn test_validation_message_lists_fields_sorted() {
        let errors = Paging {
            page_number: -1,
            page_size: 0,
        }
        .validate()
        .unwrap_err();
        let err = ApiError::from_validation(&errors);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.msg.starts_with("Invalid request: page_number: must be at least"));
        assert!(err.msg.contains("; page_size: must be at least"));
    }

    #[tokio::test]
    async fn test_into_response_renders_envelope() {
        let response = ApiError::not_found("Bill not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"code": 4004, "msg": "Bill not found"}));
    }
}
