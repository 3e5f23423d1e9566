//! Validating extractors
//!
//! Every rejection is an [`ApiError`] so malformed input gets the same
//! `{code, msg}` envelope as downstream failures, and never reaches a handler.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;
use super::response::error_codes;
use crate::models::ExternalId;

/// `Query<T>` followed by `T::validate()`
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

/// `Json<T>` followed by `T::validate()`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::new(e.status(), error_codes::INVALID_PARAMETER, e.body_text()))?;
        value.validate().map_err(|e| ApiError::from_validation(&e))?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), error_codes::INVALID_PARAMETER, e.body_text()))?;
        value.validate().map_err(|e| ApiError::from_validation(&e))?;
        Ok(Self(value))
    }
}

/// The `{externalId}` path segment, checked for URL safety.
impl<S> FromRequestParts<S> for ExternalId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::new(e.status(), error_codes::INVALID_PARAMETER, e.body_text()))?;
        ExternalId::parse(&raw).map_err(|e| ApiError::invalid_field("externalId", &e))
    }
}
