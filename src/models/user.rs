//! User records and payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{Extra, validate_not_blank};

/// User as returned by the user service.
///
/// Documentation shape only: the gateway forwards the user service's body
/// without decoding it into this struct, so absent fields stay absent and
/// timestamps keep whatever form the backend chose.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[schema(example = "5f0c2a4e-7c1b-4b8a-9e0f-2d4b6a8c1e3f")]
    pub external_id: String,
    #[schema(example = "Anna")]
    pub first_name: Option<String>,
    #[schema(example = "Petrova")]
    pub last_name: Option<String>,
    /// Creation time as the user service wrote it
    #[schema(format = DateTime, example = "2026-10-16T10:00:00+03:00")]
    pub creation_date: Option<String>,
    /// Status and any other backend fields
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

/// Body of `POST /v1/users/add`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPostDto {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Anna")]
    pub first_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Petrova")]
    pub last_name: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

/// Body of `PUT /v1/users/{externalId}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPutDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}
