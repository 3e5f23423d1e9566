//! Bill records and payloads
//!
//! Amount and metadata are opaque to the gateway and live in `extra`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{ExternalId, Extra, validate_external_id};

/// Bill as returned by the bill service. Documentation shape only, like
/// [`super::UserRecord`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[schema(example = "0b7d2f9a-3c41-4e8e-b5a6-91f0d2c4e7a8")]
    pub external_id: String,
    /// Owning user's external identifier
    #[schema(example = "5f0c2a4e-7c1b-4b8a-9e0f-2d4b6a8c1e3f")]
    pub user_id: String,
    pub paid: Option<bool>,
    #[schema(format = DateTime)]
    pub creation_date: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

/// Body of `POST /v1/bills/add`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillPostDto {
    /// User the bill is issued to; must exist in the user service
    #[validate(custom(function = "validate_external_id"))]
    #[schema(example = "5f0c2a4e-7c1b-4b8a-9e0f-2d4b6a8c1e3f")]
    pub user_id: String,
    /// Amount and any other bill fields
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

impl BillPostDto {
    /// Owner identifier, re-checked so callers that skipped validation still
    /// cannot put an unsafe token into a backend path.
    pub fn owner_id(&self) -> Result<ExternalId, validator::ValidationError> {
        ExternalId::parse(&self.user_id)
    }
}

/// Body of `PUT /v1/bills/{externalId}`, forwarded as-is
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct BillPutDto {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Extra,
}
