//! Bill handlers

use std::sync::Arc;

use axum::extract::State;
use serde_json::Value;

use super::super::services::BillCreation;
use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, BillListQuery, ErrorBody, TextResult, ValidatedJson, ValidatedQuery, ok,
};
use crate::models::{BillPostDto, BillPutDto, BillRecord, ExternalId, Page};

/// Create a bill for an existing user
///
/// The owner is looked up in the user service first; if that fails the bill
/// service is not contacted and the lookup failure is returned.
#[utoipa::path(
    post,
    path = "/v1/bills/add",
    request_body = BillPostDto,
    responses(
        (status = 200, description = "Created bill", body = BillRecord),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Owner not found", body = ErrorBody),
        (status = 503, description = "User or bill service unavailable", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<BillPostDto>,
) -> ApiResult<Value> {
    let creation =
        BillCreation::new(payload).map_err(|e| ApiError::invalid_field("userId", &e))?;
    ok(state.bills.create(creation).await?)
}

/// List a user's bills, paged
///
/// GET /v1/bills/all?pageNumber=0&sizeNumber=10&sortBy=creationDate&direction=desc&showPaidBills=false&userId=...
#[utoipa::path(
    get,
    path = "/v1/bills/all",
    params(BillListQuery),
    responses(
        (status = 200, description = "One page of bills", body = Page<BillRecord>),
        (status = 400, description = "Invalid listing parameters", body = ErrorBody),
        (status = 503, description = "Bill service unavailable", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<BillListQuery>,
) -> ApiResult<Value> {
    ok(state.bills.list(&query).await?)
}

#[utoipa::path(
    get,
    path = "/v1/bills/{externalId}",
    params(("externalId" = String, Path, description = "Bill external id")),
    responses(
        (status = 200, description = "Bill", body = BillRecord),
        (status = 404, description = "Bill not found", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
) -> ApiResult<Value> {
    ok(state.bills.get_by_id(&id).await?)
}

#[utoipa::path(
    put,
    path = "/v1/bills/{externalId}",
    params(("externalId" = String, Path, description = "Bill external id")),
    request_body = BillPutDto,
    responses(
        (status = 200, description = "Updated bill", body = BillRecord),
        (status = 404, description = "Bill not found", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn update_bill(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
    ValidatedJson(payload): ValidatedJson<BillPutDto>,
) -> ApiResult<Value> {
    ok(state.bills.update(&id, &payload).await?)
}

#[utoipa::path(
    delete,
    path = "/v1/bills/{externalId}/delete",
    params(("externalId" = String, Path, description = "Bill external id")),
    responses(
        (status = 200, description = "Confirmation", body = String, content_type = "text/plain"),
        (status = 404, description = "Bill not found", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn delete_bill(State(state): State<Arc<AppState>>, id: ExternalId) -> TextResult {
    Ok(state.bills.delete_by_id(&id).await?)
}

#[utoipa::path(
    delete,
    path = "/v1/bills/delete",
    responses(
        (status = 200, description = "Confirmation", body = String, content_type = "text/plain"),
        (status = 503, description = "Bill service unavailable", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn delete_all_bills(State(state): State<Arc<AppState>>) -> TextResult {
    Ok(state.bills.delete_all().await?)
}

/// Reactivate a soft-deleted bill
#[utoipa::path(
    post,
    path = "/v1/bills/{externalId}",
    params(("externalId" = String, Path, description = "Bill external id")),
    responses(
        (status = 200, description = "Reestablished bill", body = BillRecord),
        (status = 404, description = "Bill not found", body = ErrorBody)
    ),
    tag = "Bills"
)]
pub async fn reestablish_bill(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
) -> ApiResult<Value> {
    ok(state.bills.reestablish(&id).await?)
}
