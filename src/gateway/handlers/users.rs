//! User handlers

use std::sync::Arc;

use axum::extract::State;
use serde_json::Value;

use super::super::state::AppState;
use super::super::types::{
    ApiResult, ErrorBody, TextResult, UserListQuery, ValidatedJson, ValidatedQuery, ok,
};
use crate::models::{ExternalId, Page, UserPostDto, UserPutDto, UserRecord};

/// Create a user
///
/// POST /v1/users/add
#[utoipa::path(
    post,
    path = "/v1/users/add",
    request_body = UserPostDto,
    responses(
        (status = 200, description = "Created user", body = UserRecord),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody),
        (status = 503, description = "User service unavailable", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<UserPostDto>,
) -> ApiResult<Value> {
    ok(state.users.create(&payload).await?)
}

/// List users, paged
///
/// GET /v1/users/all?pageNumber=0&pageSize=10&sortBy=creationDate&direction=asc
#[utoipa::path(
    get,
    path = "/v1/users/all",
    params(UserListQuery),
    responses(
        (status = 200, description = "One page of users", body = Page<UserRecord>),
        (status = 400, description = "Invalid paging or sort parameters", body = ErrorBody),
        (status = 503, description = "User service unavailable", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> ApiResult<Value> {
    ok(state.users.list(&query).await?)
}

/// Get a user by external id
#[utoipa::path(
    get,
    path = "/v1/users/{externalId}",
    params(("externalId" = String, Path, description = "User external id")),
    responses(
        (status = 200, description = "User", body = UserRecord),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
) -> ApiResult<Value> {
    ok(state.users.get_by_id(&id).await?)
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/v1/users/{externalId}/delete",
    params(("externalId" = String, Path, description = "User external id")),
    responses(
        (status = 200, description = "Confirmation", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn delete_user(State(state): State<Arc<AppState>>, id: ExternalId) -> TextResult {
    Ok(state.users.delete_by_id(&id).await?)
}

/// Soft-delete every user
#[utoipa::path(
    delete,
    path = "/v1/users/delete",
    responses(
        (status = 200, description = "Confirmation", body = String, content_type = "text/plain"),
        (status = 503, description = "User service unavailable", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn delete_all_users(State(state): State<Arc<AppState>>) -> TextResult {
    Ok(state.users.delete_all().await?)
}

/// Update a user
#[utoipa::path(
    put,
    path = "/v1/users/{externalId}",
    params(("externalId" = String, Path, description = "User external id")),
    request_body = UserPutDto,
    responses(
        (status = 200, description = "Updated user", body = UserRecord),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
    ValidatedJson(payload): ValidatedJson<UserPutDto>,
) -> ApiResult<Value> {
    ok(state.users.update(&id, &payload).await?)
}

/// Reactivate a soft-deleted user
#[utoipa::path(
    post,
    path = "/v1/users/{externalId}",
    params(("externalId" = String, Path, description = "User external id")),
    responses(
        (status = 200, description = "Reestablished user", body = UserRecord),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn reestablish_user(
    State(state): State<Arc<AppState>>,
    id: ExternalId,
) -> ApiResult<Value> {
    ok(state.users.reestablish(&id).await?)
}
