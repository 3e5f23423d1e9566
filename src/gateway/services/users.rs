//! User operations - 1:1 forwards to the user service

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::record_id;
use crate::downstream::{Downstream, DownstreamError, DownstreamRequest, fetch_json, fetch_text};
use crate::gateway::types::UserListQuery;
use crate::models::{ExternalId, UserPostDto, UserPutDto};

/// Existence check used before work that must reference a real user.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Same contract as get-by-id: the record, or the user service's failure.
    async fn find_user(&self, id: &ExternalId) -> Result<Value, DownstreamError>;
}

pub fn create_request(payload: &UserPostDto) -> Result<DownstreamRequest, DownstreamError> {
    DownstreamRequest::post("users/add").json_body(payload)
}

pub fn list_request(query: &UserListQuery, sort_param: &str) -> DownstreamRequest {
    DownstreamRequest::get("users/all")
        .query("pageNumber", query.page_number)
        .query("pageSize", query.page_size)
        .query(sort_param, &query.sort_by)
        .query("direction", &query.direction)
        .query_opt("firstNameFilter", query.first_name_filter.as_deref())
        .query_opt("lastNameFilter", query.last_name_filter.as_deref())
}

pub fn get_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::get("users/{externalId}").path_param("externalId", id.as_str())
}

pub fn delete_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::delete("users/{externalId}/delete").path_param("externalId", id.as_str())
}

pub fn delete_all_request() -> DownstreamRequest {
    DownstreamRequest::delete("users/delete")
}

pub fn update_request(
    id: &ExternalId,
    payload: &UserPutDto,
) -> Result<DownstreamRequest, DownstreamError> {
    DownstreamRequest::put("users/{externalId}")
        .path_param("externalId", id.as_str())
        .json_body(payload)
}

pub fn reestablish_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::post("users/{externalId}").path_param("externalId", id.as_str())
}

/// User operations over one user service client
pub struct UserOperations {
    downstream: Arc<dyn Downstream>,
    sort_param: String,
}

impl UserOperations {
    pub fn new(downstream: Arc<dyn Downstream>, sort_param: impl Into<String>) -> Self {
        Self {
            downstream,
            sort_param: sort_param.into(),
        }
    }

    pub async fn create(&self, payload: &UserPostDto) -> Result<Value, DownstreamError> {
        let user: Value = fetch_json(self.downstream.as_ref(), create_request(payload)?).await?;
        tracing::info!(external_id = record_id(&user), "User created");
        Ok(user)
    }

    pub async fn list(&self, query: &UserListQuery) -> Result<Value, DownstreamError> {
        fetch_json(
            self.downstream.as_ref(),
            list_request(query, &self.sort_param),
        )
        .await
    }

    pub async fn get_by_id(&self, id: &ExternalId) -> Result<Value, DownstreamError> {
        fetch_json(self.downstream.as_ref(), get_request(id)).await
    }

    pub async fn delete_by_id(&self, id: &ExternalId) -> Result<String, DownstreamError> {
        let confirmation = fetch_text(self.downstream.as_ref(), delete_request(id)).await?;
        tracing::info!(external_id = %id, "User deleted");
        Ok(confirmation)
    }

    pub async fn delete_all(&self) -> Result<String, DownstreamError> {
        let confirmation = fetch_text(self.downstream.as_ref(), delete_all_request()).await?;
        tracing::warn!("All users deleted");
        Ok(confirmation)
    }

    pub async fn update(
        &self,
        id: &ExternalId,
        payload: &UserPutDto,
    ) -> Result<Value, DownstreamError> {
        fetch_json(self.downstream.as_ref(), update_request(id, payload)?).await
    }

    pub async fn reestablish(&self, id: &ExternalId) -> Result<Value, DownstreamError> {
        let user: Value = fetch_json(self.downstream.as_ref(), reestablish_request(id)).await?;
        tracing::info!(external_id = %id, "User reestablished");
        Ok(user)
    }
}

#[async_trait]
impl UserLookup for UserOperations {
    async fn find_user(&self, id: &ExternalId) -> Result<Value, DownstreamError> {
        self.get_by_id(id).await
    }
}
