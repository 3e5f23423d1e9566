//! Bill operations
//!
//! Everything forwards 1:1 to the bill service except creation, which runs
//! as a two-step pipeline:
//!
//! ```text
//! BillCreation ──verify_owner(UserLookup)──▶ VerifiedBillCreation ──submit──▶ bill service
//!        │                                        (only reachable after
//!        └── lookup failed: returned as-is,        a successful lookup)
//!            bill service never contacted
//! ```

use std::sync::Arc;

use serde_json::Value;
use validator::ValidationError;

use super::record_id;
use super::users::UserLookup;
use crate::downstream::{Downstream, DownstreamError, DownstreamRequest, fetch_json, fetch_text};
use crate::gateway::types::BillListQuery;
use crate::models::{BillPostDto, BillPutDto, ExternalId};

/// A bill payload whose owner has not been looked up yet.
#[derive(Debug, Clone)]
pub struct BillCreation {
    owner: ExternalId,
    payload: BillPostDto,
}

impl BillCreation {
    pub fn new(payload: BillPostDto) -> Result<Self, ValidationError> {
        let owner = payload.owner_id()?;
        Ok(Self { owner, payload })
    }

    /// Look the owner up. Any lookup failure ends the creation here.
    pub async fn verify_owner(
        self,
        users: &dyn UserLookup,
    ) -> Result<VerifiedBillCreation, DownstreamError> {
        users.find_user(&self.owner).await.inspect_err(|e| {
            tracing::info!(user_id = %self.owner, error = %e, "Bill creation stopped at owner lookup");
        })?;
        Ok(VerifiedBillCreation {
            owner: self.owner,
            payload: self.payload,
        })
    }
}

/// A bill payload whose owner exists. Only [`BillCreation::verify_owner`]
/// produces one.
#[derive(Debug, Clone)]
pub struct VerifiedBillCreation {
    owner: ExternalId,
    payload: BillPostDto,
}

impl VerifiedBillCreation {
    /// `POST bills/add` with the caller's payload, untouched.
    pub fn request(&self) -> Result<DownstreamRequest, DownstreamError> {
        DownstreamRequest::post("bills/add").json_body(&self.payload)
    }

    pub async fn submit(self, bills: &dyn Downstream) -> Result<Value, DownstreamError> {
        let bill: Value = fetch_json(bills, self.request()?).await?;
        tracing::info!(
            external_id = record_id(&bill),
            user_id = %self.owner,
            "Bill created"
        );
        Ok(bill)
    }
}

pub fn list_request(query: &BillListQuery, sort_param: &str) -> DownstreamRequest {
    DownstreamRequest::get("bills/all")
        .query("pageNumber", query.page_number)
        .query("sizeNumber", query.size_number)
        .query(sort_param, &query.sort_by)
        .query("direction", &query.direction)
        .query("showPaidBills", query.show_paid_bills)
        .query("userId", &query.user_id)
}

pub fn get_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::get("bills/{externalId}").path_param("externalId", id.as_str())
}

pub fn update_request(
    id: &ExternalId,
    payload: &BillPutDto,
) -> Result<DownstreamRequest, DownstreamError> {
    DownstreamRequest::put("bills/{externalId}")
        .path_param("externalId", id.as_str())
        .json_body(payload)
}

pub fn delete_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::delete("bills/{externalId}/delete").path_param("externalId", id.as_str())
}

pub fn delete_all_request() -> DownstreamRequest {
    DownstreamRequest::delete("bills/delete")
}

pub fn reestablish_request(id: &ExternalId) -> DownstreamRequest {
    DownstreamRequest::post("bills/{externalId}").path_param("externalId", id.as_str())
}

/// Bill operations over one bill service client
pub struct BillOperations {
    downstream: Arc<dyn Downstream>,
    users: Arc<dyn UserLookup>,
    sort_param: String,
}

impl BillOperations {
    pub fn new(
        downstream: Arc<dyn Downstream>,
        users: Arc<dyn UserLookup>,
        sort_param: impl Into<String>,
    ) -> Self {
        Self {
            downstream,
            users,
            sort_param: sort_param.into(),
        }
    }

    /// Owner lookup, then creation. Strictly sequential.
    pub async fn create(&self, creation: BillCreation) -> Result<Value, DownstreamError> {
        let verified = creation.verify_owner(self.users.as_ref()).await?;
        verified.submit(self.downstream.as_ref()).await
    }

    pub async fn list(&self, query: &BillListQuery) -> Result<Value, DownstreamError> {
        fetch_json(
            self.downstream.as_ref(),
            list_request(query, &self.sort_param),
        )
        .await
    }

    pub async fn get_by_id(&self, id: &ExternalId) -> Result<Value, DownstreamError> {
        fetch_json(self.downstream.as_ref(), get_request(id)).await
    }

    pub async fn update(
        &self,
        id: &ExternalId,
        payload: &BillPutDto,
    ) -> Result<Value, DownstreamError> {
        fetch_json(self.downstream.as_ref(), update_request(id, payload)?).await
    }

    pub async fn delete_by_id(&self, id: &ExternalId) -> Result<String, DownstreamError> {
        let confirmation = fetch_text(self.downstream.as_ref(), delete_request(id)).await?;
        tracing::info!(external_id = %id, "Bill deleted");
        Ok(confirmation)
    }

    pub async fn delete_all(&self) -> Result<String, DownstreamError> {
        let confirmation = fetch_text(self.downstream.as_ref(), delete_all_request()).await?;
        tracing::warn!("All bills deleted");
        Ok(confirmation)
    }

    pub async fn reestablish(&self, id: &ExternalId) -> Result<Value, DownstreamError> {
        let bill: Value = fetch_json(self.downstream.as_ref(), reestablish_request(id)).await?;
        tracing::info!(external_id = %id, "Bill reestablished");
        Ok(bill)
    }
}
