//! Downstream Client Adapter
//!
//! Typed HTTP access to the backends the gateway fronts (user service, bill
//! service). One [`ServiceClient`] per backend, each owning its base URL,
//! default JSON headers and [`JsonCodec`].
//!
//! ```text
//! services ──DownstreamRequest──▶ Downstream::dispatch ──▶ backend
//!          ◀── T / String ─────── fetch_json / fetch_text ◀── status + body
//! ```
//!
//! [`Downstream`] is the single dispatch seam; status checking and decoding
//! sit on top of it in [`fetch_json`] and [`fetch_text`] so test doubles only
//! have to produce a status and a body.

pub mod client;
pub mod codec;
pub mod error;
pub mod request;

#[cfg(test)]
pub mod mock;

pub use client::ServiceClient;
pub use codec::{JsonCodec, TimestampMode};
pub use error::DownstreamError;
pub use request::DownstreamRequest;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Raw backend answer, any status
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl DownstreamResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turn a non-2xx answer into [`DownstreamError::Status`].
    pub fn ensure_success(self, service: &'static str) -> Result<Self, DownstreamError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(DownstreamError::from_status(
                service,
                self.status,
                &self.body,
            ))
        }
    }
}

/// Single dispatch seam towards one backend
#[async_trait]
pub trait Downstream: Send + Sync {
    /// Backend name for logging and error messages
    fn name(&self) -> &'static str;

    /// Codec used to decode this backend's bodies
    fn codec(&self) -> &JsonCodec;

    /// Send one request. Only transport-level failures are errors here;
    /// non-2xx answers come back as a normal [`DownstreamResponse`].
    async fn dispatch(
        &self,
        request: DownstreamRequest,
    ) -> Result<DownstreamResponse, DownstreamError>;
}

/// Dispatch and decode a JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    downstream: &dyn Downstream,
    request: DownstreamRequest,
) -> Result<T, DownstreamError> {
    let service = downstream.name();
    let response = downstream.dispatch(request).await?.ensure_success(service)?;
    downstream
        .codec()
        .decode(&response.body)
        .map_err(|e| DownstreamError::Decode {
            service,
            message: e.to_string(),
        })
}

/// Dispatch and return the body as text (confirmation messages).
pub async fn fetch_text(
    downstream: &dyn Downstream,
    request: DownstreamRequest,
) -> Result<String, DownstreamError> {
    let service = downstream.name();
    let response = downstream.dispatch(request).await?.ensure_success(service)?;
    String::from_utf8(response.body).map_err(|e| DownstreamError::Decode {
        service,
        message: e.to_string(),
    })
}
