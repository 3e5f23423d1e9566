//! Recording test double for [`Downstream`]
//!
//! Routes are keyed by `"METHOD rendered/path"`. Unrouted calls answer 404.
//! Several mocks can share one [`Journal`] to assert cross-service order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Downstream, DownstreamError, DownstreamRequest, DownstreamResponse, JsonCodec};

/// Shared, ordered log of `"service METHOD path"` entries
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct MockDownstream {
    name: &'static str,
    codec: JsonCodec,
    routes: Mutex<HashMap<String, DownstreamResponse>>,
    calls: Mutex<Vec<DownstreamRequest>>,
    journal: Journal,
    fail_transport: Mutex<bool>,
    dispatch_count: AtomicUsize,
}

impl MockDownstream {
    pub fn new(name: &'static str) -> Self {
        Self::with_journal(name, journal())
    }

    pub fn with_journal(name: &'static str, journal: Journal) -> Self {
        Self {
            name,
            codec: JsonCodec::default(),
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            journal,
            fail_transport: Mutex::new(false),
            dispatch_count: AtomicUsize::new(0),
        }
    }

    pub fn respond(&self, route: &str, response: DownstreamResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), response);
    }

    pub fn respond_json(&self, route: &str, status: StatusCode, body: serde_json::Value) {
        self.respond(route, DownstreamResponse::new(status, body.to_string()));
    }

    pub fn fail_transport(&self, fail: bool) {
        *self.fail_transport.lock().unwrap() = fail;
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatch_count.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<DownstreamRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Downstream for MockDownstream {
    fn name(&self) -> &'static str {
        self.name
    }

    fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    async fn dispatch(
        &self,
        request: DownstreamRequest,
    ) -> Result<DownstreamResponse, DownstreamError> {
        self.dispatch_count.fetch_add(1, Ordering::SeqCst);
        let path = request.render_path()?;
        let route = format!("{} {}", request.method, path);

        self.journal
            .lock()
            .unwrap()
            .push(format!("{} {}", self.name, route));
        self.calls.lock().unwrap().push(request);

        if *self.fail_transport.lock().unwrap() {
            return Err(DownstreamError::Transport {
                service: self.name,
                message: "connection refused".to_string(),
                timeout: false,
            });
        }

        let response = self.routes.lock().unwrap().get(&route).cloned();
        Ok(response.unwrap_or_else(|| {
            DownstreamResponse::new(StatusCode::NOT_FOUND, format!("no route for {route}"))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls_in_shared_journal() {
        let log = journal();
        let users = MockDownstream::with_journal("users", log.clone());
        let bills = MockDownstream::with_journal("bills", log.clone());

        users
            .dispatch(DownstreamRequest::get("users/{id}").path_param("id", "U1"))
            .await
            .unwrap();
        bills
            .dispatch(DownstreamRequest::post("bills/add"))
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["users GET users/U1", "bills POST bills/add"]
        );
        assert_eq!(users.dispatch_count(), 1);
        assert_eq!(bills.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_unrouted_call_is_not_found() {
        let users = MockDownstream::new("users");
        let response = users
            .dispatch(DownstreamRequest::get("users/missing"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
