//! Gateway Services Layer
//!
//! Downstream orchestration, kept out of the handlers. Handlers validate and
//! translate; services decide which backend calls are made and in what order.

pub mod bills;
pub mod users;

pub use bills::{BillCreation, BillOperations, VerifiedBillCreation};
pub use users::{UserLookup, UserOperations};

use serde_json::Value;

/// `externalId` of a forwarded record, for log fields only.
fn record_id(record: &Value) -> &str {
    record
        .get("externalId")
        .and_then(Value::as_str)
        .unwrap_or_default()
}
