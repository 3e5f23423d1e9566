//! HTTP handlers
//!
//! Thin adapters: extract and validate, call the service, let `?` map any
//! downstream failure through `From<DownstreamError> for ApiError`.

pub mod bills;
pub mod health;
pub mod users;

pub use bills::{
    create_bill, delete_all_bills, delete_bill, get_bill, list_bills, reestablish_bill,
    update_bill,
};
pub use health::{HealthResponse, health_check};
pub use users::{
    create_user, delete_all_users, delete_user, get_user, list_users, reestablish_user,
    update_user,
};

