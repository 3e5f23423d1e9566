//! Transport Admin API Gateway
//!
//! One administrative REST surface over two independently owned backends,
//! the user service and the bill service.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup (rolling file + stdout)
//! - [`models`] - transfer shapes (users, bills, pages)
//! - [`downstream`] - typed HTTP client adapter per backend
//! - [`gateway`] - routes, validation, orchestration, error mapping
//!
//! The one cross-service rule: a bill is only created after its owner has
//! been found in the user service.

pub mod config;
pub mod downstream;
pub mod gateway;
pub mod logging;
pub mod models;

/// Crate version plus the build revision, e.g. `0.1.0+3f2a9c1`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GATEWAY_BUILD_REV"));

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use downstream::{Downstream, DownstreamError, DownstreamRequest, JsonCodec, ServiceClient};
pub use gateway::state::AppState;
pub use gateway::{build_router, run_server, serve};
