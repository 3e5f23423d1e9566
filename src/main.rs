//! Transport Admin API Gateway
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────┐
//! │  Admin   │───▶│  Gateway  │───▶│ User Service │
//! │  client  │    │  (axum)   │───▶│ Bill Service │
//! └──────────┘    └───────────┘    └──────────────┘
//! ```
//!
//! Usage: `transport_admin_gateway [--env dev] [--port 8080]`

use anyhow::Context;

use transport_admin_gateway::config::AppConfig;
use transport_admin_gateway::gateway::{run_server, state::AppState};
use transport_admin_gateway::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env).context("Failed to load configuration")?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    let _log_guard = init_logging(&app_config);
    tracing::info!(
        version = transport_admin_gateway::VERSION,
        "Starting gateway in {} mode",
        env
    );

    let state = AppState::from_config(&app_config)?;
    run_server(&app_config.gateway, state).await
}
