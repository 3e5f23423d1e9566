//! Gateway entry point
//!
//! Routing table, validation at the edge, and translation of service results
//! into HTTP responses.
//!
//! ```text
//! client ──▶ Router ──▶ handlers (validate) ──▶ services ──▶ downstream
//!                                   ▲                            │
//!                                   └────── ApiError / body ◀────┘
//! ```

pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use state::AppState;

/// Build the full router: user and bill routes, health, and API docs.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Literal segments (`add`, `all`, `delete`) take precedence over the
    // `{externalId}` capture in axum's router.
    let user_routes = Router::new()
        .route("/add", post(handlers::create_user))
        .route("/all", get(handlers::list_users))
        .route("/delete", delete(handlers::delete_all_users))
        .route(
            "/{externalId}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .post(handlers::reestablish_user),
        )
        .route("/{externalId}/delete", delete(handlers::delete_user));

    let bill_routes = Router::new()
        .route("/add", post(handlers::create_bill))
        .route("/all", get(handlers::list_bills))
        .route("/delete", delete(handlers::delete_all_bills))
        .route(
            "/{externalId}",
            get(handlers::get_bill)
                .put(handlers::update_bill)
                .post(handlers::reestablish_bill),
        )
        .route("/{externalId}/delete", delete(handlers::delete_bill));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1/users", user_routes)
        .nest("/v1/bills", bill_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Bind and serve until Ctrl-C.
pub async fn run_server(config: &GatewayConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Failed to parse bind address")?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    let app = build_router(Arc::new(state));

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
