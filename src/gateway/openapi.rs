//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ErrorBody;
use crate::models::{
    BillPostDto, BillPutDto, BillRecord, SortDirection, UserPostDto, UserPutDto, UserRecord,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transport Admin API Gateway",
        description = "Administrative REST surface over the user and bill services. \
                       Bill creation verifies the owner in the user service first.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        // Users
        crate::gateway::handlers::users::create_user,
        crate::gateway::handlers::users::list_users,
        crate::gateway::handlers::users::get_user,
        crate::gateway::handlers::users::delete_user,
        crate::gateway::handlers::users::delete_all_users,
        crate::gateway::handlers::users::update_user,
        crate::gateway::handlers::users::reestablish_user,
        // Bills
        crate::gateway::handlers::bills::create_bill,
        crate::gateway::handlers::bills::list_bills,
        crate::gateway::handlers::bills::get_bill,
        crate::gateway::handlers::bills::update_bill,
        crate::gateway::handlers::bills::delete_bill,
        crate::gateway::handlers::bills::delete_all_bills,
        crate::gateway::handlers::bills::reestablish_bill,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            UserRecord,
            UserPostDto,
            UserPutDto,
            BillRecord,
            BillPostDto,
            BillPutDto,
            SortDirection,
        )
    ),
    tags(
        (name = "Users", description = "User service passthrough"),
        (name = "Bills", description = "Bill service passthrough and owner-checked creation"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
