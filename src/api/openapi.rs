//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{entries, health, input};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibchecker API",
        version = "0.2.0",
        description = "Availability reports across public library catalogs",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Reports
        entries::list_entries,
        entries::list_by_library,
        entries::list_libraries,
        entries::list_failures,
        entries::refresh,
        // Input
        input::get_input,
        input::save_input,
    ),
    components(
        schemas(
            // Reports
            crate::models::CatalogEntry,
            crate::models::Holding,
            crate::models::Library,
            crate::models::ExtractionFailure,
            crate::models::FailureKind,
            crate::models::RefreshSummary,
            entries::EntrySort,
            entries::LibraryGroupResponse,
            entries::LibraryItemResponse,
            entries::LibrariesResponse,
            // Input
            input::InputFileResponse,
            input::UpdateInputFile,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reports", description = "Availability reports"),
        (name = "input", description = "Identifier input file")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
