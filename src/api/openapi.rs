//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{catalog, clients, health, reports, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Barberia API",
        version = "2.0.0",
        description = "Visit records and periodic reports for a barbershop"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        visits::list_visits,
        visits::create_visit,
        reports::get_period_report,
        reports::get_summary,
        clients::list_clients,
        clients::create_client,
        catalog::list_services,
    ),
    components(
        schemas(
            crate::models::VisitRecord,
            crate::models::NewVisit,
            crate::models::Client,
            crate::models::ClientSummary,
            crate::models::CreateClient,
            crate::models::Service,
            crate::models::Period,
            crate::models::PeriodReport,
            crate::models::Summary,
            reports::ReportResponse,
            reports::SummaryResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visits", description = "Visit registration"),
        (name = "reports", description = "Weekly, monthly and whole-data reports"),
        (name = "clients", description = "Client directory"),
        (name = "services", description = "Service catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
