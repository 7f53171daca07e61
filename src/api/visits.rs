//! Visit endpoints

use axum::{http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{NewVisit, VisitRecord},
};

use super::TenantServices;

/// List every registered visit
#[utoipa::path(
    get,
    path = "/visits",
    tag = "visits",
    responses(
        (status = 200, description = "Visits in registration order", body = Vec<VisitRecord>)
    )
)]
pub async fn list_visits(TenantServices(services): TenantServices) -> AppResult<Json<Vec<VisitRecord>>> {
    Ok(Json(services.visits.list().await?))
}

/// Register a visit now
#[utoipa::path(
    post,
    path = "/visits",
    tag = "visits",
    request_body = NewVisit,
    responses(
        (status = 201, description = "Visit registered", body = VisitRecord),
        (status = 400, description = "Invalid amount or unknown service", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_visit(
    TenantServices(services): TenantServices,
    Json(visit): Json<NewVisit>,
) -> AppResult<(StatusCode, Json<VisitRecord>)> {
    let record = services.visits.register(visit, crate::local_now()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
