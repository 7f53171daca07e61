//! Service catalog endpoints

use axum::Json;

use crate::{error::AppResult, models::Service};

use super::TenantServices;

/// List the services offered
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses(
        (status = 200, description = "Service catalog", body = Vec<Service>)
    )
)]
pub async fn list_services(TenantServices(services): TenantServices) -> AppResult<Json<Vec<Service>>> {
    Ok(Json(services.catalog.list().await?))
}
