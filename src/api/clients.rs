//! Client endpoints

use axum::{http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{Client, ClientSummary, CreateClient},
};

use super::TenantServices;

/// List clients with their visit frequency estimates
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    responses(
        (status = 200, description = "Clients", body = Vec<ClientSummary>)
    )
)]
pub async fn list_clients(TenantServices(services): TenantServices) -> AppResult<Json<Vec<ClientSummary>>> {
    Ok(Json(services.clients.list().await?))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid client data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_client(
    TenantServices(services): TenantServices,
    Json(data): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = services.clients.create(data, crate::local_now()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}
