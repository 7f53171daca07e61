//! JSON API handlers

pub mod catalog;
pub mod clients;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod visits;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};

use crate::{error::AppError, services::Services, AppState};

/// Extractor for the services of the store selected by the request host
pub struct TenantServices(pub Services);

#[async_trait]
impl FromRequestParts<AppState> for TenantServices {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| parts.uri.host());

        let repository = state.tenants.resolve(host).await?;
        Ok(TenantServices(Services::new(repository)))
    }
}
