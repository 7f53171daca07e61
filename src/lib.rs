//! Barberia: visit records and periodic reports for a small barbershop
//!
//! The same core (registration, frequency estimation, period reports and
//! spreadsheet export) is served by an interactive console menu over a CSV
//! file and by a web application over SQLite, one database per tenant.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use chrono::{Local, NaiveDateTime};
use minijinja::Environment;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod repository;
pub mod services;
pub mod store;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use services::tenants::TenantResolver;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub tenants: TenantResolver,
    pub templates: Arc<Environment<'static>>,
}

/// Current wall-clock time in the local zone; all timestamps are naive local
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Visits
        .route("/visits", get(api::visits::list_visits).post(api::visits::create_visit))
        // Reports
        .route("/reports/:period", get(api::reports::get_period_report))
        .route("/summary", get(api::reports::get_summary))
        // Clients
        .route("/clients", get(api::clients::list_clients).post(api::clients::create_client))
        // Service catalog
        .route("/services", get(api::catalog::list_services))
        .with_state(state.clone());

    let pages = Router::new()
        .route("/", get(web::pages::index))
        .route("/visits/new", get(web::pages::new_visit).post(web::pages::submit_visit))
        .route("/reports", get(web::pages::reports))
        .route("/clients", get(web::pages::clients))
        .route("/export.xlsx", get(web::pages::export_xlsx))
        .with_state(state);

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .merge(api::openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
