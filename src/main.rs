//! Barberia web server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;

use barberia::{
    config::AppConfig,
    create_router,
    logging::{self, LogTarget},
    repository::Repository,
    services::{catalog::CatalogService, tenants::TenantResolver},
    web, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    logging::init(&config.logging, LogTarget::Stdout);

    tracing::info!("Starting Barberia Server v{}", env!("CARGO_PKG_VERSION"));

    // Open and migrate the main database
    let repository = Repository::connect(&config.database)
        .await
        .context("Failed to open database")?;
    tracing::info!(url = %config.database.url, "Database ready");

    CatalogService::new(repository.clone())
        .seed_defaults()
        .await
        .context("Failed to seed service catalog")?;

    let templates = web::templates::environment().context("Failed to compile templates")?;

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        tenants: TenantResolver::new(repository, config.tenants),
        templates: Arc::new(templates),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
