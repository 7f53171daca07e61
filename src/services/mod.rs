//! Business logic services

pub mod catalog;
pub mod clients;
pub mod exports;
pub mod frequency;
pub mod registrar;
pub mod reports;
pub mod tenants;
pub mod visits;

use crate::repository::Repository;

/// Container for the services of one resolved store
#[derive(Clone)]
pub struct Services {
    pub visits: visits::VisitsService,
    pub clients: clients::ClientsService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            visits: visits::VisitsService::new(repository.clone()),
            clients: clients::ClientsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
