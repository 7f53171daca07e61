//! Service catalog

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{service::DEFAULT_CATALOG, Service},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Service>> {
        self.repository.services.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Service> {
        self.repository
            .services
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    /// Insert the default catalog when no service exists yet
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        if self.repository.services.count().await? > 0 {
            return Ok(0);
        }
        let mut inserted = 0;
        for (name, cents) in DEFAULT_CATALOG {
            if self
                .repository
                .services
                .insert_if_absent(name, Decimal::new(cents, 2))
                .await?
            {
                inserted += 1;
            }
        }
        tracing::info!(inserted, "Seeded service catalog");
        Ok(inserted)
    }
}
