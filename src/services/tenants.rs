//! Per-subdomain store resolution
//!
//! The core never looks at hosts or tenants: request handlers resolve a
//! [`Repository`] here and hand it to the services.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::TenantsConfig,
    error::{AppResult, StoreError},
    repository::Repository,
    services::catalog::CatalogService,
};

const TENANT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct TenantResolver {
    main: Repository,
    config: TenantsConfig,
    open: Arc<RwLock<HashMap<String, Repository>>>,
}

/// First DNS label of a `Host` header value, without the port
pub fn subdomain_of(host: &str) -> Option<&str> {
    let host = host.split(':').next()?;
    let label = host.split('.').next()?;
    let valid = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then_some(label)
}

impl TenantResolver {
    pub fn new(main: Repository, config: TenantsConfig) -> Self {
        Self {
            main,
            config,
            open: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The main database, also holding the tenant table
    pub fn main(&self) -> &Repository {
        &self.main
    }

    /// Repository serving a request for `host`; the main one unless the
    /// subdomain belongs to a registered tenant.
    pub async fn resolve(&self, host: Option<&str>) -> AppResult<Repository> {
        if !self.config.enabled {
            return Ok(self.main.clone());
        }
        let Some(subdomain) = host.and_then(subdomain_of) else {
            return Ok(self.main.clone());
        };

        if let Some(repository) = self.open.read().await.get(subdomain) {
            return Ok(repository.clone());
        }

        // Looked up on every miss: tenants registered while running are picked up
        let Some(tenant) = self.main.tenants.find_by_subdomain(subdomain).await? else {
            return Ok(self.main.clone());
        };

        let mut open = self.open.write().await;
        if let Some(repository) = open.get(&tenant.subdomain) {
            return Ok(repository.clone());
        }

        std::fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| StoreError::io(&self.config.data_dir, e))?;
        let path = self.config.data_dir.join(format!("{}.db", tenant.subdomain));
        let repository = Repository::connect_file(&path, TENANT_MAX_CONNECTIONS).await?;
        CatalogService::new(repository.clone()).seed_defaults().await?;
        tracing::info!(tenant = %tenant.name, path = %path.display(), "Opened tenant database");

        open.insert(tenant.subdomain, repository.clone());
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_repository;
    use chrono::NaiveDate;

    #[test]
    fn test_subdomain_of() {
        assert_eq!(subdomain_of("mibarberia.example.com"), Some("mibarberia"));
        assert_eq!(subdomain_of("localhost:5001"), Some("localhost"));
        assert_eq!(subdomain_of("../etc.example.com"), None);
        assert_eq!(subdomain_of(""), None);
    }

    #[tokio::test]
    async fn test_unknown_host_uses_main_store() {
        let dir = tempfile::tempdir().unwrap();
        let main = test_repository().await;
        let resolver = TenantResolver::new(
            main.clone(),
            TenantsConfig {
                enabled: true,
                data_dir: dir.path().to_path_buf(),
            },
        );

        let repo = resolver.resolve(Some("otra.example.com")).await.unwrap();
        repo.services
            .insert_if_absent("Tinte", rust_decimal::Decimal::new(2500, 2))
            .await
            .unwrap();
        assert_eq!(main.services.count().await.unwrap(), 1);
        assert!(resolver.resolve(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_tenant_gets_its_own_seeded_store() {
        let dir = tempfile::tempdir().unwrap();
        let main = test_repository().await;
        let created = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        main.tenants
            .create("Mi Barberia", "mibarberia", created)
            .await
            .unwrap();
        let resolver = TenantResolver::new(
            main.clone(),
            TenantsConfig {
                enabled: true,
                data_dir: dir.path().to_path_buf(),
            },
        );

        let tenant_repo = resolver.resolve(Some("mibarberia.example.com:5001")).await.unwrap();

        assert!(dir.path().join("mibarberia.db").exists());
        assert_eq!(tenant_repo.services.count().await.unwrap(), 4);
        assert_eq!(main.services.count().await.unwrap(), 0);

        let again = resolver.resolve(Some("mibarberia.example.com")).await.unwrap();
        assert_eq!(again.services.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_tenant_registered_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let main = test_repository().await;
        let resolver = TenantResolver::new(
            main.clone(),
            TenantsConfig {
                enabled: true,
                data_dir: dir.path().to_path_buf(),
            },
        );

        resolver.resolve(Some("nueva.example.com")).await.unwrap();
        assert!(!dir.path().join("nueva.db").exists());

        let created = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        main.tenants.create("Nueva", "nueva", created).await.unwrap();

        let repo = resolver.resolve(Some("nueva.example.com")).await.unwrap();
        assert!(dir.path().join("nueva.db").exists());
        assert_eq!(repo.services.count().await.unwrap(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_requests_open_tenant_once() {
        let dir = tempfile::tempdir().unwrap();
        let main = test_repository().await;
        let created = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        main.tenants.create("Nueva", "nueva", created).await.unwrap();
        let resolver = TenantResolver::new(
            main,
            TenantsConfig {
                enabled: true,
                data_dir: dir.path().to_path_buf(),
            },
        );

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move { resolver.resolve(Some("nueva.example.com")).await })
            })
            .collect();
        for task in tasks {
            let repo = task.await.unwrap().unwrap();
            assert_eq!(repo.services.count().await.unwrap(), 4);
        }
        assert_eq!(resolver.open.read().await.len(), 1);
    }
}
