//! Tenants repository

use chrono::NaiveDateTime;
use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::Tenant};

#[derive(Clone)]
pub struct TenantsRepository {
    pool: Pool<Sqlite>,
}

impl TenantsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Find a tenant by subdomain
    pub async fn find_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE subdomain = ?")
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Register a tenant
    pub async fn create(
        &self,
        name: &str,
        subdomain: &str,
        created_at: NaiveDateTime,
    ) -> AppResult<Tenant> {
        let row = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, subdomain, created_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(subdomain)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
