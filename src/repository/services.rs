//! Service catalog repository

use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use super::decode_decimal;
use crate::{error::AppResult, models::Service};

#[derive(Clone)]
pub struct ServicesRepository {
    pool: Pool<Sqlite>,
}

fn service_from_row(row: &SqliteRow) -> AppResult<Service> {
    Ok(Service {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: decode_decimal(row.try_get::<&str, _>("price")?)?,
    })
}

impl ServicesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List the catalog, in insertion order
    pub async fn list(&self) -> AppResult<Vec<Service>> {
        sqlx::query("SELECT id, name, price FROM services ORDER BY id")
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(service_from_row)
            .collect()
    }

    /// Get a service by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Service>> {
        sqlx::query("SELECT id, name, price FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(service_from_row)
            .transpose()
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a catalog entry unless the name already exists
    pub async fn insert_if_absent(&self, name: &str, price: Decimal) -> AppResult<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO services (name, price) VALUES (?, ?)")
            .bind(name)
            .bind(price.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
