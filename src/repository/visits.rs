//! Visits repository (relational backing of the visit store)

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use super::decode_decimal;
use crate::{
    error::{AppError, AppResult},
    models::{VisitEntry, VisitRecord},
    store::{next_sequence, VisitStore},
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Sqlite>,
}

fn record_from_row(row: &SqliteRow) -> AppResult<VisitRecord> {
    let visit_number: i64 = row.try_get("visit_number")?;
    Ok(VisitRecord {
        timestamp: row.try_get("visited_at")?,
        client_name: row.try_get("client_name")?,
        service_name: row.try_get("service_name")?,
        staff_name: row.try_get("staff_name")?,
        payment_method: row.try_get("payment_method")?,
        amount: decode_decimal(row.try_get::<&str, _>("amount")?)?,
        visit_sequence_number: u32::try_from(visit_number)
            .map_err(|_| AppError::Internal(format!("invalid visit number {}", visit_number)))?,
    })
}

impl VisitsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// All visits joined with client and service names, in insertion order
    pub async fn list_records(&self) -> AppResult<Vec<VisitRecord>> {
        sqlx::query(
            r#"
            SELECT v.visited_at, c.name AS client_name, s.name AS service_name,
                   v.staff_name, v.payment_method, v.amount, v.visit_number
            FROM visits v
            JOIN clients c ON v.client_id = c.id
            JOIN services s ON v.service_id = s.id
            ORDER BY v.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(record_from_row)
        .collect()
    }

    /// Insert a visit numbered as its client's next one, creating the client
    /// on first sight.
    ///
    /// The first statement of the transaction is a write, so the database
    /// write lock is held before the prior visits are counted and concurrent
    /// inserts queue on the busy timeout instead of reading the same count.
    /// The service must exist in the catalog (matched case-insensitively);
    /// the stored record carries the catalog spelling.
    pub async fn insert(&self, entry: &VisitEntry) -> AppResult<VisitRecord> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO clients (name, registered_at)
            SELECT ?, ?
            WHERE NOT EXISTS (SELECT 1 FROM clients WHERE name = ?)
            "#,
        )
        .bind(&entry.client_name)
        .bind(entry.timestamp)
        .bind(&entry.client_name)
        .execute(&mut *tx)
        .await?;

        let client_id: i64 =
            sqlx::query_scalar("SELECT id FROM clients WHERE name = ? ORDER BY id LIMIT 1")
                .bind(&entry.client_name)
                .fetch_one(&mut *tx)
                .await?;

        let service: Option<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM services WHERE lower(name) = lower(?)")
                .bind(&entry.service_name)
                .fetch_optional(&mut *tx)
                .await?;
        let (service_id, service_name) = service.ok_or_else(|| {
            AppError::Validation(format!("Servicio desconocido: '{}'", entry.service_name))
        })?;

        let prior: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM visits v
            JOIN clients c ON v.client_id = c.id
            WHERE c.name = ?
            "#,
        )
        .bind(&entry.client_name)
        .fetch_one(&mut *tx)
        .await?;
        let visit_number = next_sequence(usize::try_from(prior).unwrap_or(usize::MAX));

        sqlx::query(
            r#"
            INSERT INTO visits (visited_at, client_id, service_id, staff_name, payment_method, amount, visit_number)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.timestamp)
        .bind(client_id)
        .bind(service_id)
        .bind(&entry.staff_name)
        .bind(&entry.payment_method)
        .bind(entry.amount.to_string())
        .bind(i64::from(visit_number))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(VisitEntry {
            service_name,
            ..entry.clone()
        }
        .numbered(visit_number))
    }
}

#[async_trait]
impl VisitStore for VisitsRepository {
    async fn load_all(&self) -> AppResult<Vec<VisitRecord>> {
        self.list_records().await
    }

    async fn append(&self, entry: VisitEntry) -> AppResult<VisitRecord> {
        self.insert(&entry).await
    }
}
