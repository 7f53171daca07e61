//! Clients repository

use chrono::NaiveDateTime;
use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::{Client, CreateClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Sqlite>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all clients by name
    pub async fn list(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Find the first client with exactly this name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a client
    pub async fn create(&self, data: &CreateClient, registered_at: NaiveDateTime) -> AppResult<Client> {
        let row = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, phone, email, registered_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(registered_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Visit timestamps of one client, oldest first
    pub async fn visit_history(&self, client_id: i64) -> AppResult<Vec<NaiveDateTime>> {
        let rows: Vec<NaiveDateTime> = sqlx::query_scalar(
            "SELECT visited_at FROM visits WHERE client_id = ? ORDER BY visited_at, id",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
