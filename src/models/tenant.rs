//! Tenant model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A barbershop served from its own subdomain and database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    /// e.g. `mibarberia` for mibarberia.example.com
    pub subdomain: String,
    pub created_at: NaiveDateTime,
}
