//! Client model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Client record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_at: NaiveDateTime,
}

/// Create client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Client with its visit statistics, computed on demand
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientSummary {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_at: NaiveDateTime,
    pub last_visit: Option<NaiveDateTime>,
    pub total_visits: usize,
    /// Mean number of days between consecutive visits (30 with fewer than 2 visits)
    pub average_interval_days: f64,
    pub next_expected_visit: Option<NaiveDateTime>,
}
