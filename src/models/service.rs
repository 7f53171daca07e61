//! Service catalog model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entries inserted when the catalog is empty, prices in cents
pub const DEFAULT_CATALOG: [(&str, i64); 4] = [
    ("Corte de pelo", 1500),
    ("Afeitado", 1000),
    ("Tinte", 2500),
    ("Corte y barba", 2200),
];

/// Service offered by the barbershop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}
