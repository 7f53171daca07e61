//! Visit record model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Payment methods offered by the registration form
pub const PAYMENT_METHODS: [&str; 3] = ["Efectivo", "Tarjeta", "Transferencia"];

/// One transaction between a client and the barbershop.
///
/// Records are write-once: created by the registrar, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitRecord {
    /// Local date and time of the visit (minute precision)
    pub timestamp: NaiveDateTime,
    pub client_name: String,
    pub service_name: String,
    pub staff_name: String,
    pub payment_method: String,
    pub amount: Decimal,
    /// 1-based count of this client's visits up to and including this one
    pub visit_sequence_number: u32,
}

/// A normalized visit not yet stored; the store numbers it on append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEntry {
    pub timestamp: NaiveDateTime,
    pub client_name: String,
    pub service_name: String,
    pub staff_name: String,
    pub payment_method: String,
    pub amount: Decimal,
}

impl VisitEntry {
    pub fn numbered(self, visit_sequence_number: u32) -> VisitRecord {
        VisitRecord {
            timestamp: self.timestamp,
            client_name: self.client_name,
            service_name: self.service_name,
            staff_name: self.staff_name,
            payment_method: self.payment_method,
            amount: self.amount,
            visit_sequence_number,
        }
    }
}

/// Raw visit input, as typed by the user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewVisit {
    pub client_name: String,
    pub service_name: String,
    pub staff_name: String,
    pub payment_method: String,
    /// Amount paid, e.g. "25.50" (a leading `$` is tolerated)
    pub amount: String,
}

/// HTML registration form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisitForm {
    #[validate(length(min = 1, message = "El nombre del cliente es obligatorio"))]
    pub client_name: String,
    pub service_id: i64,
    #[validate(length(min = 1, message = "El profesional es obligatorio"))]
    pub staff_name: String,
    pub payment_method: String,
    #[validate(length(min = 1, message = "El monto es obligatorio"))]
    pub amount: String,
}

impl VisitForm {
    pub fn has_known_payment_method(&self) -> bool {
        PAYMENT_METHODS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(self.payment_method.trim()))
    }

    /// Convert into registrar input once the catalog service has been resolved
    pub fn into_new_visit(self, service_name: String) -> NewVisit {
        NewVisit {
            client_name: self.client_name,
            service_name,
            staff_name: self.staff_name,
            payment_method: self.payment_method,
            amount: self.amount,
        }
    }
}
