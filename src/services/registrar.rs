//! Visit registration

use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{NewVisit, VisitEntry, VisitRecord},
    store::VisitStore,
};

/// Trim and title-case free text: the first letter of every run of letters
/// is upper-cased, the rest lower-cased ("  ana maría o'neil" -> "Ana María O'Neil").
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Parse a non-negative currency amount such as `25.50` or `$ 25.50`
pub fn parse_amount(raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let amount = Decimal::from_str(digits).map_err(|_| {
        AppError::Validation(format!("Ingrese un monto válido (ej: 25.50), no '{}'", raw.trim()))
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::Validation(format!(
            "El monto no puede ser negativo: {}",
            amount
        )));
    }
    Ok(amount)
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// Validate and append one visit.
///
/// The amount is validated before the store is touched, so a malformed
/// amount never mutates it. The store numbers the visit as the client's
/// next one (prior records for the normalized name plus one) within the
/// same write, so concurrent registrations for a client stay gapless.
pub async fn register_visit<S>(store: &S, visit: NewVisit, at: NaiveDateTime) -> AppResult<VisitRecord>
where
    S: VisitStore + ?Sized,
{
    let amount = parse_amount(&visit.amount)?;

    let entry = VisitEntry {
        timestamp: truncate_to_minute(at),
        client_name: normalize_text(&visit.client_name),
        service_name: normalize_text(&visit.service_name),
        staff_name: normalize_text(&visit.staff_name),
        payment_method: normalize_text(&visit.payment_method),
        amount,
    };

    let stored = store.append(entry).await?;
    tracing::info!(
        client = %stored.client_name,
        visit = stored.visit_sequence_number,
        amount = %stored.amount,
        "Visit registered"
    );
    Ok(stored)
}
