//! Two-sheet spreadsheet: raw records and the whole-data summary

use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    error::{AppResult, StoreError},
    models::{Summary, VisitRecord},
    store::csv_file::{format_sequence, COLUMNS, TIMESTAMP_FORMAT},
};

use super::format_currency;

pub const RECORDS_SHEET: &str = "Registros";
pub const SUMMARY_SHEET: &str = "Resumen";
const SUMMARY_HEADER: [&str; 2] = ["Métrica", "Valor"];

/// Label/value rows of the summary sheet
pub fn summary_rows(summary: &Summary) -> [(&'static str, String); 4] {
    [
        ("Ingresos Totales", format_currency(summary.total_revenue)),
        ("Clientes Únicos", summary.unique_client_count.to_string()),
        ("Servicio Más Popular", summary.most_popular_service.clone()),
        ("Profesional Más Activo", summary.most_active_staff.clone()),
    ]
}

/// Numeric cell value of an amount; an amount `f64` cannot hold is an error
pub fn amount_cell(amount: Decimal) -> Result<f64, StoreError> {
    amount
        .to_f64()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StoreError::Decode(format!("amount {} cannot be written as a number", amount)))
}

/// Build the workbook; `summary` must already be computed over `records`.
pub fn build_workbook(records: &[VisitRecord], summary: &Summary) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name(RECORDS_SHEET)?;
    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }
    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, record.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        sheet.write_string(row, 1, &record.client_name)?;
        sheet.write_string(row, 2, &record.service_name)?;
        sheet.write_string(row, 3, &record.staff_name)?;
        sheet.write_string(row, 4, &record.payment_method)?;
        sheet.write_number(row, 5, amount_cell(record.amount)?)?;
        sheet.write_string(row, 6, format_sequence(record.visit_sequence_number))?;
    }

    let sheet = workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
    for (col, name) in (0u16..).zip(SUMMARY_HEADER) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }
    for (row, (label, value)) in (1u32..).zip(summary_rows(summary)) {
        sheet.write_string(row, 0, label)?;
        sheet.write_string(row, 1, value)?;
    }

    Ok(workbook)
}
