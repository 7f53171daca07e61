//! Console text rendering

use crate::models::{ReportOutcome, VisitRecord};

use super::{format_currency, DISPLAY_DATE_FORMAT};

const RULE_WIDTH: usize = 50;

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Render a period report the way the console menu prints it
pub fn render_report(outcome: &ReportOutcome) -> String {
    let report = match outcome {
        ReportOutcome::Report(report) => report,
        ReportOutcome::NoData { period } => {
            return format!("⚠️ No hay datos para el período {}", period.label());
        }
    };
    let summary = &report.summary;
    let rule = rule(RULE_WIDTH);

    [
        rule.clone(),
        format!(
            "REPORTE {} - {}",
            report.period_label(),
            report.window_end.format(DISPLAY_DATE_FORMAT)
        ),
        rule.clone(),
        format!("📊 Ingresos totales: {}", format_currency(summary.total_revenue)),
        format!("👥 Clientes únicos: {}", summary.unique_client_count),
        format!("✂️ Servicio más popular: {}", summary.most_popular_service),
        format!("💈 Profesional más activo: {}", summary.most_active_staff),
        format!(
            "📅 Período: {} - {}",
            report.window_start.format(DISPLAY_DATE_FORMAT),
            report.window_end.format(DISPLAY_DATE_FORMAT)
        ),
        rule,
    ]
    .join("\n")
}

/// Confirmation printed after a registration
pub fn render_registration(record: &VisitRecord) -> String {
    format!(
        "✅ Visita registrada exitosamente! {} - visita #{} ({})",
        record.client_name,
        record.visit_sequence_number,
        format_currency(record.amount)
    )
}
