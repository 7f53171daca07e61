//! Display-ready values handed to templates. Formatting only: every figure
//! arrives already aggregated by the report service.

use serde::Serialize;

use crate::{
    models::{ClientSummary, PeriodReport, Service, Summary, VisitRecord},
    render::{format_currency, DISPLAY_DATETIME_FORMAT, DISPLAY_DATE_FORMAT},
};

#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub level: &'static str,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: "success", message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: "warning", message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: "danger", message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub total_revenue: String,
    pub unique_clients: usize,
    pub popular_service: String,
    pub active_staff: String,
}

impl From<&Summary> for SummaryView {
    fn from(summary: &Summary) -> Self {
        Self {
            total_revenue: format_currency(summary.total_revenue),
            unique_clients: summary.unique_client_count,
            popular_service: summary.most_popular_service.clone(),
            active_staff: summary.most_active_staff.clone(),
        }
    }
}

/// `04/03/2024 - 07/03/2024`
pub fn report_range(report: &PeriodReport) -> String {
    format!(
        "{} - {}",
        report.window_start.format(DISPLAY_DATE_FORMAT),
        report.window_end.format(DISPLAY_DATE_FORMAT)
    )
}

#[derive(Debug, Serialize)]
pub struct VisitRow {
    pub date: String,
    pub client: String,
    pub service: String,
    pub staff: String,
    pub payment_method: String,
    pub amount: String,
    pub sequence: u32,
}

impl From<&VisitRecord> for VisitRow {
    fn from(record: &VisitRecord) -> Self {
        Self {
            date: record.timestamp.format(DISPLAY_DATETIME_FORMAT).to_string(),
            client: record.client_name.clone(),
            service: record.service_name.clone(),
            staff: record.staff_name.clone(),
            payment_method: record.payment_method.clone(),
            amount: format_currency(record.amount),
            sequence: record.visit_sequence_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceOption {
    pub id: i64,
    pub label: String,
}

impl From<&Service> for ServiceOption {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            label: format!("{} ({})", service.name, format_currency(service.price)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientRow {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_visits: usize,
    pub last_visit: String,
    pub interval_days: String,
    pub next_visit: String,
}

impl From<&ClientSummary> for ClientRow {
    fn from(client: &ClientSummary) -> Self {
        Self {
            name: client.name.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            email: client.email.clone().unwrap_or_default(),
            total_visits: client.total_visits,
            last_visit: client
                .last_visit
                .map(|t| t.format(DISPLAY_DATETIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            interval_days: format!("{:.1}", client.average_interval_days),
            next_visit: client
                .next_expected_visit
                .map(|t| t.format(DISPLAY_DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
