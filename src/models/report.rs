//! Report models

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reporting period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// From Monday 00:00 of the current week up to now
    #[serde(alias = "semana")]
    Week,
    /// Calendar month containing now
    #[serde(alias = "mes")]
    Month,
}

impl Period {
    /// Title used in report headings
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "SEMANAL",
            Period::Month => "MENSUAL",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "semana" => Ok(Period::Week),
            "month" | "mes" => Ok(Period::Month),
            other => Err(format!("Unknown period '{}'", other)),
        }
    }
}

/// The four headline metrics over a set of visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Summary {
    pub total_revenue: Decimal,
    pub unique_client_count: usize,
    pub most_popular_service: String,
    pub most_active_staff: String,
}

/// Metrics over one period window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PeriodReport {
    pub period: Period,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub summary: Summary,
}

impl PeriodReport {
    pub fn period_label(&self) -> &'static str {
        self.period.label()
    }
}

/// Result of running a period report; an empty period is a normal outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Report(PeriodReport),
    NoData { period: Period },
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&PeriodReport> {
        match self {
            ReportOutcome::Report(report) => Some(report),
            ReportOutcome::NoData { .. } => None,
        }
    }
}
