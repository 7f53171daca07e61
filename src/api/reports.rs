//! Report endpoints

use axum::{extract::Path, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Period, PeriodReport, ReportOutcome, Summary},
};

use super::TenantServices;

/// Period report; `report` is absent when the period has no visits
#[derive(Serialize, ToSchema)]
pub struct ReportResponse {
    pub period: Period,
    pub has_data: bool,
    pub report: Option<PeriodReport>,
}

impl From<ReportOutcome> for ReportResponse {
    fn from(outcome: ReportOutcome) -> Self {
        match outcome {
            ReportOutcome::Report(report) => Self {
                period: report.period,
                has_data: true,
                report: Some(report),
            },
            ReportOutcome::NoData { period } => Self {
                period,
                has_data: false,
                report: None,
            },
        }
    }
}

/// Summary over every visit
#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub has_data: bool,
    pub summary: Option<Summary>,
}

/// Weekly or monthly report relative to the current time
#[utoipa::path(
    get,
    path = "/reports/{period}",
    tag = "reports",
    params(("period" = Period, Path, description = "week or month")),
    responses(
        (status = 200, description = "Period report", body = ReportResponse)
    )
)]
pub async fn get_period_report(
    TenantServices(services): TenantServices,
    Path(period): Path<Period>,
) -> AppResult<Json<ReportResponse>> {
    let outcome = services.visits.report(period, crate::local_now()).await?;
    Ok(Json(outcome.into()))
}

/// Summary over the whole dataset
#[utoipa::path(
    get,
    path = "/summary",
    tag = "reports",
    responses(
        (status = 200, description = "Whole-data summary", body = SummaryResponse)
    )
)]
pub async fn get_summary(TenantServices(services): TenantServices) -> AppResult<Json<SummaryResponse>> {
    let summary = services.visits.summary().await?;
    Ok(Json(SummaryResponse {
        has_data: summary.is_some(),
        summary,
    }))
}
