//! Visit service over the relational store

use chrono::NaiveDateTime;

use crate::{
    error::AppResult,
    models::{NewVisit, Period, ReportOutcome, Summary, VisitRecord},
    repository::Repository,
    services::{exports, registrar, reports},
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a visit at `at`
    pub async fn register(&self, visit: NewVisit, at: NaiveDateTime) -> AppResult<VisitRecord> {
        registrar::register_visit(&self.repository.visits, visit, at).await
    }

    /// All visits in insertion order
    pub async fn list(&self) -> AppResult<Vec<VisitRecord>> {
        self.repository.visits.list_records().await
    }

    /// Weekly or monthly report relative to `now`
    pub async fn report(&self, period: Period, now: NaiveDateTime) -> AppResult<ReportOutcome> {
        reports::generate_report(&self.repository.visits, period, now).await
    }

    /// Summary over every stored visit
    pub async fn summary(&self) -> AppResult<Option<Summary>> {
        reports::overall_summary(&self.repository.visits).await
    }

    /// Two-sheet spreadsheet of every visit, `None` when there is nothing to export
    pub async fn spreadsheet(&self) -> AppResult<Option<Vec<u8>>> {
        exports::spreadsheet_bytes(&self.repository.visits).await
    }
}
