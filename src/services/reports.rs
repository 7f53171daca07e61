//! Period reports and whole-data summaries
//!
//! Aggregation lives here only; the console, spreadsheet and HTML renderers
//! format what these functions return.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{Period, PeriodReport, ReportOutcome, Summary, VisitRecord},
    store::VisitStore,
};

/// Start and end of the reporting window containing `now`.
///
/// Week: Monday 00:00 of the current week up to `now`.
/// Month: the first day of the month at 00:00 up to `now`.
pub fn window(period: Period, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let today = now.date();
    let start = match period {
        Period::Week => today - Duration::days(i64::from(today.weekday().num_days_from_monday())),
        Period::Month => today - Duration::days(i64::from(today.day0())),
    };
    (start.and_time(NaiveTime::MIN), now)
}

fn in_period(period: Period, timestamp: NaiveDateTime, start: NaiveDateTime, now: NaiveDateTime) -> bool {
    match period {
        Period::Week => timestamp >= start && timestamp <= now,
        Period::Month => timestamp.year() == now.year() && timestamp.month() == now.month(),
    }
}

/// Most frequent value; ties resolve to the value seen first.
pub fn most_frequent<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&'a str, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

/// The four headline metrics, or `None` when there is nothing to summarize
pub fn summarize<'a, I>(records: I) -> Option<Summary>
where
    I: IntoIterator<Item = &'a VisitRecord>,
{
    let records: Vec<&VisitRecord> = records.into_iter().collect();
    if records.is_empty() {
        return None;
    }

    let total_revenue: Decimal = records.iter().map(|r| r.amount).sum();
    let unique_client_count = records
        .iter()
        .map(|r| r.client_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let most_popular_service = most_frequent(records.iter().map(|r| r.service_name.as_str()))?;
    let most_active_staff = most_frequent(records.iter().map(|r| r.staff_name.as_str()))?;

    Some(Summary {
        total_revenue,
        unique_client_count,
        most_popular_service: most_popular_service.to_string(),
        most_active_staff: most_active_staff.to_string(),
    })
}

/// Filter `records` to the period containing `now` and aggregate them
pub fn period_report(records: &[VisitRecord], period: Period, now: NaiveDateTime) -> ReportOutcome {
    let (window_start, window_end) = window(period, now);
    let selected = records
        .iter()
        .filter(|r| in_period(period, r.timestamp, window_start, window_end));

    match summarize(selected) {
        Some(summary) => ReportOutcome::Report(PeriodReport {
            period,
            window_start,
            window_end,
            summary,
        }),
        None => ReportOutcome::NoData { period },
    }
}

/// Load every record from `store` and build the period report
pub async fn generate_report<S>(store: &S, period: Period, now: NaiveDateTime) -> AppResult<ReportOutcome>
where
    S: VisitStore + ?Sized,
{
    let records = store.load_all().await?;
    let outcome = period_report(&records, period, now);
    match &outcome {
        ReportOutcome::Report(report) => tracing::info!(
            period = %period,
            revenue = %report.summary.total_revenue,
            clients = report.summary.unique_client_count,
            "Report generated"
        ),
        ReportOutcome::NoData { .. } => {
            tracing::info!(period = %period, total_records = records.len(), "No data for period")
        }
    }
    Ok(outcome)
}

/// Summary over the entire store, not scoped to a period
pub async fn overall_summary<S>(store: &S) -> AppResult<Option<Summary>>
where
    S: VisitStore + ?Sized,
{
    let records = store.load_all().await?;
    Ok(summarize(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn visit(timestamp: NaiveDateTime, client: &str, service: &str, staff: &str, cents: i64) -> VisitRecord {
        VisitRecord {
            timestamp,
            client_name: client.to_string(),
            service_name: service.to_string(),
            staff_name: staff.to_string(),
            payment_method: "Efectivo".to_string(),
            amount: Decimal::new(cents, 2),
            visit_sequence_number: 1,
        }
    }

    #[test]
    fn test_week_window_starts_on_monday_midnight() {
        // 2024-03-07 is a Thursday
        let (start, end) = window(Period::Week, at(2024, 3, 7, 15));
        assert_eq!(start, at(2024, 3, 4, 0));
        assert_eq!(end, at(2024, 3, 7, 15));

        let (start, _) = window(Period::Week, at(2024, 3, 4, 9));
        assert_eq!(start, at(2024, 3, 4, 0));
    }

    #[test]
    fn test_month_window_starts_on_first_day() {
        let (start, end) = window(Period::Month, at(2024, 2, 29, 18));
        assert_eq!(start, at(2024, 2, 1, 0));
        assert_eq!(end, at(2024, 2, 29, 18));
    }

    #[test]
    fn test_empty_store_has_no_data() {
        let outcome = period_report(&[], Period::Week, at(2024, 3, 7, 15));
        assert_eq!(outcome, ReportOutcome::NoData { period: Period::Week });
    }

    #[test]
    fn test_empty_period_has_no_data() {
        let records = vec![visit(at(2024, 1, 10, 10), "Ana", "Corte", "Luis", 1500)];
        let outcome = period_report(&records, Period::Month, at(2024, 3, 7, 15));
        assert_eq!(outcome, ReportOutcome::NoData { period: Period::Month });
    }

    #[test]
    fn test_revenue_counts_only_records_in_window() {
        let now = at(2024, 3, 7, 15);
        let mut records = vec![
            visit(at(2024, 3, 4, 10), "Ana", "Corte", "Luis", 1500),
            visit(at(2024, 3, 6, 10), "Beto", "Barba", "Luis", 1000),
            visit(at(2024, 3, 3, 10), "Ana", "Corte", "Marta", 2000),
        ];

        let report = period_report(&records, Period::Week, now);
        assert_eq!(report.report().unwrap().summary.total_revenue, Decimal::new(2500, 2));

        records[1].timestamp = at(2024, 2, 28, 10);
        let report = period_report(&records, Period::Week, now);
        assert_eq!(report.report().unwrap().summary.total_revenue, Decimal::new(1500, 2));
    }

    #[test]
    fn test_week_excludes_records_after_now() {
        let records = vec![
            visit(at(2024, 3, 5, 10), "Ana", "Corte", "Luis", 1500),
            visit(at(2024, 3, 8, 10), "Beto", "Corte", "Luis", 1500),
        ];
        let outcome = period_report(&records, Period::Week, at(2024, 3, 7, 15));
        assert_eq!(outcome.report().unwrap().summary.unique_client_count, 1);
    }

    #[test]
    fn test_month_filter_checks_the_year() {
        let records = vec![
            visit(at(2023, 3, 15, 10), "Ana", "Corte", "Luis", 1500),
            visit(at(2024, 3, 2, 10), "Beto", "Barba", "Marta", 1000),
        ];
        let report = period_report(&records, Period::Month, at(2024, 3, 7, 15));
        let summary = &report.report().unwrap().summary;
        assert_eq!(summary.total_revenue, Decimal::new(1000, 2));
        assert_eq!(summary.most_popular_service, "Barba");
    }

    #[test]
    fn test_three_mondays_weekly_report() {
        let records: Vec<VisitRecord> = [4, 11, 18]
            .into_iter()
            .map(|day| visit(at(2024, 3, day, 10), "Ana", "Corte", "Luis", 1500))
            .collect();

        let outcome = period_report(&records, Period::Week, at(2024, 3, 18, 12));
        let report = outcome.report().unwrap();
        assert_eq!(report.period_label(), "SEMANAL");
        assert_eq!(report.summary.unique_client_count, 1);
        assert_eq!(report.summary.most_popular_service, "Corte");
        assert_eq!(report.summary.total_revenue, Decimal::new(1500, 2));
    }

    #[test]
    fn test_ties_resolve_to_first_inserted() {
        let now = at(2024, 3, 7, 15);
        let records = vec![
            visit(at(2024, 3, 5, 10), "Ana", "Tinte", "Marta", 2500),
            visit(at(2024, 3, 5, 11), "Beto", "Corte", "Luis", 1500),
            visit(at(2024, 3, 6, 10), "Caro", "Corte", "Luis", 1500),
            visit(at(2024, 3, 6, 11), "Dani", "Tinte", "Marta", 2500),
        ];

        let first = period_report(&records, Period::Week, now);
        let second = period_report(&records, Period::Week, now);
        assert_eq!(first, second);

        let summary = &first.report().unwrap().summary;
        assert_eq!(summary.most_popular_service, "Tinte");
        assert_eq!(summary.most_active_staff, "Marta");
    }

    #[test]
    fn test_most_frequent() {
        assert_eq!(most_frequent(["a", "b", "b", "a", "c", "b"]), Some("b"));
        assert_eq!(most_frequent(["x", "y"]), Some("x"));
        assert_eq!(most_frequent(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_summarize_whole_dataset() {
        let records = vec![
            visit(at(2023, 1, 5, 10), "Ana", "Corte", "Luis", 1500),
            visit(at(2024, 3, 6, 10), "Ana", "Barba", "Luis", 1000),
            visit(at(2024, 3, 6, 12), "Beto", "Barba", "Marta", 1000),
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total_revenue, Decimal::new(3500, 2));
        assert_eq!(summary.unique_client_count, 2);
        assert_eq!(summary.most_popular_service, "Barba");
        assert_eq!(summary.most_active_staff, "Luis");
        assert!(summarize(&[]).is_none());
    }
}
