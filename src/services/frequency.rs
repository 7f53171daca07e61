//! Client visit-frequency estimation

use chrono::{Duration, NaiveDateTime};

/// Interval assumed for clients with fewer than two visits
pub const DEFAULT_INTERVAL_DAYS: f64 = 30.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Visit rhythm of one client, recomputed on demand and never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitFrequency {
    pub total_visits: usize,
    pub last_visit: Option<NaiveDateTime>,
    pub average_interval_days: f64,
    pub next_expected_visit: Option<NaiveDateTime>,
}

/// Mean of the whole-day gaps between consecutive visits.
///
/// `history` must be sorted oldest first.
pub fn average_interval_days(history: &[NaiveDateTime]) -> f64 {
    if history.len() < 2 {
        return DEFAULT_INTERVAL_DAYS;
    }
    let total: i64 = history
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .sum();
    total as f64 / (history.len() - 1) as f64
}

/// Estimate interval and next expected visit from a sorted visit history
pub fn estimate(history: &[NaiveDateTime]) -> VisitFrequency {
    let average_interval_days = average_interval_days(history);
    let last_visit = history.last().copied();
    VisitFrequency {
        total_visits: history.len(),
        last_visit,
        average_interval_days,
        next_expected_visit: last_visit.map(|last| last + days(average_interval_days)),
    }
}

fn days(value: f64) -> Duration {
    Duration::seconds((value * SECONDS_PER_DAY).round() as i64)
}
