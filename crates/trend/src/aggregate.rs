//! Pooled daily means and the alert state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use scout_common::{Survey, ALERT_THRESHOLD};

/// Mean pest pressure over every observation sharing one calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub mean: f64,
    /// Number of observations pooled into the mean.
    pub count: usize,
}

/// Whether any daily mean reached the alert threshold, and where.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertState {
    pub triggered: bool,
    /// Dates whose mean is at or above the threshold, chronological.
    pub dates: Vec<NaiveDate>,
}

/// The aggregated trend: one mean per calendar date plus the alert state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSummary {
    pub daily: Vec<DailyMean>,
    pub alert: AlertState,
}

impl TrendSummary {
    /// `(date, mean)` pairs in chart input order.
    pub fn points(&self) -> Vec<(NaiveDate, f64)> {
        self.daily.iter().map(|d| (d.date, d.mean)).collect()
    }
}

/// Pool every slice's observations by calendar date and compute per-date
/// arithmetic means.
///
/// Dates pool across slices: two slices sampled on the same day feed one
/// mean. The `BTreeMap` keying keeps the output chronological. An empty
/// survey yields an empty summary with the alert untriggered.
pub fn summarize(survey: &Survey) -> TrendSummary {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for o in survey.all_observations() {
        let entry = buckets.entry(o.date).or_insert((0.0, 0));
        entry.0 += o.value;
        entry.1 += 1;
    }

    let daily: Vec<DailyMean> = buckets
        .into_iter()
        .map(|(date, (sum, count))| DailyMean {
            date,
            mean: sum / count as f64,
            count,
        })
        .collect();

    let dates: Vec<NaiveDate> = daily
        .iter()
        .filter(|d| d.mean >= ALERT_THRESHOLD)
        .map(|d| d.date)
        .collect();

    let alert = AlertState {
        triggered: !dates.is_empty(),
        dates,
    };

    if alert.triggered {
        tracing::info!(
            "alert threshold {} reached on {} date(s)",
            ALERT_THRESHOLD,
            alert.dates.len()
        );
    }

    TrendSummary { daily, alert }
}
