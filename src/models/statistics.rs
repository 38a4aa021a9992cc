use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::models::status::StatusSet;

pub const HISTOGRAM_DAYS: u64 = 7;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount<S> {
    pub status: S,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Share of `count` in `total` as a percentage rounded to one decimal; 0.0 when `total` is 0.
pub fn percentage(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    ((count as f64 / total as f64) * 1000.0).round() / 10.0
}

/// One entry per status in `S::ALL` order, zero filled.
pub fn status_breakdown<S: StatusSet>(rows: &[(S, i64)], total: i64) -> Vec<StatusCount<S>> {
    S::ALL
        .iter()
        .map(|status| {
            let count = rows
                .iter()
                .filter(|(s, _)| s == status)
                .map(|(_, c)| *c)
                .sum();
            StatusCount {
                status: *status,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

/// First day covered by a histogram ending at `today`.
pub fn histogram_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(HISTOGRAM_DAYS - 1))
        .unwrap_or(today)
}

/// Buckets timestamps into the `HISTOGRAM_DAYS` days ending at `today`, oldest first.
/// Timestamps outside the window are ignored.
pub fn daily_histogram(timestamps: &[DateTime<Utc>], today: NaiveDate) -> Vec<DailyCount> {
    let start = histogram_start(today);
    let mut buckets: HashMap<NaiveDate, i64> = HashMap::new();
    for ts in timestamps {
        let day = ts.date_naive();
        if day >= start && day <= today {
            *buckets.entry(day).or_default() += 1;
        }
    }

    start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|date| DailyCount {
            date,
            count: buckets.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
