//! Queries shared by the lead collections (inquiries, demo bookings, event
//! registrations). Table names are compile-time constants, never user input.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::statistics::{self, DailyCount, StatusCount};
use crate::models::status::StatusSet;

/// Sets `status` and refreshes `updated_at`. Returns `false` when no row has this id.
pub(crate) async fn set_status<S: StatusSet>(
    db: &SqlitePool,
    table: &'static str,
    id: &str,
    status: S,
) -> Result<bool, sqlx::Error> {
    let sql = format!("UPDATE {table} SET status = ?1, updated_at = ?2 WHERE id = ?3");
    let result = sqlx::query(&sql)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Zero-filled per-status breakdown. The total is the sum of the grouped rows,
/// so both always describe the same snapshot.
pub(crate) async fn status_counts<S: StatusSet>(
    db: &SqlitePool,
    table: &'static str,
) -> Result<(i64, Vec<StatusCount<S>>), sqlx::Error> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as(&format!("SELECT status, COUNT(*) FROM {table} GROUP BY status"))
            .fetch_all(db)
            .await?;

    let rows: Vec<(S, i64)> = rows
        .into_iter()
        .filter_map(|(label, count)| S::parse(&label).map(|s| (s, count)))
        .collect();
    let total: i64 = rows.iter().map(|(_, count)| count).sum();

    Ok((total, statistics::status_breakdown(&rows, total)))
}

/// Daily creation counts for the week ending `today`.
pub(crate) async fn daily_counts(
    db: &SqlitePool,
    table: &'static str,
    today: NaiveDate,
) -> Result<Vec<DailyCount>, sqlx::Error> {
    let since = statistics::histogram_start(today)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);

    let stamps: Vec<DateTime<Utc>> =
        sqlx::query_scalar(&format!("SELECT created_at FROM {table} WHERE created_at >= ?1"))
            .bind(since)
            .fetch_all(db)
            .await?;

    Ok(statistics::daily_histogram(&stamps, today))
}
