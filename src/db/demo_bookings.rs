use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::lead;
use crate::models::{DemoBooking, DemoBookingStatistics, LeadStatus, NewDemoBookingRequest};

const TABLE: &str = "demo_bookings";

const BOOKING_SELECT: &str = "SELECT id, full_name, email, phone, company, message, \
     preferred_date, status, created_at, updated_at FROM demo_bookings";

pub async fn insert_demo_booking(
    db: &SqlitePool,
    req: NewDemoBookingRequest,
) -> Result<DemoBooking, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let status = LeadStatus::New;

    sqlx::query(
        r#"
        INSERT INTO demo_bookings
            (id, full_name, email, phone, company, message, preferred_date,
            status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
        "#,
    )
    .bind(&id)
    .bind(&req.full_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.company)
    .bind(&req.message)
    .bind(req.preferred_date)
    .bind(status)
    .bind(now)
    .execute(db)
    .await?;

    Ok(DemoBooking {
        id,
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
        company: req.company,
        message: req.message,
        preferred_date: req.preferred_date,
        status,
        created_at: now,
        updated_at: now,
    })
}

pub async fn find_demo_booking_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<DemoBooking>, sqlx::Error> {
    let sql = format!("{BOOKING_SELECT} WHERE id = ?1");
    sqlx::query_as::<_, DemoBooking>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn fetch_demo_bookings(
    db: &SqlitePool,
    status: Option<LeadStatus>,
) -> Result<Vec<DemoBooking>, sqlx::Error> {
    match status {
        Some(status) => {
            let sql = format!("{BOOKING_SELECT} WHERE status = ?1 ORDER BY created_at DESC");
            sqlx::query_as::<_, DemoBooking>(&sql)
                .bind(status)
                .fetch_all(db)
                .await
        }
        None => {
            let sql = format!("{BOOKING_SELECT} ORDER BY created_at DESC");
            sqlx::query_as::<_, DemoBooking>(&sql).fetch_all(db).await
        }
    }
}

pub async fn update_demo_booking_status(
    db: &SqlitePool,
    id: &str,
    status: LeadStatus,
) -> Result<bool, sqlx::Error> {
    lead::set_status(db, TABLE, id, status).await
}

pub async fn demo_booking_statistics(db: &SqlitePool) -> Result<DemoBookingStatistics, sqlx::Error> {
    let (total, by_status) = lead::status_counts::<LeadStatus>(db, TABLE).await?;
    let daily = lead::daily_counts(db, TABLE, Utc::now().date_naive()).await?;

    Ok(DemoBookingStatistics {
        total,
        by_status,
        daily,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    fn booking(company: &str) -> NewDemoBookingRequest {
        NewDemoBookingRequest {
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "+1 555 010 9999".to_string(),
            company: Some(company.to_string()),
            message: None,
            preferred_date: chrono::NaiveDate::from_ymd_opt(2026, 11, 2),
        }
    }

    #[tokio::test]
    async fn test_insert_and_transition() {
        let pool = setup_test_db().await;
        let created = insert_demo_booking(&pool, booking("Acme")).await.unwrap();
        assert_eq!(created.status, LeadStatus::New);
        assert_eq!(created.created_at, created.updated_at);

        assert!(update_demo_booking_status(&pool, &created.id, LeadStatus::Archived).await.unwrap());
        let stored = find_demo_booking_by_id(&pool, &created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeadStatus::Archived);
        assert_eq!(stored.preferred_date, created.preferred_date);

        assert!(!update_demo_booking_status(&pool, "missing", LeadStatus::New).await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_by_status_and_statistics() {
        let pool = setup_test_db().await;
        let a = insert_demo_booking(&pool, booking("Acme")).await.unwrap();
        insert_demo_booking(&pool, booking("Globex")).await.unwrap();
        insert_demo_booking(&pool, booking("Initech")).await.unwrap();
        update_demo_booking_status(&pool, &a.id, LeadStatus::Contacted).await.unwrap();

        assert_eq!(fetch_demo_bookings(&pool, None).await.unwrap().len(), 3);
        assert_eq!(fetch_demo_bookings(&pool, Some(LeadStatus::New)).await.unwrap().len(), 2);

        let stats = demo_booking_statistics(&pool).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.iter().map(|s| s.count).sum::<i64>(), 3);
        let contacted = stats
            .by_status
            .iter()
            .find(|s| s.status == LeadStatus::Contacted)
            .unwrap();
        assert_eq!(contacted.count, 1);
        assert_eq!(contacted.percentage, 33.3);
        assert_eq!(stats.daily.iter().map(|d| d.count).sum::<i64>(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_statistics_total_holds_under_concurrent_inserts() {
        let path = std::env::temp_dir().join(format!("backoffice-stats-{}.db", Uuid::new_v4()));
        let pool = crate::db::connect(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();

        let writer = {
            let pool = pool.clone();
            tokio::spawn(async move {
                for _ in 0..500 {
                    insert_demo_booking(&pool, booking("Acme")).await.unwrap();
                }
            })
        };

        while !writer.is_finished() {
            let stats = demo_booking_statistics(&pool).await.unwrap();
            let sum: i64 = stats.by_status.iter().map(|s| s.count).sum();
            assert_eq!(stats.total, sum);
        }
        writer.await.unwrap();

        let stats = demo_booking_statistics(&pool).await.unwrap();
        assert_eq!(stats.total, 500);

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }
}
