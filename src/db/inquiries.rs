use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::db::lead;
use crate::models::{
    CourseInquiryCount, Inquiry, InquiryStatistics, LeadStatus, NewInquiry,
};

const TABLE: &str = "inquiries";

const INQUIRY_SELECT: &str = "SELECT id, full_name, email, phone, message, course_id, \
     course_title, status, created_at, updated_at FROM inquiries";

/// Stores a validated inquiry in status `new`. `course_title` is copied from the course at submit time.
pub async fn insert_inquiry(
    db: &SqlitePool,
    new: NewInquiry,
    course_title: String,
) -> Result<Inquiry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let status = LeadStatus::New;

    sqlx::query(
        r#"
        INSERT INTO inquiries
            (id, full_name, email, phone, message, course_id, course_title,
            status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
        "#,
    )
    .bind(&id)
    .bind(&new.full_name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.message)
    .bind(&new.course_id)
    .bind(&course_title)
    .bind(status)
    .bind(now)
    .execute(db)
    .await?;

    Ok(Inquiry {
        id,
        full_name: new.full_name,
        email: new.email,
        phone: new.phone,
        message: new.message,
        course_id: new.course_id,
        course_title,
        status,
        created_at: now,
        updated_at: now,
    })
}

pub async fn find_inquiry_by_id(db: &SqlitePool, id: &str) -> Result<Option<Inquiry>, sqlx::Error> {
    let sql = format!("{INQUIRY_SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Inquiry>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Newest first, optionally narrowed by status and course.
pub async fn fetch_inquiries(
    db: &SqlitePool,
    status: Option<LeadStatus>,
    course_id: Option<&str>,
) -> Result<Vec<Inquiry>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(INQUIRY_SELECT);
    qb.push(" WHERE 1 = 1");
    if let Some(status) = status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(course_id) = course_id {
        qb.push(" AND course_id = ").push_bind(course_id);
    }
    qb.push(" ORDER BY created_at DESC");

    qb.build_query_as::<Inquiry>().fetch_all(db).await
}

pub async fn update_inquiry_status(
    db: &SqlitePool,
    id: &str,
    status: LeadStatus,
) -> Result<bool, sqlx::Error> {
    lead::set_status(db, TABLE, id, status).await
}

pub async fn inquiry_statistics(db: &SqlitePool) -> Result<InquiryStatistics, sqlx::Error> {
    let (total, by_status) = lead::status_counts::<LeadStatus>(db, TABLE).await?;
    let daily = lead::daily_counts(db, TABLE, Utc::now().date_naive()).await?;

    let by_course = sqlx::query_as::<_, CourseInquiryCount>(
        r#"
        SELECT course_id, MAX(course_title) AS course_title, COUNT(*) AS count
        FROM inquiries
        GROUP BY course_id
        ORDER BY count DESC, course_title ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(InquiryStatistics {
        total,
        by_status,
        daily,
        by_course,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    fn new_inquiry(course_id: &str) -> NewInquiry {
        NewInquiry {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            message: Some("When does the next cohort start?".to_string()),
            course_id: course_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_starts_new() {
        let pool = setup_test_db().await;
        let inquiry = insert_inquiry(&pool, new_inquiry("c1"), "Rust".into()).await.unwrap();
        assert_eq!(inquiry.status, LeadStatus::New);
        assert_eq!(inquiry.created_at, inquiry.updated_at);

        let stored = find_inquiry_by_id(&pool, &inquiry.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeadStatus::New);
        assert_eq!(stored.course_title, "Rust");
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_status_transition() {
        let pool = setup_test_db().await;
        let inquiry = insert_inquiry(&pool, new_inquiry("c1"), "Rust".into()).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(update_inquiry_status(&pool, &inquiry.id, LeadStatus::Completed).await.unwrap());
        let stored = find_inquiry_by_id(&pool, &inquiry.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeadStatus::Completed);
        assert!(stored.updated_at > inquiry.updated_at);

        // any status to any other
        assert!(update_inquiry_status(&pool, &inquiry.id, LeadStatus::New).await.unwrap());
    }

    #[tokio::test]
    async fn test_transition_missing_id_changes_nothing() {
        let pool = setup_test_db().await;
        let inquiry = insert_inquiry(&pool, new_inquiry("c1"), "Rust".into()).await.unwrap();

        assert!(!update_inquiry_status(&pool, "missing", LeadStatus::Contacted).await.unwrap());
        let all = fetch_inquiries(&pool, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, LeadStatus::New);
        assert_eq!(all[0].updated_at, inquiry.updated_at);
    }

    #[tokio::test]
    async fn test_fetch_filters() {
        let pool = setup_test_db().await;
        let a = insert_inquiry(&pool, new_inquiry("c1"), "Rust".into()).await.unwrap();
        insert_inquiry(&pool, new_inquiry("c2"), "Go".into()).await.unwrap();
        update_inquiry_status(&pool, &a.id, LeadStatus::Contacted).await.unwrap();

        assert_eq!(fetch_inquiries(&pool, None, Some("c1")).await.unwrap().len(), 1);
        let contacted = fetch_inquiries(&pool, Some(LeadStatus::Contacted), None).await.unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].id, a.id);
        assert!(fetch_inquiries(&pool, Some(LeadStatus::Archived), Some("c1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_statistics_totals_match_breakdown() {
        let pool = setup_test_db().await;
        let empty = inquiry_statistics(&pool).await.unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.by_status.iter().all(|s| s.count == 0 && s.percentage == 0.0));

        for i in 0..5 {
            let course = if i < 3 { "c1" } else { "c2" };
            let title = if i < 3 { "Rust" } else { "Go" };
            let inquiry = insert_inquiry(&pool, new_inquiry(course), title.into()).await.unwrap();
            if i % 2 == 0 {
                update_inquiry_status(&pool, &inquiry.id, LeadStatus::Contacted).await.unwrap();
            }
        }

        let stats = inquiry_statistics(&pool).await.unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.by_status.iter().map(|s| s.count).sum::<i64>(), stats.total);
        assert_eq!(stats.daily.len(), 7);
        assert_eq!(stats.daily.last().unwrap().count, 5);
        assert_eq!(stats.by_course[0].course_id, "c1");
        assert_eq!(stats.by_course[0].count, 3);
        assert_eq!(stats.by_course[1].course_title, "Go");
    }
}
