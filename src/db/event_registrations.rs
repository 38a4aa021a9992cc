use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::db::lead;
use crate::models::{
    EventRegistration, EventRegistrationCount, EventRegistrationStatistics,
    NewEventRegistrationRequest, RegistrationStatus,
};

const TABLE: &str = "event_registrations";

const REGISTRATION_SELECT: &str = "SELECT id, event_id, full_name, email, phone, organization, \
     message, status, created_at, updated_at FROM event_registrations";

pub async fn insert_registration(
    db: &SqlitePool,
    req: NewEventRegistrationRequest,
) -> Result<EventRegistration, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let status = RegistrationStatus::New;

    sqlx::query(
        r#"
        INSERT INTO event_registrations
            (id, event_id, full_name, email, phone, organization, message,
            status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
        "#,
    )
    .bind(&id)
    .bind(&req.event_id)
    .bind(&req.full_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.organization)
    .bind(&req.message)
    .bind(status)
    .bind(now)
    .execute(db)
    .await?;

    Ok(EventRegistration {
        id,
        event_id: req.event_id,
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
        organization: req.organization,
        message: req.message,
        status,
        created_at: now,
        updated_at: now,
    })
}

pub async fn find_registration_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<EventRegistration>, sqlx::Error> {
    let sql = format!("{REGISTRATION_SELECT} WHERE id = ?1");
    sqlx::query_as::<_, EventRegistration>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn fetch_registrations(
    db: &SqlitePool,
    status: Option<RegistrationStatus>,
    event_id: Option<&str>,
) -> Result<Vec<EventRegistration>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(REGISTRATION_SELECT);
    qb.push(" WHERE 1 = 1");
    if let Some(status) = status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(event_id) = event_id {
        qb.push(" AND event_id = ").push_bind(event_id);
    }
    qb.push(" ORDER BY created_at DESC");

    qb.build_query_as::<EventRegistration>().fetch_all(db).await
}

pub async fn update_registration_status(
    db: &SqlitePool,
    id: &str,
    status: RegistrationStatus,
) -> Result<bool, sqlx::Error> {
    lead::set_status(db, TABLE, id, status).await
}

pub async fn registration_statistics(
    db: &SqlitePool,
) -> Result<EventRegistrationStatistics, sqlx::Error> {
    let (total, by_status) = lead::status_counts::<RegistrationStatus>(db, TABLE).await?;

    let by_event = sqlx::query_as::<_, EventRegistrationCount>(
        r#"
        SELECT r.event_id AS event_id, e.title AS event_title, COUNT(*) AS count
        FROM event_registrations r
        JOIN events e ON e.id = r.event_id
        GROUP BY r.event_id, e.title
        ORDER BY count DESC, e.title ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(EventRegistrationStatistics {
        total,
        by_status,
        by_event,
    })
}
