use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::ArchiveFilter;
use crate::models::{Event, EventStatistics, NewEvent};

const EVENT_SELECT: &str = r#"
    SELECT
        id, title, description, event_date, location, image_url, is_archived,
        (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = events.id) AS registration_count,
        created_at, updated_at
    FROM events
"#;

pub async fn fetch_events(db: &SqlitePool, filter: ArchiveFilter) -> Result<Vec<Event>, sqlx::Error> {
    let sql = format!("{EVENT_SELECT} {} ORDER BY event_date ASC", filter.where_clause());
    sqlx::query_as::<_, Event>(&sql).fetch_all(db).await
}

pub async fn find_event_by_id(db: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    let sql = format!("{EVENT_SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_event(db: &SqlitePool, new: NewEvent) -> Result<Event, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO events
            (id, title, description, event_date, location, image_url,
            is_archived, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)
        "#,
    )
    .bind(&id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.event_date)
    .bind(&new.location)
    .bind(&new.image_url)
    .bind(now)
    .execute(db)
    .await?;

    Ok(Event {
        id,
        title: new.title,
        description: new.description,
        event_date: new.event_date,
        location: new.location,
        image_url: new.image_url,
        is_archived: false,
        registration_count: 0,
        created_at: now,
        updated_at: now,
    })
}

pub async fn update_event(db: &SqlitePool, mut event: Event) -> Result<Option<Event>, sqlx::Error> {
    event.updated_at = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE events
        SET title = ?1,
            description = ?2,
            event_date = ?3,
            location = ?4,
            image_url = ?5,
            updated_at = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.event_date)
    .bind(&event.location)
    .bind(&event.image_url)
    .bind(event.updated_at)
    .bind(&event.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok((result > 0).then_some(event))
}

pub async fn set_event_archived(db: &SqlitePool, id: &str, archived: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE events
        SET is_archived = ?2,
            updated_at = ?3
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(archived)
    .bind(Utc::now())
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Hard delete; registrations go with it through the foreign key cascade.
pub async fn delete_event(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn event_statistics(db: &SqlitePool) -> Result<EventStatistics, sqlx::Error> {
    let now = Utc::now();

    let (total, archived, upcoming): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(is_archived), 0),
            COALESCE(SUM(CASE WHEN is_archived = 0 AND event_date >= ?1 THEN 1 ELSE 0 END), 0)
        FROM events
        "#,
    )
    .bind(now)
    .fetch_one(db)
    .await?;

    let total_registrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations")
        .fetch_one(db)
        .await?;

    let active = total - archived;
    Ok(EventStatistics {
        total,
        active,
        archived,
        upcoming,
        past: active - upcoming,
        total_registrations,
    })
}
