use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Image;

pub async fn insert_image(
    db: &SqlitePool,
    content_type: &str,
    filename: Option<&str>,
    data: Vec<u8>,
) -> Result<Image, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO images (id, content_type, filename, data, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&id)
    .bind(content_type)
    .bind(filename)
    .bind(&data)
    .bind(now)
    .execute(db)
    .await?;

    Ok(Image {
        id,
        content_type: content_type.to_string(),
        filename: filename.map(str::to_string),
        data,
        created_at: now,
    })
}

pub async fn find_image_by_id(db: &SqlitePool, id: &str) -> Result<Option<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(
        "SELECT id, content_type, filename, data, created_at FROM images WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    #[tokio::test]
    async fn test_insert_and_find_image() {
        let pool = setup_test_db().await;
        let png = vec![0x89, b'P', b'N', b'G'];
        let image = insert_image(&pool, "image/png", Some("logo.png"), png.clone())
            .await
            .unwrap();

        let found = find_image_by_id(&pool, &image.id).await.unwrap().unwrap();
        assert_eq!(found.data, png);
        assert_eq!(found.content_type, "image/png");
        assert_eq!(found.filename.as_deref(), Some("logo.png"));
        assert!(find_image_by_id(&pool, "missing").await.unwrap().is_none());
    }
}
