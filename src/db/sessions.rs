use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::auth::session;
use crate::models::SessionUser;

/// Issues a new session for `user_id` and returns the raw token. Only its hash is stored.
pub async fn create_session(
    db: &SqlitePool,
    user_id: &str,
    ttl: Duration,
) -> Result<String, sqlx::Error> {
    let token = session::generate_token();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO sessions (token_hash, user_id, expires_at, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(session::hash_token(&token))
    .bind(user_id)
    .bind(now + ttl)
    .bind(now)
    .execute(db)
    .await?;

    Ok(token)
}

/// The user behind an unexpired session token.
pub async fn find_session_user(db: &SqlitePool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    sqlx::query_as::<_, SessionUser>(
        r#"
        SELECT u.id, u.email, u.name, u.role
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = ?1 AND s.expires_at > ?2
        "#,
    )
    .bind(session::hash_token(token))
    .bind(Utc::now())
    .fetch_optional(db)
    .await
}

pub async fn delete_session(db: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?1")
        .bind(session::hash_token(token))
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn purge_expired_sessions(db: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
        .bind(now)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;
    use crate::db::users::insert_user;
    use crate::models::UserRole;

    #[tokio::test]
    async fn test_session_roundtrip_and_logout() {
        let pool = setup_test_db().await;
        let user = insert_user(&pool, "ops@example.com", "s3cret-pass", "Ops", UserRole::Admin)
            .await
            .unwrap();

        let token = create_session(&pool, &user.id, Duration::hours(1)).await.unwrap();
        let found = find_session_user(&pool, &token).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(found.is_admin());

        assert!(find_session_user(&pool, "forged-token").await.unwrap().is_none());

        assert!(delete_session(&pool, &token).await.unwrap());
        assert!(find_session_user(&pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_ignored_and_purged() {
        let pool = setup_test_db().await;
        let user = insert_user(&pool, "m@example.com", "s3cret-pass", "M", UserRole::Member)
            .await
            .unwrap();

        let token = create_session(&pool, &user.id, Duration::seconds(-1)).await.unwrap();
        assert!(find_session_user(&pool, &token).await.unwrap().is_none());
        assert_eq!(purge_expired_sessions(&pool, Utc::now()).await.unwrap(), 1);
    }
}
