use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password;
use crate::config::AdminBootstrap;
use crate::error::AppError;
use crate::models::{User, UserRole};

const USER_SELECT: &str =
    "SELECT id, email, password_hash, name, role, created_at, updated_at FROM users";

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("{USER_SELECT} WHERE email = ?1");
    sqlx::query_as::<_, User>(&sql)
        .bind(email.trim().to_lowercase())
        .fetch_optional(db)
        .await
}

/// Hashes `plain_password` and inserts the user. A taken email is a `Conflict`.
pub async fn insert_user(
    db: &SqlitePool,
    email: &str,
    plain_password: &str,
    name: &str,
    role: UserRole,
) -> Result<User, AppError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let email = email.trim().to_lowercase();
    let password_hash = password::hash_password(plain_password)?;

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
    )
    .bind(&id)
    .bind(&email)
    .bind(&password_hash)
    .bind(name)
    .bind(role)
    .bind(now)
    .execute(db)
    .await
    .map_err(|e| AppError::from_unique_violation(e, "Email is already registered"))?;

    Ok(User {
        id,
        email,
        password_hash,
        name: name.to_string(),
        role,
        created_at: now,
        updated_at: now,
    })
}

/// Creates the bootstrap admin unless a user with that email already exists.
/// Returns `true` when an account was created.
pub async fn ensure_admin(db: &SqlitePool, admin: &AdminBootstrap) -> Result<bool, AppError> {
    if find_user_by_email(db, &admin.email).await?.is_some() {
        return Ok(false);
    }

    if admin.uses_default_password() {
        warn!("creating bootstrap admin with the default password; set ADMIN_PASSWORD");
    }

    match insert_user(db, &admin.email, &admin.password, &admin.name, UserRole::Admin).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "bootstrap admin created");
            Ok(true)
        }
        // another process won the race
        Err(AppError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
