use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::api::extract::ApiJson;
use crate::auth::{self, CurrentUser, Requirement, password, session};
use crate::db::{sessions, users};
use crate::error::AppError;
use crate::models::{LoginRequest, SessionUser};
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<SessionUser>), AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let user = users::find_user_by_email(&state.db, &req.email).await?;
    let user = match user {
        Some(user) if password::verify_password(&req.password, &user.password_hash) => user,
        _ => {
            warn!(email = %req.email, "failed login attempt");
            return Err(AppError::Unauthorized);
        }
    };

    let purged = sessions::purge_expired_sessions(&state.db, Utc::now()).await?;
    if purged > 0 {
        info!(purged, "expired sessions removed");
    }

    let ttl = Duration::hours(state.config.session_ttl_hours);
    let token = sessions::create_session(&state.db, &user.id, ttl).await?;
    info!(user_id = %user.id, "user signed in");

    let jar = jar.add(session::session_cookie(token, state.config.cookie_secure));
    Ok((jar, Json(SessionUser::from(user))))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    if let Some(token) = session::token_from_jar(&jar) {
        sessions::delete_session(&state.db, &token).await?;
    }
    Ok((session::clear_session_cookie(jar), StatusCode::NO_CONTENT))
}

pub async fn current_session(CurrentUser(user): CurrentUser) -> Result<Json<SessionUser>, AppError> {
    auth::authorize(user.as_ref(), Requirement::Session)?;
    user.map(Json).ok_or(AppError::Unauthorized)
}
