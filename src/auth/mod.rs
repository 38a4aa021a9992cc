//! Session lookup and the access gate applied to every protected route.

pub mod password;
pub mod session;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::db::sessions;
use crate::error::AppError;
use crate::models::SessionUser;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any signed-in user.
    Session,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    NoSession,
    InsufficientRole,
}

pub fn check_access(user: Option<&SessionUser>, requirement: Requirement) -> Access {
    match (user, requirement) {
        (None, _) => Access::NoSession,
        (Some(_), Requirement::Session) => Access::Allow,
        (Some(u), Requirement::Admin) if u.is_admin() => Access::Allow,
        (Some(_), Requirement::Admin) => Access::InsufficientRole,
    }
}

/// Both rejections surface as 401.
pub fn authorize(user: Option<&SessionUser>, requirement: Requirement) -> Result<(), AppError> {
    match check_access(user, requirement) {
        Access::Allow => Ok(()),
        denied => {
            debug!(?denied, ?requirement, "access denied");
            Err(AppError::Unauthorized)
        }
    }
}

/// The signed-in user, if any.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(SessionUser::is_admin)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = match session::token_from_jar(&jar) {
            Some(token) => sessions::find_session_user(&state.db, &token).await?,
            None => None,
        };
        Ok(CurrentUser(user))
    }
}

/// A signed-in admin. Extracting it rejects everyone else with 401.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        authorize(user.as_ref(), Requirement::Admin)?;
        user.map(AdminUser).ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn user(role: UserRole) -> SessionUser {
        SessionUser {
            id: "u1".into(),
            email: "u@example.com".into(),
            name: "U".into(),
            role,
        }
    }

    #[test]
    fn gate_outcomes() {
        let admin = user(UserRole::Admin);
        let member = user(UserRole::Member);

        assert_eq!(check_access(None, Requirement::Session), Access::NoSession);
        assert_eq!(check_access(None, Requirement::Admin), Access::NoSession);
        assert_eq!(check_access(Some(&member), Requirement::Session), Access::Allow);
        assert_eq!(check_access(Some(&member), Requirement::Admin), Access::InsufficientRole);
        assert_eq!(check_access(Some(&admin), Requirement::Admin), Access::Allow);
    }

    #[test]
    fn both_rejections_are_unauthorized() {
        let member = user(UserRole::Member);
        assert!(matches!(authorize(None, Requirement::Admin), Err(AppError::Unauthorized)));
        assert!(matches!(
            authorize(Some(&member), Requirement::Admin),
            Err(AppError::Unauthorized)
        ));
        assert!(authorize(Some(&member), Requirement::Session).is_ok());
    }
}
