mod auth;
mod courses;
mod demo_bookings;
mod event_registrations;
mod events;
pub mod extract;
mod inquiries;
mod media;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Router, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::ArchiveFilter;
use crate::error::AppError;
use crate::media::UPLOADS_URL_PREFIX;
use crate::models::{StatusSet, UpdateStatusRequest};
use crate::state::AppState;

/// Listing filters for courses and events. Only admins get to see archived records.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveQuery {
    pub active_only: Option<bool>,
    pub include_archived: Option<bool>,
    pub archived_only: Option<bool>,
}

impl ArchiveQuery {
    pub fn filter_for(&self, is_admin: bool) -> ArchiveFilter {
        if !is_admin || self.active_only == Some(true) || self.include_archived == Some(false) {
            return ArchiveFilter::Active;
        }
        if self.archived_only == Some(true) {
            ArchiveFilter::Archived
        } else {
            ArchiveFilter::All
        }
    }
}

pub(crate) fn parse_status<S: StatusSet>(req: &UpdateStatusRequest) -> Result<S, AppError> {
    req.parse::<S>()
        .ok_or_else(|| AppError::validation("Invalid status"))
}

pub(crate) fn parse_status_filter<S: StatusSet>(status: Option<&str>) -> Result<Option<S>, AppError> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => S::parse(label)
            .map(Some)
            .ok_or_else(|| AppError::validation("Invalid status")),
        None => Ok(None),
    }
}

pub fn router(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::current_session))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route("/courses/statistics", get(courses::course_statistics))
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/{id}/archive", put(courses::archive_course))
        .route("/courses/{id}/unarchive", put(courses::unarchive_course))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/statistics", get(events::event_statistics))
        .route(
            "/events/{id}",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/{id}/archive", put(events::archive_event))
        .route("/events/{id}/unarchive", put(events::unarchive_event))
        .route("/events/{id}/registrations", get(events::list_event_registrations))
        .route(
            "/inquiries",
            get(inquiries::list_inquiries).post(inquiries::create_inquiry),
        )
        .route("/inquiries/statistics", get(inquiries::inquiry_statistics))
        .route(
            "/inquiries/{id}",
            get(inquiries::get_inquiry).patch(inquiries::update_inquiry_status),
        )
        .route(
            "/demo-bookings",
            get(demo_bookings::list_demo_bookings).post(demo_bookings::create_demo_booking),
        )
        .route(
            "/demo-bookings/statistics",
            get(demo_bookings::demo_booking_statistics),
        )
        .route(
            "/demo-bookings/{id}",
            get(demo_bookings::get_demo_booking).patch(demo_bookings::update_demo_booking_status),
        )
        .route(
            "/event-registrations",
            get(event_registrations::list_registrations)
                .post(event_registrations::create_registration),
        )
        .route(
            "/event-registrations/statistics",
            get(event_registrations::registration_statistics),
        )
        .route(
            "/event-registrations/{id}",
            get(event_registrations::get_registration)
                .patch(event_registrations::update_registration_status),
        )
        .route("/images", post(media::store_image))
        .route("/images/{id}", get(media::get_image))
        .route("/upload", post(media::upload_file))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(active_only: Option<bool>, include_archived: Option<bool>, archived_only: Option<bool>) -> ArchiveQuery {
        ArchiveQuery {
            active_only,
            include_archived,
            archived_only,
        }
    }

    #[test]
    fn non_admins_only_see_active_records() {
        assert_eq!(ArchiveQuery::default().filter_for(false), ArchiveFilter::Active);
        assert_eq!(query(None, Some(true), Some(true)).filter_for(false), ArchiveFilter::Active);
    }

    #[test]
    fn admins_see_everything_by_default() {
        assert_eq!(ArchiveQuery::default().filter_for(true), ArchiveFilter::All);
        assert_eq!(query(Some(true), None, None).filter_for(true), ArchiveFilter::Active);
        assert_eq!(query(None, Some(false), None).filter_for(true), ArchiveFilter::Active);
        assert_eq!(query(None, None, Some(true)).filter_for(true), ArchiveFilter::Archived);
    }

    #[test]
    fn status_filter_parsing() {
        use crate::models::LeadStatus;
        assert_eq!(parse_status_filter::<LeadStatus>(None).unwrap(), None);
        assert_eq!(parse_status_filter::<LeadStatus>(Some("")).unwrap(), None);
        assert_eq!(
            parse_status_filter::<LeadStatus>(Some("contacted")).unwrap(),
            Some(LeadStatus::Contacted)
        );
        assert!(parse_status_filter::<LeadStatus>(Some("bogus")).is_err());
    }
}
