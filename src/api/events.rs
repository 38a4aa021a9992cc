use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::api::ArchiveQuery;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::auth::{AdminUser, CurrentUser};
use crate::db::{event_registrations, events as repository};
use crate::error::AppError;
use crate::models::{Event, EventRegistration, EventStatistics, NewEventRequest, UpdateEventRequest};
use crate::state::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<ArchiveQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let filter = params.filter_for(user.is_admin());
    let events = repository::fetch_events(&state.db, filter).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event = repository::find_event_by_id(&state.db, &id)
        .await?
        .filter(|e| !e.is_archived || user.is_admin())
        .ok_or(AppError::NotFound)?;
    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<NewEventRequest>,
) -> Result<Json<Event>, AppError> {
    let event = repository::insert_event(&state.db, req.validate()?).await?;
    info!(event_id = %event.id, by = %admin.email, "event created");
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let mut event = repository::find_event_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    req.apply_to(&mut event)?;

    let event = repository::update_event(&state.db, event)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(event_id = %event.id, "event updated");
    Ok(Json(event))
}

pub async fn archive_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    set_archived(&state, &id, true).await
}

pub async fn unarchive_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    set_archived(&state, &id, false).await
}

/// Only archived events can be deleted; their registrations go with them.
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let event = repository::find_event_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !event.is_archived {
        return Err(AppError::validation("Archive before deleting"));
    }

    if repository::delete_event(&state.db, &id).await? {
        info!(event_id = %id, registrations = event.registration_count, "event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn list_event_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<EventRegistration>>, AppError> {
    if repository::find_event_by_id(&state.db, &id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let registrations = event_registrations::fetch_registrations(&state.db, None, Some(&id)).await?;
    Ok(Json(registrations))
}

pub async fn event_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<EventStatistics>, AppError> {
    let stats = repository::event_statistics(&state.db).await?;
    Ok(Json(stats))
}

async fn set_archived(state: &AppState, id: &str, archived: bool) -> Result<Json<Event>, AppError> {
    if !repository::set_event_archived(&state.db, id, archived).await? {
        return Err(AppError::NotFound);
    }
    info!(event_id = %id, archived, "event archive flag changed");

    repository::find_event_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}
