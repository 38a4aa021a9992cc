use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{parse_status, parse_status_filter};
use crate::auth::AdminUser;
use crate::db::{event_registrations as repository, events};
use crate::error::AppError;
use crate::models::{
    EventRegistration, EventRegistrationFilter, EventRegistrationStatistics,
    NewEventRegistrationRequest, RegistrationStatus, UpdateStatusRequest,
};
use crate::state::AppState;

/// Public: sign-up form on an event page. Archived events take no registrations.
pub async fn create_registration(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewEventRegistrationRequest>,
) -> Result<Json<EventRegistration>, AppError> {
    let req = req.validate()?;

    let event = events::find_event_by_id(&state.db, &req.event_id)
        .await?
        .ok_or_else(|| AppError::validation("Event not found"))?;
    if event.is_archived {
        return Err(AppError::validation("Event is no longer open for registration"));
    }

    let registration = repository::insert_registration(&state.db, req).await?;
    info!(registration_id = %registration.id, event_id = %registration.event_id, "event registration received");
    Ok(Json(registration))
}

pub async fn list_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(filter): ApiQuery<EventRegistrationFilter>,
) -> Result<Json<Vec<EventRegistration>>, AppError> {
    let status = parse_status_filter::<RegistrationStatus>(filter.status.as_deref())?;
    let registrations =
        repository::fetch_registrations(&state.db, status, filter.event_id.as_deref()).await?;
    Ok(Json(registrations))
}

pub async fn get_registration(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<EventRegistration>, AppError> {
    repository::find_registration_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn update_registration_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<EventRegistration>, AppError> {
    let status = parse_status::<RegistrationStatus>(&req)?;
    if !repository::update_registration_status(&state.db, &id, status).await? {
        return Err(AppError::NotFound);
    }
    info!(registration_id = %id, %status, "event registration status changed");

    repository::find_registration_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn registration_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<EventRegistrationStatistics>, AppError> {
    let stats = repository::registration_statistics(&state.db).await?;
    Ok(Json(stats))
}
