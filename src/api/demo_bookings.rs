use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{parse_status, parse_status_filter};
use crate::auth::AdminUser;
use crate::db::demo_bookings as repository;
use crate::error::AppError;
use crate::models::{
    DemoBooking, DemoBookingFilter, DemoBookingStatistics, LeadStatus, NewDemoBookingRequest,
    UpdateStatusRequest,
};
use crate::state::AppState;

pub async fn create_demo_booking(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDemoBookingRequest>,
) -> Result<Json<DemoBooking>, AppError> {
    let booking = repository::insert_demo_booking(&state.db, req.validate()?).await?;
    info!(booking_id = %booking.id, "demo booking received");
    Ok(Json(booking))
}

pub async fn list_demo_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(filter): ApiQuery<DemoBookingFilter>,
) -> Result<Json<Vec<DemoBooking>>, AppError> {
    let status = parse_status_filter::<LeadStatus>(filter.status.as_deref())?;
    let bookings = repository::fetch_demo_bookings(&state.db, status).await?;
    Ok(Json(bookings))
}

pub async fn get_demo_booking(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<DemoBooking>, AppError> {
    repository::find_demo_booking_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn update_demo_booking_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<DemoBooking>, AppError> {
    let status = parse_status::<LeadStatus>(&req)?;
    if !repository::update_demo_booking_status(&state.db, &id, status).await? {
        return Err(AppError::NotFound);
    }
    info!(booking_id = %id, %status, "demo booking status changed");

    repository::find_demo_booking_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn demo_booking_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<DemoBookingStatistics>, AppError> {
    let stats = repository::demo_booking_statistics(&state.db).await?;
    Ok(Json(stats))
}
