use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{parse_status, parse_status_filter};
use crate::auth::AdminUser;
use crate::db::{courses, inquiries as repository};
use crate::error::AppError;
use crate::models::{
    Inquiry, InquiryFilter, InquiryStatistics, LeadStatus, NewInquiryRequest, UpdateStatusRequest,
};
use crate::state::AppState;

/// Public: the contact form on a course page.
pub async fn create_inquiry(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewInquiryRequest>,
) -> Result<Json<Inquiry>, AppError> {
    let new = req.validate()?;

    let course = courses::find_course_by_id(&state.db, &new.course_id)
        .await?
        .filter(|c| !c.is_archived)
        .ok_or_else(|| AppError::validation("Course not found"))?;

    let inquiry = repository::insert_inquiry(&state.db, new, course.title).await?;
    info!(inquiry_id = %inquiry.id, course_id = %inquiry.course_id, "inquiry received");
    Ok(Json(inquiry))
}

pub async fn list_inquiries(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(filter): ApiQuery<InquiryFilter>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    let status = parse_status_filter::<LeadStatus>(filter.status.as_deref())?;
    let inquiries =
        repository::fetch_inquiries(&state.db, status, filter.course_id.as_deref()).await?;
    Ok(Json(inquiries))
}

pub async fn get_inquiry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Inquiry>, AppError> {
    repository::find_inquiry_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn update_inquiry_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<Inquiry>, AppError> {
    let status = parse_status::<LeadStatus>(&req)?;
    if !repository::update_inquiry_status(&state.db, &id, status).await? {
        return Err(AppError::NotFound);
    }
    info!(inquiry_id = %id, %status, "inquiry status changed");

    repository::find_inquiry_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn inquiry_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<InquiryStatistics>, AppError> {
    let stats = repository::inquiry_statistics(&state.db).await?;
    Ok(Json(stats))
}
