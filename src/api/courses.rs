use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::api::ArchiveQuery;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::auth::{AdminUser, CurrentUser};
use crate::db::courses as repository;
use crate::error::AppError;
use crate::models::{Course, CourseStatistics, NewCourseRequest, UpdateCourseRequest};
use crate::state::AppState;

pub async fn list_courses(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(params): ApiQuery<ArchiveQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let filter = params.filter_for(user.is_admin());
    let courses = repository::fetch_courses(&state.db, filter).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .filter(|c| !c.is_archived || user.is_admin())
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<NewCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = repository::insert_course(&state.db, req.validate()?).await?;
    info!(course_id = %course.id, by = %admin.email, "course created");
    Ok(Json(course))
}

pub async fn update_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let mut course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    req.apply_to(&mut course)?;

    let course = repository::update_course(&state.db, course)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(course_id = %course.id, "course updated");
    Ok(Json(course))
}

pub async fn archive_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    if !repository::archive_course(&state.db, &id).await? {
        return Err(AppError::NotFound);
    }
    info!(course_id = %id, "course archived");
    reload(&state, &id).await
}

pub async fn unarchive_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    if !repository::unarchive_course(&state.db, &id).await? {
        return Err(AppError::NotFound);
    }
    info!(course_id = %id, "course unarchived");
    reload(&state, &id).await
}

/// Only archived courses can be deleted.
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !course.is_archived {
        return Err(AppError::validation("Archive before deleting"));
    }

    if repository::delete_course(&state.db, &id).await? {
        info!(course_id = %id, "course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn course_statistics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<CourseStatistics>, AppError> {
    let stats = repository::course_statistics(&state.db).await?;
    Ok(Json(stats))
}

async fn reload(state: &AppState, id: &str) -> Result<Json<Course>, AppError> {
    repository::find_course_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}
