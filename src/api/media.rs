use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::auth::AdminUser;
use crate::db::images;
use crate::error::AppError;
use crate::media;
use crate::models::{StoredImage, UploadedFile};
use crate::state::AppState;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let image = images::find_image_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        image.data,
    )
        .into_response())
}

/// Stores the image in the database; it is then served by [`get_image`].
pub async fn store_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    multipart: Multipart,
) -> Result<Json<StoredImage>, AppError> {
    let part = media::read_image_field(multipart).await?;
    let image = images::insert_image(
        &state.db,
        &part.content_type,
        part.filename.as_deref(),
        part.data.to_vec(),
    )
    .await?;

    info!(image_id = %image.id, content_type = %image.content_type, "image stored");
    Ok(Json(StoredImage {
        url: format!("/images/{}", image.id),
        id: image.id,
    }))
}

/// Writes the image to the upload directory and returns its relative URL.
pub async fn upload_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    multipart: Multipart,
) -> Result<Json<UploadedFile>, AppError> {
    let part = media::read_image_field(multipart).await?;
    let url = state.uploads.save(&part).await?;
    Ok(Json(UploadedFile { url }))
}
