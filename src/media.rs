use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;

pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A file pulled out of a multipart body, already checked to be an image.
#[derive(Debug)]
pub struct ImagePart {
    pub content_type: String,
    pub filename: Option<String>,
    pub data: Bytes,
}

/// Where uploaded images end up. Returns the relative URL the file is served from.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn save(&self, image: &ImagePart) -> Result<String, AppError>;
}

pub struct LocalUploadStore {
    dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn save(&self, image: &ImagePart) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!("{}.{}", Uuid::new_v4(), extension_for(&image.content_type));
        let path = self.dir.join(&name);
        tokio::fs::write(&path, &image.data).await?;

        info!(path = %path.display(), bytes = image.data.len(), "upload stored");
        Ok(format!("{UPLOADS_URL_PREFIX}/{name}"))
    }
}

pub fn ensure_image(content_type: &str) -> Result<(), AppError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(AppError::validation("Only image files are allowed"))
    }
}

pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "bin",
    }
}

/// Reads the `file` field of a multipart body and checks its MIME type.
pub async fn read_image_field(mut multipart: Multipart) -> Result<ImagePart, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        ensure_image(&content_type)?;
        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::validation("File is empty"));
        }
        return Ok(ImagePart {
            content_type,
            filename,
            data,
        });
    }

    Err(AppError::validation("No file uploaded"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_mime_types_pass() {
        assert!(ensure_image("image/png").is_ok());
        assert!(ensure_image("image/svg+xml").is_ok());
        assert!(ensure_image("application/pdf").is_err());
        assert!(ensure_image("").is_err());
    }

    #[tokio::test]
    async fn local_store_writes_file_and_returns_relative_url() {
        let dir = std::env::temp_dir().join(format!("backoffice-media-{}", Uuid::new_v4()));
        let store = LocalUploadStore::new(&dir);
        let image = ImagePart {
            content_type: "image/png".into(),
            filename: Some("a.png".into()),
            data: Bytes::from_static(b"\x89PNG"),
        };

        let url = store.save(&image).await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.trim_start_matches("/uploads/");
        let written = tokio::fs::read(dir.join(name)).await.unwrap();
        assert_eq!(written, b"\x89PNG");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
