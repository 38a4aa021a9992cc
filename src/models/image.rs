use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Image {
    pub id: String,
    pub content_type: String,
    pub filename: Option<String>,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub url: String,
}
