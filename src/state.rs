use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::media::{LocalUploadStore, UploadStore};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub uploads: Arc<dyn UploadStore>,
}

impl AppState {
    /// State backed by a local upload directory taken from `config`.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let uploads = Arc::new(LocalUploadStore::new(config.upload_dir.clone()));
        Self {
            db,
            config: Arc::new(config),
            uploads,
        }
    }
}
