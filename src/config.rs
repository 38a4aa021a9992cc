use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Credentials for the account that is created on startup when no user with this email exists.
#[derive(Clone, Debug)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminBootstrap {
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub admin: AdminBootstrap,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://backoffice.db?mode=rwc".to_string());
        let bind_addr = parse_var("BIND_ADDR", "127.0.0.1:3000")?;
        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", "10485760")?;
        let session_ttl_hours = parse_var("SESSION_TTL_HOURS", "24")?;
        let cookie_secure = parse_var("COOKIE_SECURE", "false")?;

        let admin = AdminBootstrap {
            email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
            password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
        };

        Ok(Self {
            database_url,
            bind_addr,
            upload_dir,
            max_upload_bytes,
            session_ttl_hours,
            cookie_secure,
            admin,
        })
    }

    /// Configuration for tests: in-memory database, temp upload dir.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            upload_dir: env::temp_dir().join(format!("backoffice-uploads-{}", uuid::Uuid::new_v4())),
            max_upload_bytes: 1024 * 1024,
            session_ttl_hours: 1,
            cookie_secure: false,
            admin: AdminBootstrap {
                email: "admin@example.com".to_string(),
                password: "correct horse battery staple".to_string(),
                name: "Test Admin".to_string(),
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
