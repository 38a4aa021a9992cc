pub mod courses;
pub mod demo_bookings;
pub mod event_registrations;
pub mod events;
pub mod images;
pub mod inquiries;
mod lead;
pub mod sessions;
pub mod users;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Opens the pool and runs pending migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// A migrated in-memory database. Pinned to one connection, since every
/// SQLite `:memory:` connection is a separate database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// Which side of the archive flag a course or event listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFilter {
    Active,
    Archived,
    All,
}

impl ArchiveFilter {
    fn where_clause(self) -> &'static str {
        match self {
            ArchiveFilter::Active => "WHERE is_archived = 0",
            ArchiveFilter::Archived => "WHERE is_archived = 1",
            ArchiveFilter::All => "",
        }
    }
}
