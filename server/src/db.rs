use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to create database pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("failed to run database migrations: {0}")]
    Migrations(String),
}

pub fn create_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().build(manager)?;

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PoolError::Migrations(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }

    Ok(pool)
}

/// Check a connection out of the pool, turning failure into an `ApiError`
/// that the enclosing handler returns with `?`.
#[macro_export]
macro_rules! get_conn {
    ($pool:expr) => {
        $pool.get().map_err(|e| {
            tracing::error!("Failed to get database connection: {}", e);
            $crate::error::ApiError::Internal("Database connection failed")
        })?
    };
}
