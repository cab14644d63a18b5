pub mod favorites;
pub mod history;

pub use favorites::{delete_favorite, insert_favorite, list_favorites, FavoriteRow};
pub use history::{
    load_analytics, record_route, top_routes, vehicle_usage, RouteCountRow, VehicleUsageRow,
};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &routeplan_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to a SQLite pool, creating the database file if it does not exist.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the URL is invalid or the connection fails.
pub async fn connect_pool(
    database_url: &str,
    config: PoolConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Connect to a private in-memory database with migrations applied.
///
/// The pool holds exactly one connection that never expires, since every
/// SQLite in-memory connection is its own database.
///
/// # Errors
///
/// Returns [`DbError`] if connecting or migrating fails.
pub async fn connect_in_memory() -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run all pending migrations against the pool.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// `SELECT 1` against the pool.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if no connection can answer.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Pings the pool and checks that both routeplan tables exist, so a
/// database that was never migrated reports unhealthy.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the ping fails or a table is missing.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DbError> {
    ping(pool).await?;
    sqlx::query("SELECT 1 FROM favorites LIMIT 1")
        .fetch_optional(pool)
        .await?;
    sqlx::query("SELECT 1 FROM route_history LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(())
}
