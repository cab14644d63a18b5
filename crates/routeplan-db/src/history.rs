//! Route request history and the analytics aggregates built from it.

use chrono::Utc;
use routeplan_core::{AnalyticsSeries, RouteCount};
use sqlx::SqlitePool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RouteCountRow {
    pub origin: String,
    pub destination: String,
    pub count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleUsageRow {
    pub vehicle: String,
    pub count: i64,
}

/// Appends one successful route request to the history.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn record_route(
    pool: &SqlitePool,
    origin: &str,
    destination: &str,
    vehicle: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO route_history (origin, destination, vehicle, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(origin.trim())
    .bind(destination.trim())
    .bind(vehicle.trim())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Most requested origin/destination pairs, highest count first.
/// Ties are ordered alphabetically so the result is stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_routes(pool: &SqlitePool, limit: i64) -> Result<Vec<RouteCountRow>, DbError> {
    let rows = sqlx::query_as::<_, RouteCountRow>(
        "SELECT origin, destination, COUNT(*) AS count \
         FROM route_history \
         GROUP BY origin, destination \
         ORDER BY count DESC, origin ASC, destination ASC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Request counts per vehicle, highest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn vehicle_usage(pool: &SqlitePool) -> Result<Vec<VehicleUsageRow>, DbError> {
    let rows = sqlx::query_as::<_, VehicleUsageRow>(
        "SELECT vehicle, COUNT(*) AS count \
         FROM route_history \
         GROUP BY vehicle \
         ORDER BY count DESC, vehicle ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Builds the chart series served at `/analytics`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either aggregate query fails.
pub async fn load_analytics(pool: &SqlitePool, top_limit: i64) -> Result<AnalyticsSeries, DbError> {
    let top = top_routes(pool, top_limit).await?;
    let vehicles = vehicle_usage(pool).await?;

    Ok(AnalyticsSeries {
        top_routes: top
            .into_iter()
            .map(|row| RouteCount {
                label: AnalyticsSeries::route_label(&row.origin, &row.destination),
                count: row.count,
            })
            .collect(),
        vehicle_usage: vehicles
            .into_iter()
            .map(|row| (row.vehicle, row.count))
            .collect(),
    })
}
