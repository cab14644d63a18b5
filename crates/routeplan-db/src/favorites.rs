//! Database operations for the `favorites` table.

use chrono::{DateTime, Utc};
use routeplan_core::{FavoriteDraft, FavoriteRecord};
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `favorites` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FavoriteRow {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub vehicle: String,
    pub unit: String,
    pub distance_text: String,
    pub time_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteRecord {
    fn from(row: FavoriteRow) -> Self {
        FavoriteRecord {
            id: row.id,
            name: row.name,
            origin: row.origin,
            destination: row.destination,
            vehicle: Some(row.vehicle),
            unit: Some(row.unit),
            distance: row.distance_text,
            time: row.time_text,
            created_at: Some(row.created_at),
        }
    }
}

/// Inserts a favorite and returns its id. Text fields are stored trimmed;
/// callers validate required fields first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_favorite(pool: &SqlitePool, draft: &FavoriteDraft) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO favorites \
         (name, origin, destination, vehicle, unit, distance_text, time_text, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(draft.name.trim())
    .bind(draft.from.trim())
    .bind(draft.to.trim())
    .bind(draft.vehicle.trim())
    .bind(draft.unit.trim())
    .bind(draft.distance.trim())
    .bind(draft.time.trim())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Lists all favorites, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_favorites(pool: &SqlitePool) -> Result<Vec<FavoriteRow>, DbError> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        "SELECT id, name, origin, destination, vehicle, unit, distance_text, time_text, created_at \
         FROM favorites \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Deletes one favorite by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that id, or [`DbError::Sqlx`]
/// if the delete fails.
pub async fn delete_favorite(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM favorites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
