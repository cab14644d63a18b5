//! Saved favorite routes: list, create, delete.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use routeplan_core::api::{FavoriteCreated, MessageBody};
use routeplan_core::{FavoriteDraft, FavoriteRecord};
use serde::Deserialize;

use super::{map_db_error, ApiError, AppState};

const MISSING_FIELDS_MESSAGE: &str = "Missing required fields to save favorite route.";

/// Lenient creation body: every field may be absent so incomplete requests
/// get the readable 400 rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub(super) struct CreateFavoriteRequest {
    pub name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub vehicle: Option<String>,
    pub unit: Option<String>,
    pub distance: Option<String>,
    pub time: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl From<CreateFavoriteRequest> for FavoriteDraft {
    fn from(body: CreateFavoriteRequest) -> Self {
        FavoriteDraft {
            name: body.name.unwrap_or_default(),
            from: body.from.unwrap_or_default(),
            to: body.to.unwrap_or_default(),
            vehicle: or_default(body.vehicle, "car"),
            unit: or_default(body.unit, "km"),
            distance: body.distance.unwrap_or_default(),
            time: body.time.unwrap_or_default(),
        }
    }
}

pub(super) async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<FavoriteRecord>>, ApiError> {
    let rows = routeplan_db::list_favorites(&state.pool)
        .await
        .map_err(|e| map_db_error(&e))?;

    Ok(Json(rows.into_iter().map(FavoriteRecord::from).collect()))
}

pub(super) async fn create_favorite(
    State(state): State<AppState>,
    payload: Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteCreated>), ApiError> {
    let draft: FavoriteDraft = match payload {
        Ok(Json(body)) => body.into(),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable favorite body");
            return Err(ApiError::new("validation_error", MISSING_FIELDS_MESSAGE));
        }
    };

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        tracing::debug!(?missing, "favorite rejected");
        return Err(ApiError::new("validation_error", MISSING_FIELDS_MESSAGE));
    }

    let id = routeplan_db::insert_favorite(&state.pool, &draft)
        .await
        .map_err(|e| map_db_error(&e))?;
    tracing::info!(id, name = %draft.name.trim(), "favorite saved");

    Ok((
        StatusCode::CREATED,
        Json(FavoriteCreated {
            id,
            message: "Favorite route saved successfully.".to_string(),
        }),
    ))
}

pub(super) async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageBody>, ApiError> {
    match routeplan_db::delete_favorite(&state.pool, id).await {
        Ok(()) => {
            tracing::info!(id, "favorite deleted");
            Ok(Json(MessageBody {
                message: "Favorite route deleted.".to_string(),
            }))
        }
        Err(routeplan_db::DbError::NotFound) => {
            Err(ApiError::new("not_found", "Favorite not found."))
        }
        Err(e) => Err(map_db_error(&e)),
    }
}
