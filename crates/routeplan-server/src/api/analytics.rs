use axum::{extract::State, Json};
use routeplan_core::AnalyticsSeries;

use super::{map_db_error, ApiError, AppState};

/// Routes shown in the "top routes" chart.
const TOP_ROUTES_LIMIT: i64 = 5;

pub(super) async fn analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSeries>, ApiError> {
    let series = routeplan_db::load_analytics(&state.pool, TOP_ROUTES_LIMIT)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(series))
}
