use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct AutocompleteQuery {
    pub q: Option<String>,
}

/// Place-name suggestions for a partial query. Failures degrade to an empty
/// list so typing in a search box never surfaces an error.
pub(super) async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Json<Vec<String>> {
    let prefix = query.q.as_deref().map(str::trim).unwrap_or_default();
    if prefix.is_empty() {
        return Json(Vec::new());
    }

    match state.graphhopper.autocomplete(prefix).await {
        Ok(names) => Json(names),
        Err(e) => {
            tracing::warn!(prefix, error = %e, "autocomplete request failed");
            Json(Vec::new())
        }
    }
}
