//! Dashboard statistics route (protected; served from the poller cache).

use axum::Json;
use axum::extract::State;

use notapro_stats::StatsSnapshot;

use crate::app::services::AppState;

/// `GET /stats` — last-known statistics, error flag included.
///
/// Values are whatever the poller last fetched successfully; a failing
/// upstream only shows up in the `error` field.
pub async fn snapshot(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
