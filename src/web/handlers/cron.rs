//! # Scheduled Trigger Handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::logging::log_error;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Run the scheduled generation: GET /api/cron
///
/// The acknowledgment never carries per-date detail; outcomes go to the log.
pub async fn run_cron(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    match state.trigger.run_scheduled().await {
        Ok(summary) => {
            info!(
                range = %summary.range,
                created = summary.created,
                skipped = summary.skipped,
                failed = summary.failed,
                "Cron job executed"
            );
            Ok(Json(json!({ "message": "Cron job executed successfully" })))
        }
        Err(e) => {
            log_error("web", "run_cron", &e.to_string(), None);
            Err(ApiError::CronFailed)
        }
    }
}

/// Scheduler connectivity probe: GET /api/cron-test
pub async fn cron_test() -> Json<Value> {
    let time = Utc::now().to_rfc3339();
    info!(time = %time, "Cron test ran");
    Json(json!({ "message": "Cron test ran", "time": time }))
}
