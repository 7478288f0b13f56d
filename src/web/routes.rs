//! Route definitions grouped by access level.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::web::{handlers, state::AppState};

/// Health check routes for monitoring
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Scheduler connectivity probe
pub fn probe_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/cron-test", get(handlers::cron::cron_test))
}

/// Scheduled trigger; callers must present the cron secret
pub fn cron_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/cron", get(handlers::cron::run_cron))
}
