//! # Web API
//!
//! HTTP surface of the scheduled trigger: the secret-protected `/api/cron`
//! endpoint plus unauthenticated probes for schedulers and load balancers.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::error::{AdminError, AdminResult};

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use state::AppState;

/// Create the web application with all routes and middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let common_middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Public routes - never require the cron secret. Only these carry the request
    // timeout; a cron run always completes its batch.
    let public_routes = Router::new()
        .merge(routes::health_routes())
        .merge(routes::probe_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.web.request_timeout_ms),
        ));

    let protected_routes = routes::cron_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_cron_secret,
    ));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(common_middleware)
        .with_state(state);

    info!("Web application created with all routes and middleware");
    app
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> AdminResult<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .map_err(|e| AdminError::Internal(format!("Listener has no local address: {e}")))?;
    info!(address = %local_addr, "Web server listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AdminError::Internal(format!("Web server error: {e}")))
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>) -> AdminResult<()> {
    let bind_address = state.config.web.bind_address.clone();
    let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
        AdminError::config_error(format!("Failed to bind to {bind_address}: {e}"))
    })?;

    serve_with_shutdown(listener, state, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, stopping web server");
        }
    })
    .await
}
