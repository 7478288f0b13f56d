//! # Cron Secret Middleware
//!
//! Rejects scheduled-trigger requests whose `Authorization` header does not carry
//! the configured shared secret. The `Bearer ` prefix is optional. Without a
//! configured secret every request passes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::web::errors::ApiError;
use crate::web::state::AppState;

/// Extract the presented secret from an `Authorization` header value
pub fn presented_secret(header: &str) -> &str {
    let header = header.trim_start();
    header.strip_prefix("Bearer ").unwrap_or(header).trim()
}

pub async fn require_cron_secret(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.cron_secret.as_deref() else {
        debug!("No cron secret configured, allowing request");
        return Ok(next.run(request).await);
    };

    let presented = match request.headers().get(axum::http::header::AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(raw) => Some(presented_secret(raw)),
            Err(_) => {
                warn!("Authorization header contains non-UTF-8 bytes");
                None
            }
        },
        None => None,
    };

    if presented != Some(expected) {
        warn!(
            header_present = presented.is_some(),
            "Rejected cron request with missing or invalid secret"
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presented_secret_strips_bearer_prefix() {
        assert_eq!(presented_secret("Bearer s3cret"), "s3cret");
        assert_eq!(presented_secret("s3cret"), "s3cret");
        assert_eq!(presented_secret("  Bearer s3cret "), "s3cret");
        assert_eq!(presented_secret("Bearer "), "");
        assert_eq!(presented_secret("  Bearer   "), "");
    }
}
