//! Web server startup

use std::sync::Arc;

use farm_admin::client::{AdminApiClient, AdminStore};
use farm_admin::config::AdminConfig;
use farm_admin::web::{self, AppState};

pub async fn handle_serve_command(
    bind: Option<String>,
    mut config: AdminConfig,
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.web.bind_address = bind;
    }

    let store: Arc<dyn AdminStore> = Arc::new(AdminApiClient::new(config.api.clone())?);
    let state = Arc::new(AppState::from_store(config, store));
    if state.cron_secret.is_none() {
        tracing::warn!("No cron secret configured; /api/cron accepts unauthenticated requests");
    }

    web::serve(state).await?;
    Ok(())
}
