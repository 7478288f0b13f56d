//! # Web Application State
//!
//! Shared state for the web handlers: the loaded configuration, the cron secret
//! and the scheduled trigger the `/api/cron` endpoint fires.

use std::sync::Arc;

use crate::client::AdminStore;
use crate::config::AdminConfig;
use crate::cron::{Clock, ScheduledRun, ScheduledTrigger, SystemClock};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AdminConfig,
    /// Expected shared secret; `None` leaves the cron endpoint open
    pub cron_secret: Option<String>,
    pub trigger: Arc<dyn ScheduledTrigger>,
}

impl AppState {
    pub fn new(config: AdminConfig, trigger: Arc<dyn ScheduledTrigger>) -> Self {
        let cron_secret = config.cron.secret.clone().filter(|secret| !secret.is_empty());
        Self {
            config,
            cron_secret,
            trigger,
        }
    }

    /// State wired to the real scheduled run against `store`
    pub fn from_store(config: AdminConfig, store: Arc<dyn AdminStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: AdminConfig,
        store: Arc<dyn AdminStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let runner = ScheduledRun::new(store, &config.generator, clock);
        Self::new(config, Arc::new(runner))
    }
}
