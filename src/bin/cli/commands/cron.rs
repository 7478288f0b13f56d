//! Scheduled generation from the command line

use std::sync::Arc;

use chrono::Local;
use farm_admin::client::{AdminApiClient, AdminStore};
use farm_admin::config::AdminConfig;
use farm_admin::cron::{ScheduledRun, SystemClock};
use farm_admin::generator::CancelSignal;
use farm_admin::planner::parse_day;

use crate::CronCommands;

pub async fn handle_cron_command(cmd: CronCommands, config: &AdminConfig) -> anyhow::Result<()> {
    match cmd {
        CronCommands::Run { today } => {
            let today = match today {
                Some(raw) => parse_day(&raw)?,
                None => Local::now().date_naive(),
            };
            let store: Arc<dyn AdminStore> = Arc::new(AdminApiClient::new(config.api.clone())?);
            let runner = ScheduledRun::new(store, &config.generator, Arc::new(SystemClock));

            let summary = runner.run(today, &CancelSignal::never()).await?;
            println!(
                "✓ Scheduled run for {} finished: {} created, {} skipped, {} failed",
                summary.range, summary.created, summary.skipped, summary.failed
            );
        }
    }
    Ok(())
}
