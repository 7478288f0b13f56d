//! # Scheduled Generation
//!
//! Unattended run of the batch task generator over the "next week" range (today
//! through the upcoming Saturday) with the two default templates. The run reports
//! only through the log stream; callers get an overall acknowledgment and counts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::client::AdminStore;
use crate::config::GeneratorConfig;
use crate::error::AdminResult;
use crate::generator::{BatchTaskGenerator, CancelSignal, GenerationReport};
use crate::logging::log_error;
use crate::models::TaskTemplate;
use crate::planner::DateRange;

/// Source of "today" for range planning
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always answers the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Counts of a finished scheduled run; no per-date detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub range: DateRange,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl From<&GenerationReport> for RunSummary {
    fn from(report: &GenerationReport) -> Self {
        Self {
            range: report.range,
            created: report.created,
            skipped: report.skipped,
            failed: report.failed,
        }
    }
}

/// Anything the scheduled endpoint can fire
#[async_trait]
pub trait ScheduledTrigger: Send + Sync + std::fmt::Debug {
    async fn run_scheduled(&self) -> AdminResult<RunSummary>;
}

#[derive(Debug)]
pub struct ScheduledRun {
    generator: BatchTaskGenerator,
    templates: Vec<TaskTemplate>,
    clock: Arc<dyn Clock>,
}

impl ScheduledRun {
    pub fn new(store: Arc<dyn AdminStore>, config: &GeneratorConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            generator: BatchTaskGenerator::new(store, config),
            templates: TaskTemplate::scheduled_defaults(),
            clock,
        }
    }

    /// Generate next week's tasks as seen from `today`
    ///
    /// Partial failures still count as a completed run; only a run that could not
    /// start at all is an error.
    #[instrument(skip(self, cancel))]
    pub async fn run(&self, today: NaiveDate, cancel: &CancelSignal) -> AdminResult<RunSummary> {
        let range = DateRange::next_week(today);
        info!(start = %range.start_date, end = %range.end_date, "Scheduled generation started");

        let report = match self
            .generator
            .generate(range, &self.templates, cancel, None)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                log_error("cron", "scheduled_generation", &e.to_string(), Some(&range.to_string()));
                return Err(e);
            }
        };

        let summary = RunSummary::from(&report);
        if report.has_failures() {
            error!(
                created = summary.created,
                skipped = summary.skipped,
                failed = summary.failed,
                "Scheduled generation finished with failures"
            );
        } else {
            info!(
                created = summary.created,
                skipped = summary.skipped,
                "Scheduled generation finished"
            );
        }
        Ok(summary)
    }
}

#[async_trait]
impl ScheduledTrigger for ScheduledRun {
    async fn run_scheduled(&self) -> AdminResult<RunSummary> {
        self.run(self.clock.today(), &CancelSignal::never()).await
    }
}
