//! # Batch Task Generator
//!
//! Ensures one daily task per `(date, template type)` over a date range. Each
//! worker takes a date, then for every template runs a read-before-write
//! existence check and creates the task only when none is found.
//!
//! The existence check is not transactional: two overlapping runs can both see
//! "missing" and both create. Failures are confined to their `(date, type)` pair
//! and never stop the batch.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use super::pool::{guarded, CancelSignal, WorkerPool};
use super::report::{emit, GenerationKind, GenerationReport, ItemOutcome, ProgressSender};
use crate::client::AdminStore;
use crate::config::{ExistencePolicy, GeneratorConfig};
use crate::error::{AdminError, AdminResult};
use crate::models::TaskTemplate;
use crate::planner::{format_day, DateRange};

pub struct BatchTaskGenerator {
    store: Arc<dyn AdminStore>,
    pool: WorkerPool,
    policy: ExistencePolicy,
    call_timeout: Duration,
}

impl std::fmt::Debug for BatchTaskGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchTaskGenerator")
            .field("workers", &self.pool.size())
            .field("policy", &self.policy)
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

impl BatchTaskGenerator {
    pub fn new(store: Arc<dyn AdminStore>, config: &GeneratorConfig) -> Self {
        Self {
            store,
            pool: WorkerPool::new(config.concurrency_limit),
            policy: config.existence_policy,
            call_timeout: config.call_timeout(),
        }
    }

    /// Create every missing `(date, type)` task in `range`
    ///
    /// Invalid templates abort the run before any call is made. Everything after
    /// that is reported per item; the returned report is the only aggregate.
    #[instrument(skip_all, fields(range = %range))]
    pub async fn generate(
        &self,
        range: DateRange,
        templates: &[TaskTemplate],
        cancel: &CancelSignal,
        progress: Option<ProgressSender>,
    ) -> AdminResult<GenerationReport> {
        for template in templates {
            template.validate()?;
        }

        let dates = range.days();
        info!(
            dates = dates.len(),
            templates = templates.len(),
            workers = self.pool.size(),
            "Batch task creation started"
        );

        let progress = progress.as_ref();
        let pool_outcome = self
            .pool
            .run(&dates, cancel, |date| {
                self.process_date(*date, templates, cancel, progress)
            })
            .await;

        let mut outcomes: Vec<ItemOutcome> = pool_outcome
            .completed
            .into_iter()
            .flat_map(|(_, outcomes)| outcomes)
            .collect();

        for index in pool_outcome.unprocessed {
            for template in templates {
                let outcome =
                    ItemOutcome::failed(dates[index], template.task_type.as_str(), "cancelled");
                emit(&outcome, progress);
                outcomes.push(outcome);
            }
        }

        let report = GenerationReport::from_outcomes(GenerationKind::DailyTasks, range, outcomes);
        info!(
            created = report.created,
            skipped = report.skipped,
            failed = report.failed,
            "Batch task creation finished"
        );
        Ok(report)
    }

    /// All templates for one date, strictly in order
    async fn process_date(
        &self,
        date: NaiveDate,
        templates: &[TaskTemplate],
        cancel: &CancelSignal,
        progress: Option<&ProgressSender>,
    ) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::with_capacity(templates.len());
        for template in templates {
            let outcome = self.ensure_task(date, template, cancel).await;
            emit(&outcome, progress);
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn ensure_task(
        &self,
        date: NaiveDate,
        template: &TaskTemplate,
        cancel: &CancelSignal,
    ) -> ItemOutcome {
        let task_type = template.task_type;
        let kind = task_type.as_str();

        let check = guarded(
            cancel,
            self.call_timeout,
            "existence check",
            self.store.find_daily_tasks(date, task_type),
        )
        .await;

        match check {
            Ok(existing) if !existing.is_empty() => {
                return ItemOutcome::skipped(date, kind);
            }
            Ok(_) => {}
            Err(e @ AdminError::Cancelled(_)) => {
                return ItemOutcome::failed(date, kind, e.reason());
            }
            Err(e) => match self.policy {
                ExistencePolicy::FailOpen => {
                    warn!(
                        date = %format_day(date),
                        task_type = %kind,
                        error = %e,
                        "Existence check failed, creating anyway (fail-open)"
                    );
                }
                ExistencePolicy::FailClosed => {
                    warn!(
                        date = %format_day(date),
                        task_type = %kind,
                        error = %e,
                        "Existence check failed, skipping creation (fail-closed)"
                    );
                    return ItemOutcome::failed(
                        date,
                        kind,
                        format!("existence check failed: {}", e.reason()),
                    );
                }
            },
        }

        let draft = template.instantiate(date);
        match guarded(
            cancel,
            self.call_timeout,
            "create daily task",
            self.store.create_daily_task(&draft),
        )
        .await
        {
            Ok(()) => ItemOutcome::created(date, kind),
            Err(e) => ItemOutcome::failed(date, kind, e.reason()),
        }
    }
}
