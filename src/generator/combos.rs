//! # Daily Combo Generator
//!
//! Creates one combo per day that has none yet. Existence and naming both come
//! from a single snapshot of the current combos taken at the start of the run:
//! a day is covered when some combo starts on it, and new combos are numbered
//! upward from the highest "Daily Combo <n>" in the snapshot. All drafts,
//! including their random item slots, are built before any create call, so the
//! numbering and the slots do not depend on worker scheduling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, instrument, warn};

use super::pool::{guarded, CancelSignal, WorkerPool};
use super::report::{emit, GenerationKind, GenerationReport, ItemOutcome, ProgressSender};
use crate::client::AdminStore;
use crate::config::{ExistencePolicy, GeneratorConfig};
use crate::constants::combo::{DEFAULT_REWARD, SLOT_RANGE};
use crate::error::{AdminError, AdminResult};
use crate::models::combo::sequence_name;
use crate::models::{ComboDraft, DailyCombo};
use crate::planner::DateRange;

/// The next `count` sequence numbers after the highest one in `existing`
///
/// Names without a recognizable number are ignored; with none at all the
/// sequence starts at 1.
pub fn next_sequence_numbers(existing: &[DailyCombo], count: usize) -> Vec<u64> {
    let highest = existing
        .iter()
        .filter_map(DailyCombo::sequence_number)
        .max()
        .unwrap_or(0);
    (1..=count as u64).map(|offset| highest + offset).collect()
}

/// Three item slots, each drawn independently from `SLOT_RANGE`
pub fn draw_slots<R: Rng + ?Sized>(rng: &mut R) -> [u32; 3] {
    [
        rng.gen_range(SLOT_RANGE),
        rng.gen_range(SLOT_RANGE),
        rng.gen_range(SLOT_RANGE),
    ]
}

/// Latest start day among `existing`, used to default the next combo window
pub fn latest_start_day(existing: &[DailyCombo]) -> Option<NaiveDate> {
    existing.iter().filter_map(DailyCombo::start_day).max()
}

pub struct ComboGenerator {
    store: Arc<dyn AdminStore>,
    pool: WorkerPool,
    policy: ExistencePolicy,
    call_timeout: Duration,
    reward: String,
}

impl std::fmt::Debug for ComboGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboGenerator")
            .field("workers", &self.pool.size())
            .field("policy", &self.policy)
            .field("reward", &self.reward)
            .finish()
    }
}

impl ComboGenerator {
    pub fn new(store: Arc<dyn AdminStore>, config: &GeneratorConfig) -> Self {
        Self {
            store,
            pool: WorkerPool::new(config.concurrency_limit),
            policy: config.existence_policy,
            call_timeout: config.call_timeout(),
            reward: DEFAULT_REWARD.to_string(),
        }
    }

    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = reward.into();
        self
    }

    /// Current combos, or an empty snapshot when the listing fails under fail-open
    pub async fn snapshot(&self, cancel: &CancelSignal) -> AdminResult<Vec<DailyCombo>> {
        let listing = guarded(
            cancel,
            self.call_timeout,
            "list daily combos",
            self.store.list_daily_combos(),
        )
        .await;

        match (listing, self.policy) {
            (Ok(combos), _) => Ok(combos),
            (Err(e @ AdminError::Cancelled(_)), _) => Err(e),
            (Err(e), ExistencePolicy::FailOpen) => {
                warn!(error = %e, "Listing combos failed, continuing with an empty snapshot (fail-open)");
                Ok(Vec::new())
            }
            (Err(e), ExistencePolicy::FailClosed) => Err(e),
        }
    }

    /// Create a combo for every day in `range` that has none
    ///
    /// Fails as a whole only when the snapshot cannot be taken (fail-closed or
    /// cancelled) or the reward is not numeric.
    #[instrument(skip_all, fields(range = %range))]
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        range: DateRange,
        rng: &mut R,
        cancel: &CancelSignal,
        progress: Option<ProgressSender>,
    ) -> AdminResult<GenerationReport> {
        if self.reward.trim().parse::<f64>().is_err() {
            return Err(AdminError::Validation(format!(
                "combo_reward: '{}' is not a number",
                self.reward
            )));
        }

        let existing = self.snapshot(cancel).await?;
        let covered: HashMap<NaiveDate, &str> = existing
            .iter()
            .filter_map(|combo| combo.start_day().map(|day| (day, combo.combo_name.as_str())))
            .collect();

        let progress = progress.as_ref();
        let mut outcomes = Vec::new();
        let mut missing = Vec::new();
        for day in range.days() {
            match covered.get(&day) {
                Some(name) => {
                    let outcome = ItemOutcome::skipped(day, *name);
                    emit(&outcome, progress);
                    outcomes.push(outcome);
                }
                None => missing.push(day),
            }
        }

        let drafts = self.build_drafts(&existing, &missing, rng);
        info!(
            planned = range.len(),
            to_create = drafts.len(),
            skipped = outcomes.len(),
            workers = self.pool.size(),
            "Daily combo generation started"
        );

        let pool_outcome = self
            .pool
            .run(&drafts, cancel, |draft| async move {
                let outcome = self.create(draft, cancel).await;
                emit(&outcome, progress);
                outcome
            })
            .await;

        outcomes.extend(pool_outcome.completed.into_iter().map(|(_, outcome)| outcome));
        for index in pool_outcome.unprocessed {
            let draft = &drafts[index];
            let outcome = ItemOutcome::failed(draft.start_date, &draft.combo_name, "cancelled");
            emit(&outcome, progress);
            outcomes.push(outcome);
        }

        let report = GenerationReport::from_outcomes(GenerationKind::DailyCombos, range, outcomes);
        info!(
            created = report.created,
            skipped = report.skipped,
            failed = report.failed,
            "Daily combo generation finished"
        );
        Ok(report)
    }

    /// One draft per missing day, numbered in date order
    pub fn build_drafts<R: Rng + ?Sized>(
        &self,
        existing: &[DailyCombo],
        missing: &[NaiveDate],
        rng: &mut R,
    ) -> Vec<ComboDraft> {
        let numbers = next_sequence_numbers(existing, missing.len());
        missing
            .iter()
            .zip(numbers)
            .map(|(day, number)| {
                let [item_1, item_2, item_3] = draw_slots(rng);
                ComboDraft {
                    combo_name: sequence_name(number),
                    item_1,
                    item_2,
                    item_3,
                    combo_reward: self.reward.clone(),
                    start_date: *day,
                    end_date: *day,
                }
            })
            .collect()
    }

    async fn create(&self, draft: &ComboDraft, cancel: &CancelSignal) -> ItemOutcome {
        match guarded(
            cancel,
            self.call_timeout,
            "create daily combo",
            self.store.create_daily_combo(draft),
        )
        .await
        {
            Ok(()) => ItemOutcome::created(draft.start_date, &draft.combo_name),
            Err(e) => ItemOutcome::failed(draft.start_date, &draft.combo_name, e.reason()),
        }
    }
}
