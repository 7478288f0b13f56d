//! In-memory `AdminStore` with concurrency instrumentation and fault injection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use farm_admin::client::AdminStore;
use farm_admin::models::{ComboDraft, DailyCombo, DailyTask, DailyTaskDraft, TaskType};
use farm_admin::{AdminError, AdminResult};

#[derive(Debug, Default)]
pub struct FakeStore {
    tasks: Mutex<Vec<DailyTask>>,
    combos: Mutex<Vec<DailyCombo>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    check_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delay: Duration,
    fail_checks: bool,
    fail_combo_listing: bool,
    stall_creates: bool,
    failing_creates: HashMap<(NaiveDate, TaskType), AdminError>,
    failing_combo_days: HashSet<NaiveDate>,
}

/// Counts one outstanding call for as long as it lives
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_checks(mut self) -> Self {
        self.fail_checks = true;
        self
    }

    pub fn failing_combo_listing(mut self) -> Self {
        self.fail_combo_listing = true;
        self
    }

    /// Create calls never answer
    pub fn stalling_creates(mut self) -> Self {
        self.stall_creates = true;
        self
    }

    pub fn failing_create(mut self, date: NaiveDate, task_type: TaskType, error: AdminError) -> Self {
        self.failing_creates.insert((date, task_type), error);
        self
    }

    pub fn failing_combo_create(mut self, date: NaiveDate) -> Self {
        self.failing_combo_days.insert(date);
        self
    }

    pub fn with_task(self, date: NaiveDate, task_type: TaskType) -> Self {
        {
            let mut tasks = self.tasks.lock();
            let record = task_record(tasks.len(), date, task_type);
            tasks.push(record);
        }
        self
    }

    pub fn with_combo(self, name: &str, date: NaiveDate) -> Self {
        {
            let mut combos = self.combos.lock();
            let id = format!("combo-{}", combos.len());
            combos.push(DailyCombo {
                id,
                combo_name: name.to_string(),
                item_1: 1,
                item_2: 1,
                item_3: 1,
                combo_reward: "125000".to_string(),
                start_date: format!("{date}T00:00:00.000Z"),
                end_date: format!("{date}T00:00:00.000Z"),
                is_active: Some(true),
            });
        }
        self
    }

    pub fn tasks(&self) -> Vec<DailyTask> {
        self.tasks.lock().clone()
    }

    pub fn combos(&self) -> Vec<DailyCombo> {
        self.combos.lock().clone()
    }

    pub fn task_count(&self, date: NaiveDate, task_type: TaskType) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|task| matches_task(task, date, task_type))
            .count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> InFlight<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = InFlight {
            counter: &self.in_flight,
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        guard
    }
}

fn task_record(index: usize, date: NaiveDate, task_type: TaskType) -> DailyTask {
    DailyTask {
        id: format!("task-{index}"),
        task_name: format!("{task_type} task"),
        task_summary: String::new(),
        task_medium: "Other".to_string(),
        task_link: "example.com".to_string(),
        task_reward: "50000".to_string(),
        task_type: Some(task_type.to_string()),
        start_date: format!("{date}T00:00:00.000Z"),
        end_date: format!("{date}T00:00:00.000Z"),
    }
}

fn matches_task(task: &DailyTask, date: NaiveDate, task_type: TaskType) -> bool {
    task.start_day() == Some(date) && task.task_type.as_deref() == Some(task_type.as_str())
}

fn unavailable() -> AdminError {
    AdminError::Http {
        message: "connection refused".to_string(),
        transient: true,
    }
}

#[async_trait]
impl AdminStore for FakeStore {
    async fn find_daily_tasks(
        &self,
        date: NaiveDate,
        task_type: TaskType,
    ) -> AdminResult<Vec<DailyTask>> {
        let _guard = self.enter().await;
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_checks {
            return Err(unavailable());
        }
        Ok(self
            .tasks
            .lock()
            .iter()
            .filter(|task| matches_task(task, date, task_type))
            .cloned()
            .collect())
    }

    async fn create_daily_task(&self, draft: &DailyTaskDraft) -> AdminResult<()> {
        let _guard = self.enter().await;
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_creates {
            std::future::pending::<()>().await;
        }
        let key = (draft.start_date, draft.template.task_type);
        if let Some(error) = self.failing_creates.get(&key) {
            return Err(error.clone());
        }
        let mut tasks = self.tasks.lock();
        let record = task_record(tasks.len(), draft.start_date, draft.template.task_type);
        tasks.push(record);
        Ok(())
    }

    async fn list_daily_combos(&self) -> AdminResult<Vec<DailyCombo>> {
        let _guard = self.enter().await;
        if self.fail_combo_listing {
            return Err(unavailable());
        }
        Ok(self.combos.lock().clone())
    }

    async fn create_daily_combo(&self, draft: &ComboDraft) -> AdminResult<()> {
        let _guard = self.enter().await;
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_combo_days.contains(&draft.start_date) {
            return Err(AdminError::api_error(500, "Failed to create combo"));
        }
        let mut combos = self.combos.lock();
        let id = format!("combo-{}", combos.len());
        combos.push(DailyCombo {
            id,
            combo_name: draft.combo_name.clone(),
            item_1: draft.item_1,
            item_2: draft.item_2,
            item_3: draft.item_3,
            combo_reward: draft.combo_reward.clone(),
            start_date: draft.start_date.to_string(),
            end_date: draft.end_date.to_string(),
            is_active: Some(true),
        });
        Ok(())
    }
}
