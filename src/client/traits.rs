//! # Admin Store Trait
//!
//! The slice of the backend API the batch generators depend on. `AdminApiClient`
//! implements it over HTTP; tests substitute in-memory stores.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AdminResult;
use crate::models::{ComboDraft, DailyCombo, DailyTask, DailyTaskDraft, TaskType};

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Existing daily tasks of `task_type` on `date`
    ///
    /// `GET /admin/tasks/dailytasks?date=D&type=T`
    async fn find_daily_tasks(
        &self,
        date: NaiveDate,
        task_type: TaskType,
    ) -> AdminResult<Vec<DailyTask>>;

    /// `POST /admin/tasks/add-dailytasks`
    async fn create_daily_task(&self, draft: &DailyTaskDraft) -> AdminResult<()>;

    /// `GET /admin/dailycombo`
    async fn list_daily_combos(&self) -> AdminResult<Vec<DailyCombo>>;

    /// `POST /admin/dailycombo/create`
    async fn create_daily_combo(&self, draft: &ComboDraft) -> AdminResult<()>;
}
