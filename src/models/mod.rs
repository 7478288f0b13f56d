//! # Models
//!
//! Records exchanged with the backend API. The backend owns identity: drafts carry
//! no id, and records only ever come back from list calls.

pub mod combo;
pub mod task;

use serde::{Deserialize, Serialize};

pub use combo::{ComboDraft, DailyCombo};
pub use task::{DailyTask, DailyTaskDraft, TaskMedium, TaskTemplate, TaskType};

/// `{ "data": [...] }` envelope used by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Error body the backend attaches to failed writes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}
