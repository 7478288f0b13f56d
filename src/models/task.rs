//! Daily Task Models
//!
//! `TaskTemplate` holds the default field values a generated daily task starts
//! from. `DailyTaskDraft` is the create payload for one day, and `DailyTask` is a
//! record as the backend returns it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::task::{ACTIVE, DEFAULT_IMAGE, DEFAULT_REWARD};
use crate::error::{AdminError, AdminResult};
use crate::utils::serde::{deserialize_string_or_number, parse_calendar_day};

/// Kind of daily task; one instance of each configured type exists per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Ad,
    Story,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Ad => "Ad",
            TaskType::Story => "Story",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ad" => Ok(TaskType::Ad),
            "story" => Ok(TaskType::Story),
            other => Err(AdminError::InvalidInput(format!(
                "Unknown task type '{other}' (expected Ad or Story)"
            ))),
        }
    }
}

/// Platform a task points the user at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMedium {
    Youtube,
    Telegram,
    X,
    Facebook,
    #[default]
    Other,
}

impl FromStr for TaskMedium {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(TaskMedium::Youtube),
            "telegram" => Ok(TaskMedium::Telegram),
            "x" => Ok(TaskMedium::X),
            "facebook" => Ok(TaskMedium::Facebook),
            "other" => Ok(TaskMedium::Other),
            other => Err(AdminError::InvalidInput(format!("Unknown task medium '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub task_name: String,
    pub task_medium: TaskMedium,
    pub task_summary: String,
    pub task_link: String,
    pub is_active: String,
    pub task_reward: String,
    pub task_image: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

impl TaskTemplate {
    /// "Watch Mini Video" ad task
    pub fn ad() -> Self {
        Self {
            task_name: "Watch Mini Video".to_string(),
            task_medium: TaskMedium::Other,
            task_summary: String::new(),
            task_link: "ads.com".to_string(),
            is_active: ACTIVE.to_string(),
            task_reward: DEFAULT_REWARD.to_string(),
            task_image: DEFAULT_IMAGE.to_string(),
            task_type: TaskType::Ad,
        }
    }

    /// "Publish a Story" story task
    pub fn story() -> Self {
        Self {
            task_name: "Publish a Story".to_string(),
            task_link: "story.com".to_string(),
            task_type: TaskType::Story,
            ..Self::ad()
        }
    }

    pub fn for_type(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Ad => Self::ad(),
            TaskType::Story => Self::story(),
        }
    }

    /// The two templates the scheduled run ensures for every day
    pub fn scheduled_defaults() -> Vec<Self> {
        vec![Self::ad(), Self::story()]
    }

    /// Check the fields an operator can edit before an interactive run
    ///
    /// Every failing field is reported, not only the first.
    pub fn validate(&self) -> AdminResult<()> {
        let mut errors = Vec::new();

        if self.task_name.trim().is_empty() {
            errors.push("task_name: Enter Task Name");
        }
        if self.task_link.trim().is_empty() {
            errors.push("task_link: Enter Task Link");
        }
        if self.task_reward.trim().is_empty() {
            errors.push("task_reward: Enter Task Reward");
        } else if self.task_reward.trim().parse::<f64>().is_err() {
            errors.push("task_reward: Enter a valid number for Task Reward");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(errors.join("; ")))
        }
    }

    /// Materialize the create payload for a single day
    pub fn instantiate(&self, date: NaiveDate) -> DailyTaskDraft {
        DailyTaskDraft {
            template: self.clone(),
            start_date: date,
            end_date: date,
        }
    }
}

/// Body of `POST /admin/tasks/add-dailytasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskDraft {
    #[serde(flatten)]
    pub template: TaskTemplate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Daily task record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub task_summary: String,
    #[serde(default)]
    pub task_medium: String,
    #[serde(default)]
    pub task_link: String,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub task_reward: String,
    #[serde(rename = "type", default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl DailyTask {
    pub fn start_day(&self) -> Option<NaiveDate> {
        parse_calendar_day(&self.start_date)
    }
}
