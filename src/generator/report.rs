//! # Generation Reports
//!
//! Per-item outcomes and the aggregate counts of a generation run. Outcomes are
//! also streamed one at a time to an optional progress channel so interactive
//! callers can print status lines while the run is still going.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::constants::status;
use crate::logging::log_generation_operation;
use crate::planner::{format_day, DateRange};

/// Live progress stream of an interactive run
pub type ProgressSender = mpsc::UnboundedSender<ItemOutcome>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Created,
    Skipped,
    Failed { reason: String },
}

/// Result for one `(date, kind)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub date: NaiveDate,
    /// Task type ("Ad", "Story") or combo name
    pub kind: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ItemOutcome {
    pub fn created(date: NaiveDate, kind: impl Into<String>) -> Self {
        Self {
            date,
            kind: kind.into(),
            status: OutcomeStatus::Created,
        }
    }

    pub fn skipped(date: NaiveDate, kind: impl Into<String>) -> Self {
        Self {
            date,
            kind: kind.into(),
            status: OutcomeStatus::Skipped,
        }
    }

    pub fn failed(date: NaiveDate, kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            date,
            kind: kind.into(),
            status: OutcomeStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.status {
            OutcomeStatus::Created => "created",
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Failed { .. } => "failed",
        }
    }

    /// Human-readable progress line, e.g. `2024-06-01 Ad: ✅ created`
    pub fn status_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = format_day(self.date);
        match &self.status {
            OutcomeStatus::Created => write!(f, "{day} {}: {} created", self.kind, status::SUCCESS),
            OutcomeStatus::Skipped => write!(
                f,
                "{day} {}: {} already exists",
                self.kind,
                status::SKIPPED
            ),
            OutcomeStatus::Failed { reason } => {
                write!(f, "{day} {}: {} {reason}", self.kind, status::FAILURE)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    DailyTasks,
    DailyCombos,
}

/// Aggregate result of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub kind: GenerationKind,
    pub range: DateRange,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Outcomes sorted by date, then by kind
    pub outcomes: Vec<ItemOutcome>,
}

impl GenerationReport {
    pub fn from_outcomes(
        kind: GenerationKind,
        range: DateRange,
        mut outcomes: Vec<ItemOutcome>,
    ) -> Self {
        outcomes.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.kind.cmp(&b.kind)));

        let mut report = Self {
            kind,
            range,
            created: 0,
            skipped: 0,
            failed: 0,
            outcomes: Vec::new(),
        };
        for outcome in &outcomes {
            match outcome.status {
                OutcomeStatus::Created => report.created += 1,
                OutcomeStatus::Skipped => report.skipped += 1,
                OutcomeStatus::Failed { .. } => report.failed += 1,
            }
        }
        report.outcomes = outcomes;
        report
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Final summary shown at the end of an interactive run
    pub fn summary(&self) -> String {
        match self.kind {
            GenerationKind::DailyCombos
                if self.created == 0 && self.failed == 0 && self.skipped == self.total() =>
            {
                "All selected dates already have daily combos!".to_string()
            }
            GenerationKind::DailyCombos => {
                let mut text = format!(
                    "{} daily combos generated successfully! ({} existing combos skipped)",
                    self.created, self.skipped
                );
                if self.failed > 0 {
                    text.push_str(&format!(", {} failed", self.failed));
                }
                text
            }
            GenerationKind::DailyTasks => format!(
                "{} daily tasks created, {} skipped (already existed), {} failed for {}",
                self.created, self.skipped, self.failed, self.range
            ),
        }
    }
}

/// Log one outcome and forward it to the live progress stream
pub(crate) fn emit(outcome: &ItemOutcome, progress: Option<&ProgressSender>) {
    let details = match &outcome.status {
        OutcomeStatus::Failed { reason } => Some(reason.as_str()),
        _ => None,
    };
    log_generation_operation(
        "ensure_instance",
        &format_day(outcome.date),
        &outcome.kind,
        outcome.status_label(),
        details,
    );
    if let Some(sender) = progress {
        // The receiver may have gone away; the report still carries the outcome
        let _ = sender.send(outcome.clone());
    }
}
