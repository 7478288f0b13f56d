//! # Batch Generation
//!
//! Idempotent creation of daily content over a date range:
//!
//! - [`tasks`] - one daily task per `(date, task type)` with read-before-write checks
//! - [`combos`] - one daily combo per uncovered date, numbered from a single snapshot
//! - [`pool`] - the bounded worker pool, per-call timeouts and cancellation
//! - [`report`] - per-item outcomes, live progress and run summaries

pub mod combos;
pub mod pool;
pub mod report;
pub mod tasks;

pub use combos::{draw_slots, latest_start_day, next_sequence_numbers, ComboGenerator};
pub use pool::{guarded, CancelHandle, CancelSignal, PoolOutcome, WorkerPool};
pub use report::{GenerationKind, GenerationReport, ItemOutcome, OutcomeStatus, ProgressSender};
pub use tasks::BatchTaskGenerator;
