//! # System Constants
//!
//! Operational boundaries for batch generation and the names and defaults shared
//! with the backend API.

/// Default number of concurrent generator workers
pub const CONCURRENCY_LIMIT: usize = 3;

/// Default per-call timeout for existence checks and create calls
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 15_000;

/// Default backend request timeout; kept below the per-call timeout so reads can retry
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5_000;

/// Upper bound on configured read retries
pub const MAX_READ_RETRIES: u32 = 10;

/// Longest pause between two read attempts
pub const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Backend API endpoints (relative to the configured base URL)
pub mod endpoints {
    pub const DAILY_TASKS: &str = "admin/tasks/dailytasks";
    pub const ADD_DAILY_TASK: &str = "admin/tasks/add-dailytasks";
    pub const DELETE_DAILY_TASK: &str = "admin/tasks/delete-dailytasks";
    pub const DAILY_COMBOS: &str = "admin/dailycombo";
    pub const CREATE_DAILY_COMBO: &str = "admin/dailycombo/create";
    pub const CURRENT_DAILY_COMBO: &str = "admin/dailycombo/currentdailycombo";
}

pub mod combo {
    use std::ops::RangeInclusive;

    /// Prefix of sequentially numbered combo names ("Daily Combo 8")
    pub const NAME_PREFIX: &str = "Daily Combo";
    /// Each item slot is drawn uniformly from this range; repeats are allowed
    pub const SLOT_RANGE: RangeInclusive<u32> = 1..=9;
    pub const DEFAULT_REWARD: &str = "125000";
    /// Length in days of the default interactive combo window
    pub const DEFAULT_WINDOW_DAYS: i64 = 15;
}

pub mod task {
    pub const DEFAULT_REWARD: &str = "50000";
    pub const DEFAULT_IMAGE: &str = "other.png";
    pub const ACTIVE: &str = "1";
}

/// Status glyphs used in live progress lines
pub mod status {
    pub const SUCCESS: &str = "✅";
    pub const FAILURE: &str = "❌";
    pub const SKIPPED: &str = "⏭";
}
