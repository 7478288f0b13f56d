#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Farm Admin
//!
//! Administrative core for a Telegram farming application: idempotent batch
//! generation of daily tasks and daily combos against the backend REST API.
//!
//! ## Overview
//!
//! The backend owns persistence; this crate owns the planning and orchestration
//! around it. A date range (explicit, or derived for scheduled runs) is expanded
//! into calendar days, and for every day the generator checks what already exists
//! before creating anything, with a small bounded pool of concurrent workers.
//!
//! ## Module Organization
//!
//! - [`planner`] - Date-range expansion and default ranges
//! - [`generator`] - Worker pool, daily task and daily combo generators, reports
//! - [`client`] - The `AdminStore` contract and its HTTP implementation
//! - [`cron`] - The unattended "next week" run
//! - [`web`] - HTTP trigger endpoint and probes
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use farm_admin::client::AdminApiClient;
//! use farm_admin::config::AdminConfig;
//! use farm_admin::generator::{BatchTaskGenerator, CancelSignal};
//! use farm_admin::models::TaskTemplate;
//! use farm_admin::planner::DateRange;
//!
//! # async fn example() -> farm_admin::AdminResult<()> {
//! let config = AdminConfig::load()?;
//! let store = Arc::new(AdminApiClient::new(config.api.clone())?);
//! let generator = BatchTaskGenerator::new(store, &config.generator);
//!
//! let range = DateRange::parse("2024-06-01", "2024-06-03")?;
//! let report = generator
//!     .generate(range, &TaskTemplate::scheduled_defaults(), &CancelSignal::never(), None)
//!     .await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod cron;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod planner;
pub mod utils;
pub mod web;

pub use config::{AdminConfig, ExistencePolicy};
pub use constants::CONCURRENCY_LIMIT;
pub use error::{AdminError, AdminResult};
pub use generator::{BatchTaskGenerator, ComboGenerator, GenerationReport};
pub use planner::{dates_between, DateRange};
