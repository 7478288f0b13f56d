//! Command handlers for the farm-admin CLI

mod combos;
mod config;
mod cron;
mod generate;
mod serve;
mod tasks;

pub use combos::handle_combo_command;
pub use config::handle_config_command;
pub use cron::handle_cron_command;
pub use generate::handle_generate_command;
pub use serve::handle_serve_command;
pub use tasks::handle_task_command;
