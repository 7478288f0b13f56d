//! CLI module for the farm-admin tool
//!
//! Command handlers, one module per command group.

pub mod commands;

pub use commands::{
    handle_combo_command, handle_config_command, handle_cron_command, handle_generate_command,
    handle_serve_command, handle_task_command,
};
