//! Web API handlers.

pub mod cron;
pub mod health;
