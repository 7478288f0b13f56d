//! Shared test helpers for the integration suites.
#![allow(dead_code)]

pub mod fake_store;
pub mod strategies;

use chrono::NaiveDate;
use farm_admin::config::{ExistencePolicy, GeneratorConfig};

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn generator_config() -> GeneratorConfig {
    GeneratorConfig::default()
}

pub fn fail_closed_config() -> GeneratorConfig {
    GeneratorConfig {
        existence_policy: ExistencePolicy::FailClosed,
        ..GeneratorConfig::default()
    }
}

pub fn short_timeout_config(call_timeout_ms: u64) -> GeneratorConfig {
    GeneratorConfig {
        call_timeout_ms,
        ..GeneratorConfig::default()
    }
}
