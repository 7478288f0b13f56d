//! Web API middleware.

pub mod auth;
