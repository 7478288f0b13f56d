//! # Backend API Client
//!
//! `AdminStore` is the contract the generators depend on; `AdminApiClient` is the
//! reqwest implementation that talks to the backend REST API.

pub mod api_client;
pub mod traits;

pub use api_client::AdminApiClient;
pub use traits::AdminStore;
