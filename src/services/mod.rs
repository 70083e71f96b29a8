//! External service interactions
//!
//! - Shelter API client and the two-phase catalog fetch
//! - Background request execution with stale-reply filtering

pub mod api;
pub mod request_runner;

pub use api::{HttpShelterApi, ShelterApi};
pub use request_runner::{Reply, RequestRunner};
