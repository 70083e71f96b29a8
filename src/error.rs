//! Error types
//!
//! `ApiError` describes what went wrong talking to the shelter API.
//! `ShelterError` is what the user sees: one variant per failure kind
//! (login, fetching data, generating a match).

use thiserror::Error;

/// Endpoint names used in error messages and log lines
pub mod endpoint {
    pub const LOGIN: &str = "/auth/login";
    pub const BREEDS: &str = "/dogs/breeds";
    pub const SEARCH: &str = "/dogs/search";
    pub const DOGS: &str = "/dogs";
    pub const MATCH: &str = "/dogs/match";
}

/// Failure of a single remote call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout)
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The body could not be decoded as the expected JSON shape
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The endpoint the failed request was sent to
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// User-facing failure kinds
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShelterError {
    /// Non-success login response
    #[error("Login failed. Please check your name and email.")]
    Auth,

    /// Breeds, search or detail call failed
    #[error("{0}")]
    Fetch(String),

    /// Match call failed or the returned id is not one of the favorites
    #[error("Could not generate a match: {0}")]
    Match(String),
}

impl ShelterError {
    /// Map a failed breeds/search/detail call to the message shown in place of the view
    pub fn fetch(err: &ApiError) -> Self {
        let message = match err.endpoint() {
            endpoint::BREEDS => "Failed to fetch breeds",
            endpoint::SEARCH => "Failed to fetch dog IDs",
            _ => "Failed to fetch dogs",
        };
        ShelterError::Fetch(message.to_string())
    }

    /// Map a failed match call
    pub fn matching(err: &ApiError) -> Self {
        match err {
            ApiError::Status { status, .. } => {
                ShelterError::Match(format!("the server responded with HTTP {}", status))
            }
            ApiError::Transport { .. } => {
                ShelterError::Match("the shelter service could not be reached".to_string())
            }
            ApiError::Decode { .. } => {
                ShelterError::Match("the shelter service sent an unexpected reply".to_string())
            }
        }
    }

    /// The returned match id does not belong to any favorite
    pub fn unknown_match(id: &str) -> Self {
        ShelterError::Match(format!("dog '{}' is not among your favorites", id))
    }
}
