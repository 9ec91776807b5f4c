//! Journey search error types.

use std::fmt;

use serde::Serialize;

use crate::domain::StationId;

/// Which end of the requested journey an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationSide {
    Departure,
    Destination,
}

impl fmt::Display for StationSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationSide::Departure => f.write_str("departure"),
            StationSide::Destination => f.write_str("destination"),
        }
    }
}

/// Broad classification of a journey search failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing credentials; not retryable.
    Configuration,
    /// Unknown station or no journey; terminal.
    NotFound,
    /// The planner rejected the credentials.
    Authentication,
    /// The planner did not answer in time, or the caller cancelled.
    Timeout,
    /// Any other upstream failure.
    Upstream,
}

/// Errors from a journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    /// No API key configured
    #[error("journey planner API key is not configured")]
    MissingApiKey,

    /// Station id unknown to the catalog, or without coordinates
    #[error("{side} station not found (id: {id})")]
    StationNotFound { side: StationSide, id: StationId },

    /// Planner answered 401
    #[error("journey planner rejected the API key")]
    InvalidCredentials,

    /// Planner answered 404
    #[error("no journey found")]
    NoJourneyFound,

    /// Planner reported zero journeys along with an error message
    #[error("journey planner error: {message}")]
    Planner { message: String },

    /// Request timed out or was cancelled
    #[error("journey planner request timed out")]
    Timeout,

    /// Planner answered with another non-success status
    #[error("journey planner returned HTTP {status}")]
    Upstream { status: u16 },

    /// Request could not be sent or its body not read
    #[error("journey planner transport error: {0}")]
    Transport(String),

    /// Body was not a journeys document
    #[error("malformed journey planner response: {0}")]
    Malformed(String),
}

impl JourneyError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JourneyError::MissingApiKey => ErrorKind::Configuration,
            JourneyError::StationNotFound { .. }
            | JourneyError::NoJourneyFound
            | JourneyError::Planner { .. } => ErrorKind::NotFound,
            JourneyError::InvalidCredentials => ErrorKind::Authentication,
            JourneyError::Timeout => ErrorKind::Timeout,
            JourneyError::Upstream { .. }
            | JourneyError::Transport(_)
            | JourneyError::Malformed(_) => ErrorKind::Upstream,
        }
    }
}

impl From<reqwest::Error> for JourneyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JourneyError::Timeout
        } else if let Some(status) = err.status() {
            JourneyError::Upstream {
                status: status.as_u16(),
            }
        } else {
            JourneyError::Transport(err.to_string())
        }
    }
}

/// A journey record that could not be decoded and was left out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("skipped journey #{index}: {reason}")]
pub struct ParseSkip {
    /// Position of the record in the planner response.
    pub index: usize,
    pub reason: String,
}
