//! Core error types for dayplan-core.
//!
//! Invariant violations in the input snapshot reject the whole pass and
//! surface as a `ValidationError`. Individual tasks that cannot be placed
//! are not errors; they flow into `Plan::unscheduled` with a reason string.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top-level error type for planning entry points.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Input snapshot violates a structural invariant
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors at the host boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors (snapshot loading in host tooling)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural invariant violations in the input snapshot.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task duration is not a positive multiple of the 15-minute grid
    #[error("Invalid duration for task '{id}': {minutes} minutes (must be a positive multiple of 15)")]
    InvalidDuration { id: String, minutes: i64 },

    /// Scheduled start is not strictly before scheduled end
    #[error("Invalid time range for task '{id}': start {start} is not before end {end}")]
    InvalidTimeRange {
        id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Work end hour does not exceed work start hour
    #[error("Invalid work hours: end hour {end_hour} must be greater than start hour {start_hour}")]
    InvalidWorkHours { start_hour: u32, end_hour: u32 },

    /// Earliest-start bound lies after the latest-end bound
    #[error("Invalid window for task '{id}': earliest start {earliest} is after latest end {latest}")]
    InvalidWindow {
        id: String,
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },

    /// A settings field holds an out-of-range or misaligned value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for PlanError
pub type Result<T, E = PlanError> = std::result::Result<T, E>;
