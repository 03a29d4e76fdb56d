//! Drift detection: how far the live clock has run past the plan.
//!
//! Hosts poll this once a minute and surface the figure as a "running N
//! minutes behind" indicator.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Maximum minutes by which `now` has passed the scheduled end of any
/// incomplete task. Zero when nothing has slipped.
pub fn drift(tasks: &[Task], now: DateTime<Utc>) -> i64 {
    tasks
        .iter()
        .filter(|t| !t.status.is_done())
        .filter_map(|t| t.scheduled_end)
        .filter(|end| *end < now)
        .map(|end| (now - end).num_minutes())
        .max()
        .unwrap_or(0)
}
