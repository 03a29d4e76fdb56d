//! Host-persisted blob shapes.
//!
//! The host application stores five keyed records: tasks, projects,
//! settings, free-form notes, and user stats. Persistence itself is the
//! host's concern; these types only fix the wire shape so any host can
//! interoperate. Moments serialize as RFC3339 strings, durations as
//! integer minutes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::PlannerSettings;
use crate::task::Task;

/// A project grouping related tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate usage counters kept by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub total_focus_minutes: u64,
    #[serde(default)]
    pub current_streak_days: u32,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

/// The full persisted state, as handed to planning entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub settings: PlannerSettings,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub stats: UserStats,
}
