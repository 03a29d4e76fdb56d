//! Task and slot value types shared by all planning engines.
//!
//! A `Task` is the scheduling unit owned by the host application; the
//! planner receives an immutable snapshot and returns freshly allocated
//! output. Durations are integer minutes on the 15-minute grid, and all
//! moments are absolute UTC instants (serialized as RFC3339 at the
//! boundary).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::minutes_between;

/// Unique identifier for a task.
pub type TaskId = String;

/// Project marker carried by synthetic break tasks. Downstream components
/// exclude tasks under this project from workload and conflict accounting.
pub const BREAK_PROJECT_ID: &str = "system-break";

/// Task priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ranker weight: High=3, Medium=2, Low=1.
    pub fn weight(self) -> i64 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl Status {
    pub fn is_done(self) -> bool {
        matches!(self, Status::Done)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Todo
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Todo => write!(f, "To Do"),
            Status::InProgress => write!(f, "In Progress"),
            Status::Done => write!(f, "Done"),
        }
    }
}

/// Energy level a task is best matched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., end of day)
    Low,
    /// Medium energy
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::Low => write!(f, "low"),
            EnergyLevel::Medium => write!(f, "medium"),
            EnergyLevel::High => write!(f, "high"),
        }
    }
}

/// An available interval on the planning grid.
///
/// Slots produced by the availability engine never overlap and stay sorted
/// by start; the placement engine owns the slot list exclusively during a
/// pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    /// Half-open overlap test against another interval.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// The scheduling unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier
    pub id: TaskId,
    /// Task title
    pub title: String,
    /// Planned duration in minutes; positive multiple of 15
    pub duration_minutes: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    /// Optional project the task belongs to
    #[serde(default)]
    pub project_id: Option<String>,
    /// Deadline date, interpreted as end-of-day
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Scheduled interval; set by the planner or by manual moves
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Immovable: the planner treats this task as a blocker, never a subject
    #[serde(default)]
    pub is_fixed: bool,
    /// Identifiers of tasks that must be Done before this one may begin
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Optional energy tag steering slot selection
    #[serde(default)]
    pub energy: Option<EnergyLevel>,
    /// Earliest moment the task may start
    #[serde(default)]
    pub earliest_start: Option<DateTime<Utc>>,
    /// Latest moment the task may end
    #[serde(default)]
    pub latest_end: Option<DateTime<Utc>>,
    /// Lightweight to-do list entry; alternated with project tasks
    #[serde(default)]
    pub is_todo_list: bool,
    /// Original task id when this row is a split part
    #[serde(default)]
    pub original_task_id: Option<TaskId>,
    /// 1-based index among the split parts of the original task
    #[serde(default)]
    pub part_index: Option<u32>,
    /// Total number of parts the original task was split into
    #[serde(default)]
    pub total_parts: Option<u32>,
    /// Human-readable note on why the planner placed the task where it did
    #[serde(default)]
    pub schedule_reason: Option<String>,
}

impl Task {
    /// Create a task with the given title and duration; everything else
    /// takes defaults.
    pub fn new(title: impl Into<String>, duration_minutes: u32) -> Self {
        Task {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            title: title.into(),
            duration_minutes,
            priority: Priority::default(),
            status: Status::default(),
            project_id: None,
            deadline: None,
            scheduled_start: None,
            scheduled_end: None,
            is_fixed: false,
            dependencies: Vec::new(),
            energy: None,
            earliest_start: None,
            latest_end: None,
            is_todo_list: false,
            original_task_id: None,
            part_index: None,
            total_parts: None,
            schedule_reason: None,
        }
    }

    /// Synthesize a break task over `[start, end)`. Break tasks carry the
    /// system break project marker and are emitted immovable.
    pub fn break_task(start: DateTime<Utc>, end: DateTime<Utc>, long: bool) -> Self {
        let mut task = Task::new(if long { "Long break" } else { "Short break" }, 0);
        task.id = format!("break-{}", uuid::Uuid::new_v4());
        task.duration_minutes = minutes_between(start, end).max(0) as u32;
        task.priority = Priority::Low;
        task.project_id = Some(BREAK_PROJECT_ID.to_string());
        task.scheduled_start = Some(start);
        task.scheduled_end = Some(end);
        task.is_fixed = true;
        task
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<TaskId>) -> Self {
        self.dependencies = deps;
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_window(
        mut self,
        earliest_start: Option<DateTime<Utc>>,
        latest_end: Option<DateTime<Utc>>,
    ) -> Self {
        self.earliest_start = earliest_start;
        self.latest_end = latest_end;
        self
    }

    pub fn as_todo_list(mut self) -> Self {
        self.is_todo_list = true;
        self
    }

    /// Pin the task at a fixed interval so the planner schedules around it.
    pub fn fixed_at(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.scheduled_start = Some(start);
        self.scheduled_end = Some(end);
        self.is_fixed = true;
        self
    }

    /// Whether this is a synthetic break task.
    pub fn is_break(&self) -> bool {
        self.project_id.as_deref() == Some(BREAK_PROJECT_ID)
    }

    /// Scheduled interval, when both endpoints are set.
    pub fn scheduled_interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.scheduled_start, self.scheduled_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Whether the planner may (re)place this task in a pass starting at
    /// `now`. Fixed and Done tasks are never subjects; with overdue
    /// rescheduling off, tasks whose schedule already slipped into the past
    /// keep their assignment.
    pub fn is_schedulable(&self, now: DateTime<Utc>, reschedule_overdue: bool) -> bool {
        if self.is_fixed || self.status.is_done() || self.is_break() {
            return false;
        }
        if !reschedule_overdue {
            if let Some(end) = self.scheduled_end {
                if end < now {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn priority_weights() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
        assert!(Priority::High > Priority::Low);
    }

    #[test]
    fn status_serialization_uses_display_names() {
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"To Do\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"Done\"");

        let decoded: Status = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(decoded, Status::Todo);
    }

    #[test]
    fn priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        let decoded: Priority = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(decoded, Priority::Low);
    }

    #[test]
    fn energy_serialization_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnergyLevel::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn slot_duration_and_overlap() {
        let slot = Slot::new(at(9, 0), at(10, 30));
        assert_eq!(slot.duration_minutes(), 90);
        assert!(slot.overlaps(at(10, 0), at(11, 0)));
        // Half-open: touching is not overlapping
        assert!(!slot.overlaps(at(10, 30), at(11, 0)));
    }

    #[test]
    fn break_task_carries_marker() {
        let task = Task::break_task(at(10, 0), at(10, 15), false);
        assert!(task.is_break());
        assert!(task.is_fixed);
        assert_eq!(task.duration_minutes, 15);
        assert_eq!(task.title, "Short break");

        let long = Task::break_task(at(10, 0), at(10, 30), true);
        assert_eq!(long.title, "Long break");
    }

    #[test]
    fn schedulable_excludes_fixed_done_and_breaks() {
        let now = at(12, 0);
        let task = Task::new("A", 60);
        assert!(task.is_schedulable(now, true));

        let mut fixed = Task::new("B", 60);
        fixed.is_fixed = true;
        assert!(!fixed.is_schedulable(now, true));

        let mut done = Task::new("C", 60);
        done.status = Status::Done;
        assert!(!done.is_schedulable(now, true));

        assert!(!Task::break_task(at(9, 0), at(9, 15), false).is_schedulable(now, true));
    }

    #[test]
    fn schedulable_respects_overdue_flag() {
        let now = at(12, 0);
        let mut overdue = Task::new("A", 60);
        overdue.scheduled_start = Some(at(9, 0));
        overdue.scheduled_end = Some(at(10, 0));
        assert!(overdue.is_schedulable(now, true));
        assert!(!overdue.is_schedulable(now, false));

        // A future assignment is always re-plannable
        let mut future = Task::new("B", 60);
        future.scheduled_start = Some(at(14, 0));
        future.scheduled_end = Some(at(15, 0));
        assert!(future.is_schedulable(now, false));
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = Task::new("Write report", 90)
            .with_id("t1")
            .with_priority(Priority::High)
            .with_deadline(NaiveDate::from_ymd_opt(2026, 3, 6).unwrap())
            .with_energy(EnergyLevel::High)
            .with_dependencies(vec!["t0".to_string()]);

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"durationMinutes\":90"));
        assert!(json.contains("\"isFixed\":false"));

        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let json = r#"{"id":"t1","title":"Quick","durationMinutes":30}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Todo);
        assert!(task.dependencies.is_empty());
        assert!(!task.is_todo_list);
    }
}
