//! User-facing planner settings.
//!
//! Settings arrive from the host as one of its persisted blobs; every
//! field has a serde default so sparse or legacy records deserialize
//! cleanly. `validate()` is called at the top of each planning pass.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::grid::GRID_MINUTES;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSettings {
    /// First working hour of the day (0-23)
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    /// Hour the working day ends (0-23, exclusive, must exceed start)
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    /// Active weekdays, 0=Sunday .. 6=Saturday
    #[serde(default = "default_active_days")]
    pub active_days: Vec<u8>,
    /// Subdivide free windows into focus/break rhythm
    #[serde(default = "default_true")]
    pub enable_chunking: bool,
    /// Focus chunk length in minutes (multiple of 15)
    #[serde(default = "default_focus_chunk_minutes")]
    pub focus_chunk_minutes: u32,
    /// Short break length in minutes (multiple of 15)
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    /// Long break length in minutes (multiple of 15)
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// A long break replaces every Nth short break
    #[serde(default = "default_long_break_cadence")]
    pub long_break_cadence: u32,
    /// Duration assigned to tasks created without an estimate
    #[serde(default = "default_task_duration")]
    pub default_task_duration: u32,
    /// Reserved gap between placements; carried for hosts but not applied
    /// by the placement loop
    #[serde(default)]
    pub planning_buffer_minutes: u32,
    /// Re-place incomplete tasks whose schedule slipped into the past
    #[serde(default = "default_true")]
    pub auto_reschedule_overdue: bool,
}

fn default_work_start_hour() -> u32 {
    9
}
fn default_work_end_hour() -> u32 {
    17
}
fn default_active_days() -> Vec<u8> {
    vec![1, 2, 3, 4, 5]
}
fn default_true() -> bool {
    true
}
fn default_focus_chunk_minutes() -> u32 {
    90
}
fn default_short_break_minutes() -> u32 {
    15
}
fn default_long_break_minutes() -> u32 {
    30
}
fn default_long_break_cadence() -> u32 {
    3
}
fn default_task_duration() -> u32 {
    60
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            work_start_hour: default_work_start_hour(),
            work_end_hour: default_work_end_hour(),
            active_days: default_active_days(),
            enable_chunking: true,
            focus_chunk_minutes: default_focus_chunk_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_cadence: default_long_break_cadence(),
            default_task_duration: default_task_duration(),
            planning_buffer_minutes: 0,
            auto_reschedule_overdue: true,
        }
    }
}

impl PlannerSettings {
    /// Check all recognized option constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_start_hour > 23 || self.work_end_hour > 23 {
            return Err(ValidationError::InvalidValue {
                field: "work_hours".to_string(),
                message: format!(
                    "hours must be within 0-23, got {}-{}",
                    self.work_start_hour, self.work_end_hour
                ),
            });
        }
        if self.work_end_hour <= self.work_start_hour {
            return Err(ValidationError::InvalidWorkHours {
                start_hour: self.work_start_hour,
                end_hour: self.work_end_hour,
            });
        }
        if let Some(day) = self.active_days.iter().find(|d| **d > 6) {
            return Err(ValidationError::InvalidValue {
                field: "active_days".to_string(),
                message: format!("weekday {day} is out of range 0-6"),
            });
        }
        for (field, minutes) in [
            ("focus_chunk_minutes", self.focus_chunk_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
        ] {
            if minutes as i64 % GRID_MINUTES != 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{minutes} is not a multiple of 15"),
                });
            }
        }
        if (self.focus_chunk_minutes as i64) < GRID_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "focus_chunk_minutes".to_string(),
                message: "must be at least 15".to_string(),
            });
        }
        if self.long_break_cadence < 2 {
            return Err(ValidationError::InvalidValue {
                field: "long_break_cadence".to_string(),
                message: "must be at least 2".to_string(),
            });
        }
        if (self.default_task_duration as i64) < GRID_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "default_task_duration".to_string(),
                message: "must be at least 15".to_string(),
            });
        }
        Ok(())
    }

    /// Whether a weekday (0=Sunday) is active.
    pub fn is_active_day(&self, weekday: u8) -> bool {
        self.active_days.contains(&weekday)
    }
}
