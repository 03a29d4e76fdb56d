//! Free-window enumeration over the planning horizon.
//!
//! Walks each active day, seeds it with the configured work interval,
//! subtracts fixed events, and re-snaps the surviving windows to the
//! 15-minute grid. An empty result is not an error; it means nothing can
//! be placed within the horizon.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::HashMap;

use crate::grid::{ceil_15, floor_15, minutes_between, start_of_day, GRID_MINUTES};
use crate::settings::PlannerSettings;
use crate::task::{Slot, Task};

/// Planning horizon in days.
pub const HORIZON_DAYS: i64 = 180;

/// Enumerates free windows by subtracting fixed events from work hours.
pub struct AvailabilityEngine {
    horizon_days: i64,
}

impl AvailabilityEngine {
    /// Create an engine covering the default 180-day horizon.
    pub fn new() -> Self {
        Self {
            horizon_days: HORIZON_DAYS,
        }
    }

    /// Override the horizon (shorter horizons keep tests fast).
    pub fn with_horizon(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// Ordered free windows from `now` to the end of the horizon, each
    /// aligned to the grid and at least one grid step long.
    pub fn free_windows(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
        settings: &PlannerSettings,
    ) -> Vec<Slot> {
        let blockers = index_fixed_by_day(tasks);
        let today = start_of_day(now);
        let mut windows = Vec::new();

        for offset in 0..self.horizon_days {
            let day = today + Duration::days(offset);
            let weekday = day.weekday().num_days_from_sunday() as u8;
            if !settings.is_active_day(weekday) {
                continue;
            }

            let mut start = ceil_15(day + Duration::hours(settings.work_start_hour as i64));
            let end = floor_15(day + Duration::hours(settings.work_end_hour as i64));
            if offset == 0 {
                if now >= end {
                    continue;
                }
                if now > start {
                    start = ceil_15(now);
                }
            }
            if start >= end {
                continue;
            }

            let mut day_windows = vec![Slot::new(start, end)];
            if let Some(events) = blockers.get(&day.date_naive()) {
                for &(event_start, event_end) in events {
                    day_windows = subtract_event(&day_windows, event_start, event_end);
                }
            }

            for window in day_windows {
                let snapped_start = ceil_15(window.start);
                let snapped_end = floor_15(window.end);
                if minutes_between(snapped_start, snapped_end) >= GRID_MINUTES {
                    windows.push(Slot::new(snapped_start, snapped_end));
                }
            }
        }

        windows
    }
}

impl Default for AvailabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Index immovable, incomplete events with both endpoints by every
/// calendar day they touch.
fn index_fixed_by_day(tasks: &[Task]) -> HashMap<NaiveDate, Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    let mut by_day: HashMap<NaiveDate, Vec<(DateTime<Utc>, DateTime<Utc>)>> = HashMap::new();
    for task in tasks {
        if !task.is_fixed || task.status.is_done() {
            continue;
        }
        let Some((start, end)) = task.scheduled_interval() else {
            continue;
        };
        let mut day = start.date_naive();
        let last = end.date_naive();
        while day <= last {
            by_day.entry(day).or_default().push((start, end));
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
    }
    by_day
}

/// Subtract an event interval from each window it overlaps, leaving at
/// most two sub-windows per split.
fn subtract_event(
    windows: &[Slot],
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
) -> Vec<Slot> {
    let mut out = Vec::with_capacity(windows.len() + 1);
    for window in windows {
        if !window.overlaps(event_start, event_end) {
            out.push(*window);
            continue;
        }
        if event_start > window.start {
            out.push(Slot::new(window.start, event_start));
        }
        if event_end < window.end {
            out.push(Slot::new(event_end, window.end));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2026-03-02 is a Monday
    fn monday(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn engine() -> AvailabilityEngine {
        AvailabilityEngine::new().with_horizon(7)
    }

    #[test]
    fn seeds_work_interval_per_active_day() {
        let settings = PlannerSettings::default();
        let windows = engine().free_windows(&[], monday(9, 0), &settings);
        // Mon-Fri within one week
        assert_eq!(windows.len(), 5);
        assert_eq!(windows[0].start, monday(9, 0));
        assert_eq!(windows[0].end, monday(17, 0));
        // Windows stay in chronological order
        for pair in windows.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn clamps_today_to_now() {
        let settings = PlannerSettings::default();
        let windows = engine().free_windows(&[], monday(10, 7), &settings);
        assert_eq!(windows[0].start, monday(10, 15));
    }

    #[test]
    fn skips_today_after_work_hours() {
        let settings = PlannerSettings::default();
        let windows = engine().free_windows(&[], monday(18, 0), &settings);
        // First window is Tuesday
        assert_eq!(
            windows[0].start,
            Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn subtracts_fixed_events() {
        let settings = PlannerSettings::default();
        let lunch = Task::new("Lunch", 60).fixed_at(monday(12, 0), monday(13, 0));
        let windows = engine().free_windows(&[lunch], monday(9, 0), &settings);
        assert_eq!(windows[0], Slot::new(monday(9, 0), monday(12, 0)));
        assert_eq!(windows[1], Slot::new(monday(13, 0), monday(17, 0)));
    }

    #[test]
    fn resnaps_after_unaligned_event() {
        let settings = PlannerSettings::default();
        let call = Task::new("Call", 15).fixed_at(
            Utc.with_ymd_and_hms(2026, 3, 2, 11, 50, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 12, 10, 0).unwrap(),
        );
        let windows = engine().free_windows(&[call], monday(9, 0), &settings);
        // Left window floors to 11:45, right window ceils to 12:15
        assert_eq!(windows[0], Slot::new(monday(9, 0), monday(11, 45)));
        assert_eq!(windows[1], Slot::new(monday(12, 15), monday(17, 0)));
    }

    #[test]
    fn drops_slivers_under_one_grid_step() {
        let settings = PlannerSettings::default();
        let early = Task::new("Standup", 480).fixed_at(monday(9, 10), monday(17, 10));
        let windows = engine().free_windows(&[early], monday(9, 0), &settings);
        // Monday leaves only 9:00-9:10, under one grid step
        assert_eq!(
            windows[0].start,
            Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn done_and_movable_tasks_do_not_block() {
        let settings = PlannerSettings::default();
        let mut done = Task::new("Done", 60).fixed_at(monday(10, 0), monday(11, 0));
        done.status = crate::task::Status::Done;
        let mut movable = Task::new("Movable", 60);
        movable.scheduled_start = Some(monday(13, 0));
        movable.scheduled_end = Some(monday(14, 0));
        let windows = engine().free_windows(&[done, movable], monday(9, 0), &settings);
        assert_eq!(windows[0], Slot::new(monday(9, 0), monday(17, 0)));
    }

    #[test]
    fn empty_when_no_active_days() {
        let settings = PlannerSettings {
            active_days: vec![],
            ..Default::default()
        };
        assert!(engine().free_windows(&[], monday(9, 0), &settings).is_empty());
    }
}
