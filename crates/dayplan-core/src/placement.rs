//! Greedy slot fitting with splitting, the heart of the planner.
//!
//! `plan` is the full placement pass: validate the snapshot, rebuild the
//! slot grid, then repeatedly ask the ranker for the next task and fit it
//! into the earliest acceptable slots, splitting across windows when one
//! slot cannot hold it. The slot list is the single mutable structure of a
//! pass and is owned here exclusively; inputs are never mutated.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::availability::AvailabilityEngine;
use crate::error::{PlanError, ValidationError};
use crate::grid::{ceil_15, end_of_day, floor_15, minutes_between, GRID_MINUTES};
use crate::ranker::TaskRanker;
use crate::rhythm::RhythmEngine;
use crate::settings::PlannerSettings;
use crate::task::{EnergyLevel, Priority, Slot, Task, TaskId};

/// Output of a full placement pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Placed tasks ordered by start, then part index
    pub scheduled: Vec<Task>,
    /// Synthetic break tasks from the rhythm engine
    pub breaks: Vec<Task>,
    /// Tasks the pass could not place, with reasons
    pub unscheduled: Vec<Unscheduled>,
    /// Non-fatal observations about the produced plan
    pub warnings: Vec<String>,
}

/// A task that could not be placed, with a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unscheduled {
    pub task: Task,
    pub reason: String,
}

/// Run the full placement pass over a task snapshot.
///
/// Fixed events block availability and seed dependency completion times;
/// pending tasks are ranked and fitted greedily. Returns an error only for
/// structural invariant violations in the input; unplaceable tasks flow
/// into `Plan::unscheduled`.
pub fn plan(
    tasks: &[Task],
    now: DateTime<Utc>,
    settings: &PlannerSettings,
) -> Result<Plan, PlanError> {
    settings.validate()?;
    validate_tasks(tasks)?;
    let tasks = merge_split_parts(tasks);

    let mut completion_times: HashMap<TaskId, DateTime<Utc>> = HashMap::new();
    for task in &tasks {
        if task.is_fixed && !task.status.is_done() {
            if let Some((_, end)) = task.scheduled_interval() {
                completion_times.insert(task.id.clone(), end);
            }
        }
    }

    let mut pending: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_schedulable(now, settings.auto_reschedule_overdue))
        .cloned()
        .collect();

    let windows = AvailabilityEngine::new().free_windows(&tasks, now, settings);
    let rhythm = RhythmEngine::chunk(&windows, settings);
    let mut slots = rhythm.slots;
    let breaks = rhythm.breaks;

    let mut scheduled: Vec<Task> = Vec::new();
    let mut unscheduled: Vec<Unscheduled> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut ranker = TaskRanker::new();
    let mut high_todo_scheduled = false;

    while let Some(idx) = ranker.next(&pending, &completion_times) {
        let task = pending.remove(idx);
        match place_task(&task, now, settings, &mut slots, &completion_times) {
            Placement::Placed(parts) => {
                if let Some(end) = parts.last().and_then(|p| p.scheduled_end) {
                    completion_times.insert(task.id.clone(), end);
                }
                if task.is_todo_list && task.priority == Priority::High {
                    high_todo_scheduled = true;
                }
                scheduled.extend(parts);
            }
            Placement::Failed(reason) => unscheduled.push(Unscheduled { task, reason }),
        }
    }

    if !pending.is_empty() {
        warnings.push(format!(
            "{} task(s) blocked by unresolved or cyclic dependencies.",
            pending.len()
        ));
        for task in pending.drain(..) {
            unscheduled.push(Unscheduled {
                task,
                reason: "Blocked by unresolved or cyclic dependencies".to_string(),
            });
        }
    }

    if high_todo_scheduled {
        let pushed = count_projects_past_deadline(&scheduled);
        if pushed > 0 {
            warnings.push(format!(
                "High-priority to-dos pushed {pushed} project task(s) past deadlines."
            ));
        }
    }

    scheduled.sort_by(|a, b| {
        a.scheduled_start
            .cmp(&b.scheduled_start)
            .then(a.part_index.cmp(&b.part_index))
    });

    Ok(Plan {
        scheduled,
        breaks,
        unscheduled,
        warnings,
    })
}

enum Placement {
    Placed(Vec<Task>),
    Failed(String),
}

/// Fit one task into the slot list, splitting across slots as needed.
/// On failure the slot list is restored so later tasks see it untouched.
fn place_task(
    task: &Task,
    now: DateTime<Utc>,
    settings: &PlannerSettings,
    slots: &mut Vec<Slot>,
    completion_times: &HashMap<TaskId, DateTime<Utc>>,
) -> Placement {
    let mut floor = now;
    for dep in &task.dependencies {
        if let Some(end) = completion_times.get(dep) {
            floor = floor.max(*end);
        }
    }
    if let Some(earliest) = task.earliest_start {
        floor = floor.max(earliest);
    }
    let floor = ceil_15(floor);

    let ceiling = {
        let by_deadline = task.deadline.map(end_of_day);
        match (by_deadline, task.latest_end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
    .map(floor_15);

    let start_index = match task.energy {
        None => 0,
        Some(level) => best_energy_index(slots, floor, ceiling, level).unwrap_or(0),
    };

    let backup = slots.clone();
    let mut remaining = task.duration_minutes as i64;
    let mut parts: Vec<Task> = Vec::new();
    let mut i = start_index;

    while i < slots.len() && remaining > 0 {
        let slot = slots[i];
        if slot.duration_minutes() < GRID_MINUTES {
            i += 1;
            continue;
        }
        let usable_start = slot.start.max(floor);
        let usable_end = match ceiling {
            Some(c) => slot.end.min(c),
            None => slot.end,
        };
        if usable_start >= usable_end {
            i += 1;
            continue;
        }

        let fit = remaining.min(minutes_between(usable_start, usable_end));
        let part_end = usable_start + Duration::minutes(fit);
        parts.push(make_part(task, usable_start, part_end, fit, settings));

        if usable_start == slot.start {
            if part_end == slot.end {
                slots.remove(i);
            } else {
                slots[i].start = part_end;
                i += 1;
            }
        } else {
            slots[i].end = usable_start;
            if part_end < slot.end {
                slots.insert(i + 1, Slot::new(part_end, slot.end));
            }
            i += 1;
        }
        remaining -= fit;
    }

    if remaining > 0 {
        *slots = backup;
        let reason = match ceiling {
            Some(limit) => format!("No slot before deadline/window ({})", limit.to_rfc3339()),
            None => "Insufficient availability".to_string(),
        };
        return Placement::Failed(reason);
    }

    let total = parts.len() as u32;
    if total > 1 {
        for (k, part) in parts.iter_mut().enumerate() {
            let index = k as u32 + 1;
            part.id = format!("{}-part-{}", task.id, index);
            part.title = format!("{} ({})", task.title, index);
            part.original_task_id = Some(task.id.clone());
            part.part_index = Some(index);
            part.total_parts = Some(total);
        }
    }
    Placement::Placed(parts)
}

/// Clone the task into a placed part over `[start, end)`.
fn make_part(
    task: &Task,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    fit: i64,
    settings: &PlannerSettings,
) -> Task {
    let mut part = task.clone();
    part.duration_minutes = fit as u32;
    part.scheduled_start = Some(start);
    part.scheduled_end = Some(end);
    part.schedule_reason = Some(compose_reason(task, settings));
    part
}

fn compose_reason(task: &Task, settings: &PlannerSettings) -> String {
    let mut notes: Vec<String> = Vec::new();
    notes.push(if settings.enable_chunking {
        "Placed in focus chunks".to_string()
    } else {
        "Placed in open work hours".to_string()
    });
    notes.push(format!("{} priority", task.priority));
    if let Some(energy) = task.energy {
        notes.push(format!("{energy}-energy fit"));
    }
    if task.earliest_start.is_some() || task.latest_end.is_some() {
        notes.push("within requested window".to_string());
    }
    notes.join("; ")
}

/// Scan all slots and pick the one whose usable start best matches the
/// task's energy tag; ties go to the earliest usable start.
fn best_energy_index(
    slots: &[Slot],
    floor: DateTime<Utc>,
    ceiling: Option<DateTime<Utc>>,
    level: EnergyLevel,
) -> Option<usize> {
    let mut best: Option<(i64, DateTime<Utc>, usize)> = None;
    for (i, slot) in slots.iter().enumerate() {
        let usable_start = slot.start.max(floor);
        let usable_end = match ceiling {
            Some(c) => slot.end.min(c),
            None => slot.end,
        };
        if usable_start >= usable_end
            || minutes_between(usable_start, usable_end) < GRID_MINUTES
        {
            continue;
        }
        let score = energy_score(level, usable_start.hour());
        let better = match best {
            None => true,
            Some((best_score, best_start, _)) => {
                score > best_score || (score == best_score && usable_start < best_start)
            }
        };
        if better {
            best = Some((score, usable_start, i));
        }
    }
    best.map(|(_, _, i)| i)
}

/// How well an hour of day matches an energy tag (higher is better).
fn energy_score(level: EnergyLevel, hour: u32) -> i64 {
    match level {
        EnergyLevel::High => {
            if hour < 11 {
                3
            } else if hour < 15 {
                2
            } else {
                1
            }
        }
        EnergyLevel::Medium => {
            if (10..=16).contains(&hour) {
                3
            } else if (8..=18).contains(&hour) {
                2
            } else {
                1
            }
        }
        EnergyLevel::Low => {
            if hour >= 15 {
                3
            } else if hour >= 12 {
                2
            } else {
                1
            }
        }
    }
}

/// Reject structurally invalid input before touching the slot grid.
fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    for task in tasks {
        let minutes = task.duration_minutes as i64;
        if minutes < GRID_MINUTES || minutes % GRID_MINUTES != 0 {
            return Err(ValidationError::InvalidDuration {
                id: task.id.clone(),
                minutes,
            });
        }
        if let Some((start, end)) = task.scheduled_interval() {
            if start >= end {
                return Err(ValidationError::InvalidTimeRange {
                    id: task.id.clone(),
                    start,
                    end,
                });
            }
        }
        if let (Some(earliest), Some(latest)) = (task.earliest_start, task.latest_end) {
            if earliest > latest {
                return Err(ValidationError::InvalidWindow {
                    id: task.id.clone(),
                    earliest,
                    latest,
                });
            }
        }
    }
    Ok(())
}

/// Collapse split parts back into their original tasks so a re-plan works
/// on whole durations. Part durations are summed as-is, even when the
/// user resized individual parts.
fn merge_split_parts(tasks: &[Task]) -> Vec<Task> {
    let mut merged: Vec<Task> = Vec::new();
    let mut groups: BTreeMap<TaskId, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        match &task.original_task_id {
            Some(original) if !task.is_break() => {
                groups.entry(original.clone()).or_default().push(task);
            }
            _ => merged.push(task.clone()),
        }
    }
    for (original_id, mut parts) in groups {
        parts.sort_by_key(|p| p.part_index.unwrap_or(0));
        let mut base = parts[0].clone();
        base.id = original_id;
        base.duration_minutes = parts.iter().map(|p| p.duration_minutes).sum();
        base.title = strip_part_suffix(&base.title);
        base.original_task_id = None;
        base.part_index = None;
        base.total_parts = None;
        base.scheduled_start = None;
        base.scheduled_end = None;
        base.schedule_reason = None;
        merged.push(base);
    }
    merged
}

/// Remove a trailing " (k)" part marker from a title.
fn strip_part_suffix(title: &str) -> String {
    if let Some(open) = title.rfind(" (") {
        let inner = &title[open + 2..];
        if let Some(digits) = inner.strip_suffix(')') {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return title[..open].to_string();
            }
        }
    }
    title.to_string()
}

/// Count project tasks whose final placed end slipped past their deadline.
fn count_projects_past_deadline(scheduled: &[Task]) -> usize {
    let mut latest: BTreeMap<&str, (DateTime<Utc>, chrono::NaiveDate)> = BTreeMap::new();
    for task in scheduled {
        if task.is_todo_list {
            continue;
        }
        let (Some(end), Some(deadline)) = (task.scheduled_end, task.deadline) else {
            continue;
        };
        let key: &str = task.original_task_id.as_deref().unwrap_or(&task.id);
        let entry = latest.entry(key).or_insert((end, deadline));
        if end > entry.0 {
            entry.0 = end;
        }
    }
    latest
        .values()
        .filter(|(end, deadline)| *end > end_of_day(*deadline))
        .count()
}
