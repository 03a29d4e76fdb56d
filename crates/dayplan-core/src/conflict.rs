//! Overlap elimination among already-scheduled tasks.
//!
//! A single left-to-right sweep: whenever a task overlaps the one before
//! it, it is right-shifted to start where the previous one ends, keeping
//! its duration. Shifts propagate, so one pass reaches a fixed point.
//! Break tasks and Done tasks are left alone.

use crate::task::Task;

/// Right-shift overlapping scheduled tasks until no overlaps remain.
///
/// Shifted tasks are marked fixed with an explanatory reason. The input
/// is not mutated; a new task set is returned.
pub fn resolve_conflicts(tasks: &[Task]) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.to_vec();

    let mut order: Vec<usize> = out
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.status.is_done() && !t.is_break() && t.scheduled_interval().is_some())
        .map(|(i, _)| i)
        .collect();
    order.sort_by_key(|&i| out[i].scheduled_start);

    for pair in 1..order.len() {
        let previous = order[pair - 1];
        let current = order[pair];
        let (Some(previous_end), Some((start, end))) = (
            out[previous].scheduled_end,
            out[current].scheduled_interval(),
        ) else {
            continue;
        };
        if previous_end > start {
            let duration = end - start;
            out[current].scheduled_start = Some(previous_end);
            out[current].scheduled_end = Some(previous_end + duration);
            out[current].is_fixed = true;
            out[current].schedule_reason = Some("Auto-resolved conflict".to_string());
        }
    }

    out
}
