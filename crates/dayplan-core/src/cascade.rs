//! Manual-move propagation through the dependency graph.
//!
//! When the user drags a task to a new start, its successors must not
//! begin before it ends and its predecessors must end before it starts.
//! The mover walks both directions with an explicit stack and a visited
//! set, so cycles reach a fixed point instead of recursing forever.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::task::{Task, TaskId};

/// Reapply a manual move across the whole dependency neighborhood.
///
/// Every visited task is pinned at its new interval and marked fixed.
/// Moving a task to its current start is a no-op. Done tasks are never
/// touched. The input is not mutated; a new task set is returned.
pub fn cascade_move(tasks: &[Task], target_id: &str, new_start: DateTime<Utc>) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.to_vec();
    let Some(target) = out.iter().position(|t| t.id == target_id) else {
        return out;
    };
    if out[target].status.is_done() || out[target].scheduled_start == Some(new_start) {
        return out;
    }

    let mut visited: HashSet<TaskId> = HashSet::new();
    let mut stack: Vec<(TaskId, DateTime<Utc>)> = vec![(target_id.to_string(), new_start)];

    while let Some((id, start)) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(index) = out.iter().position(|t| t.id == id) else {
            continue;
        };
        if out[index].status.is_done() {
            continue;
        }

        let end = start + Duration::minutes(out[index].duration_minutes as i64);
        out[index].scheduled_start = Some(start);
        out[index].scheduled_end = Some(end);
        out[index].is_fixed = true;
        out[index].schedule_reason = Some("Manually moved by user".to_string());

        // Push successors that would now begin before this task ends
        for task in &out {
            if task.dependencies.iter().any(|dep| dep == &id) {
                if let Some(successor_start) = task.scheduled_start {
                    if successor_start < end {
                        stack.push((task.id.clone(), end));
                    }
                }
            }
        }

        // Pull predecessors that would now end after this task starts
        let dependencies = out[index].dependencies.clone();
        for dep_id in dependencies {
            if let Some(dep) = out.iter().find(|t| t.id == dep_id) {
                if let Some(dep_end) = dep.scheduled_end {
                    if dep_end > start {
                        let pulled = start - Duration::minutes(dep.duration_minutes as i64);
                        stack.push((dep.id.clone(), pulled));
                    }
                }
            }
        }
    }

    out
}
