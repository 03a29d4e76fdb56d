//! Ready-set computation and pick ordering for the placement loop.
//!
//! The ranker answers one question per iteration: which pending task goes
//! next. Tasks become ready once every dependency is completed or absent
//! from the pending pool (dangling references count as satisfied). Ready
//! tasks split into two queues, to-do list entries and project tasks, and
//! the ranker alternates between them so both streams keep moving; a ready
//! to-do with a deadline overrides the alternation.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::task::{Task, TaskId};

/// Iterative task picker with todo/project alternation state.
pub struct TaskRanker {
    todo_turn: bool,
}

impl TaskRanker {
    pub fn new() -> Self {
        Self { todo_turn: true }
    }

    /// Index of the next task to place, or `None` when no pending task is
    /// ready (an empty pool, or a dependency cycle/blockage).
    pub fn next(
        &mut self,
        pending: &[Task],
        completion_times: &HashMap<TaskId, DateTime<Utc>>,
    ) -> Option<usize> {
        let ready: Vec<usize> = (0..pending.len())
            .filter(|&i| is_ready(&pending[i], pending, completion_times))
            .collect();
        if ready.is_empty() {
            return None;
        }

        let (mut todo, mut project): (Vec<usize>, Vec<usize>) =
            ready.into_iter().partition(|&i| pending[i].is_todo_list);
        todo.sort_by(|&a, &b| compare_rank(&pending[a], &pending[b]));
        project.sort_by(|&a, &b| compare_rank(&pending[a], &pending[b]));

        // Urgent to-dos jump the queue without consuming a turn
        if let Some(&i) = todo.iter().find(|&&i| pending[i].deadline.is_some()) {
            return Some(i);
        }

        let pick = if self.todo_turn {
            todo.first().or(project.first())
        } else {
            project.first().or(todo.first())
        }
        .copied();
        if pick.is_some() {
            self.todo_turn = !self.todo_turn;
        }
        pick
    }
}

impl Default for TaskRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// A task is ready when each dependency is already completed or no longer
/// in the pending pool.
fn is_ready(
    task: &Task,
    pending: &[Task],
    completion_times: &HashMap<TaskId, DateTime<Utc>>,
) -> bool {
    task.dependencies.iter().all(|dep| {
        completion_times.contains_key(dep) || !pending.iter().any(|other| &other.id == dep)
    })
}

/// Queue order: score descending, deadline ascending when both carry one,
/// then duration descending.
fn compare_rank(a: &Task, b: &Task) -> Ordering {
    score(b)
        .cmp(&score(a))
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(da), Some(db)) => da.cmp(&db),
            _ => Ordering::Equal,
        })
        .then_with(|| b.duration_minutes.cmp(&a.duration_minutes))
}

/// Priority-weighted score with bonuses for hard constraints.
fn score(task: &Task) -> i64 {
    let mut score = task.priority.weight() * 100;
    if task.deadline.is_some() {
        score += 50;
    }
    if task.latest_end.is_some() {
        score += 60;
    }
    score
}
