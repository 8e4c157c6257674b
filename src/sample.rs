// Demo data for exercising paging and bulk actions

use crate::models::{Todo, TodoId};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Number of records seeded into an empty store
pub const SAMPLE_SIZE: usize = 30;

/// Oldest a sample record can be
const MAX_AGE_DAYS: i64 = 30;

const TASKS: &[&str] = &[
    "Review pull request",
    "Write unit tests",
    "Update documentation",
    "Fix login bug",
    "Plan sprint",
    "Reply to emails",
    "Refactor settings page",
    "Prepare demo",
    "Book team lunch",
    "Clean up backlog",
];

/// Build `count` sample records with consecutive ids starting at `first_id`.
///
/// Completion flags are a coin flip; creation times fall uniformly within the
/// last thirty days before `now`.
pub fn sample_todos<R: Rng>(rng: &mut R, first_id: TodoId, count: usize, now: DateTime<Utc>) -> Vec<Todo> {
    let max_age_ms = Duration::days(MAX_AGE_DAYS).num_milliseconds();

    (0..count)
        .map(|i| {
            let id = first_id + i as TodoId;
            let task = TASKS[i % TASKS.len()];
            let age = Duration::milliseconds(rng.gen_range(1..=max_age_ms));
            let mut todo = Todo::with_created_at(id, format!("{} #{}", task, i + 1), now - age);
            todo.completed = rng.gen_bool(0.5);
            todo
        })
        .collect()
}
