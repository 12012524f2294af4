//! Dummy data generation for testing and demonstration.
//!
//! This module provides a sample daily-work queue and a small backlog
//! hierarchy, used when no server is configured and by tests across the
//! workspace.
//!
//! # Examples
//!
//! ```
//! use sprintboard_protocol::dummy::{dummy_daily_work, dummy_products};
//!
//! let work = dummy_daily_work();
//! assert_eq!(work.len(), 6);
//! assert_eq!(dummy_products().len(), 3);
//! ```

use crate::backlog::{BacklogId, BacklogSummary};
use crate::daily_work::{DailyWork, UserId};
use crate::task::{Task, TaskClass, TaskState};

/// Owner of the demo queue.
pub const DUMMY_USER: UserId = 1;

/// Generates a daily-work queue with tasks in assorted states.
///
/// One task is `NEXT_ASSIGNED`, one is unestimated, and the efforts differ so
/// sorting by effort is visible.
#[must_use]
pub fn dummy_daily_work() -> DailyWork {
    let mut work = DailyWork::new(DUMMY_USER);
    let tasks = [
        Task::new(101, "Triage incoming bug reports")
            .with_state(TaskState::Started)
            .with_estimate(60),
        Task::new(102, "Write migration for iteration dates")
            .with_description("Backfill missing end dates before the schema change lands.")
            .with_estimate(240),
        Task::new(103, "Review burndown chart fix")
            .with_state(TaskState::Implemented)
            .with_estimate(45)
            .with_class(TaskClass::NextAssigned),
        Task::new(104, "Update release checklist").with_state(TaskState::Pending),
        Task::new(105, "Pair on story ranking API")
            .with_state(TaskState::Blocked)
            .with_estimate(120),
        Task::new(106, "Clean up stale feature flags").with_estimate(30),
    ];
    for task in tasks {
        work.push(task);
    }
    work
}

/// Returns the demo products.
#[must_use]
pub fn dummy_products() -> Vec<BacklogSummary> {
    vec![
        BacklogSummary::new(1, "Tracker Web"),
        BacklogSummary::new(2, "Tracker Mobile"),
        BacklogSummary::new(3, "Internal Tools"),
    ]
}

/// Returns the demo sub-backlogs, keyed by parent id.
///
/// Products 1 and 2 have projects; product 3 has none. Project 11 has
/// iterations, project 12 has none.
#[must_use]
pub fn dummy_sub_backlogs() -> Vec<(BacklogId, Vec<BacklogSummary>)> {
    vec![
        (
            1,
            vec![
                BacklogSummary::new(11, "Web 2.0 Redesign"),
                BacklogSummary::new(12, "Accessibility Audit"),
            ],
        ),
        (2, vec![BacklogSummary::new(21, "Offline Mode")]),
        (
            11,
            vec![
                BacklogSummary::new(111, "Sprint 14"),
                BacklogSummary::new(112, "Sprint 15"),
            ],
        ),
        (
            21,
            vec![BacklogSummary::new(211, "Offline Sprint 1")],
        ),
    ]
}
