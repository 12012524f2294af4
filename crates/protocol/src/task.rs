//! Task-related types for the daily-work board.
//!
//! This module defines the core task types used throughout the sprintboard
//! application, including task identifiers, states, and the task structure
//! itself.

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityHash, RowModel};

/// Server-side identifier of a task.
pub type TaskId = u64;

/// The workflow state of a task.
///
/// Serialized in the server's `SCREAMING_SNAKE_CASE` form (`"DONE"`,
/// `"NOT_STARTED"`, ...).
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::TaskState;
///
/// let state: TaskState = serde_json::from_str(r#""DONE""#).unwrap();
/// assert!(state.is_done());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Nobody has started working on the task.
    #[default]
    NotStarted,
    /// Work is in progress.
    Started,
    /// Waiting on something outside the team.
    Pending,
    /// Cannot proceed.
    Blocked,
    /// Implemented, awaiting verification.
    Implemented,
    /// Finished.
    Done,
}

impl TaskState {
    /// Every state in workflow order.
    pub const ALL: [Self; 6] = [
        Self::NotStarted,
        Self::Started,
        Self::Pending,
        Self::Blocked,
        Self::Implemented,
        Self::Done,
    ];

    /// Returns `true` for the terminal `Done` state.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns the next state in workflow order, wrapping from `Done` back to
    /// `NotStarted`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_protocol::TaskState;
    ///
    /// assert_eq!(TaskState::Implemented.next(), TaskState::Done);
    /// assert_eq!(TaskState::Done.next(), TaskState::NotStarted);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::Started,
            Self::Started => Self::Pending,
            Self::Pending => Self::Blocked,
            Self::Blocked => Self::Implemented,
            Self::Implemented => Self::Done,
            Self::Done => Self::NotStarted,
        }
    }

    /// Returns the label shown in table cells.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Started => "In progress",
            Self::Pending => "Pending",
            Self::Blocked => "Blocked",
            Self::Implemented => "Implemented",
            Self::Done => "Done",
        }
    }
}

/// How a task entered the daily-work queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskClass {
    /// Picked into the queue by its owner.
    #[default]
    Normal,
    /// Assigned to the owner and queued next automatically.
    NextAssigned,
}

/// A task in a daily-work queue.
///
/// Efforts are expressed in minutes.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::{Task, TaskState};
///
/// let task = Task::new(1, "Review pull request");
/// assert_eq!(task.state, TaskState::NotStarted);
/// assert_eq!(task.effort_left, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-side identifier.
    pub id: TaskId,
    /// Short summary of the task.
    pub name: String,
    /// Longer free-form description.
    #[serde(default)]
    pub description: String,
    /// Workflow state.
    #[serde(default)]
    pub state: TaskState,
    /// Remaining effort in minutes, if estimated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_left: Option<u32>,
    /// Original estimate in minutes, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_estimate: Option<u32>,
    /// How the task entered the queue.
    #[serde(default)]
    pub task_class: TaskClass,
    /// Position in the owner's daily-work queue (0 = first).
    #[serde(default)]
    pub rank: u32,
}

impl Task {
    /// Creates a not-started, unestimated task.
    #[must_use]
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            state: TaskState::NotStarted,
            effort_left: None,
            original_estimate: None,
            task_class: TaskClass::Normal,
            rank: 0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the state.
    #[must_use]
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Sets both the original estimate and the remaining effort.
    #[must_use]
    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.original_estimate = Some(minutes);
        self.effort_left = Some(minutes);
        self
    }

    /// Sets the task class.
    #[must_use]
    pub fn with_class(mut self, task_class: TaskClass) -> Self {
        self.task_class = task_class;
        self
    }

    /// Updates the workflow state.
    ///
    /// Marking a task done clears its remaining effort.
    pub fn set_state(&mut self, state: TaskState) {
        self.state = state;
        if state.is_done() {
            self.effort_left = Some(0);
        }
    }

    /// Clears the original estimate so the next effort entry sets it anew.
    pub fn reset_original_estimate(&mut self) {
        self.original_estimate = None;
    }
}

impl RowModel for Task {
    fn identity_hash(&self) -> IdentityHash {
        IdentityHash::of("task", self.id)
    }
}

/// Formats an effort in minutes as `"1h 30min"`, or `"–"` when unset.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::format_effort;
///
/// assert_eq!(format_effort(Some(90)), "1h 30min");
/// assert_eq!(format_effort(Some(120)), "2h");
/// assert_eq!(format_effort(Some(45)), "45min");
/// assert_eq!(format_effort(None), "–");
/// ```
#[must_use]
pub fn format_effort(minutes: Option<u32>) -> String {
    match minutes {
        None => "–".to_string(),
        Some(0) => "0h".to_string(),
        Some(total) => {
            let (hours, mins) = (total / 60, total % 60);
            match (hours, mins) {
                (0, m) => format!("{m}min"),
                (h, 0) => format!("{h}h"),
                (h, m) => format!("{h}h {m}min"),
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for TaskState {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            proptest::sample::select(TaskState::ALL.to_vec()).boxed()
        }
    }

    proptest! {
        /// Tests that TaskState serialization roundtrips in the server format.
        #[test]
        fn task_state_roundtrip(state in any::<TaskState>()) {
            let json = serde_json::to_string(&state).expect("serialize");
            let parsed: TaskState = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(state, parsed);
        }

        /// Tests that formatted efforts never lose the hour component.
        #[test]
        fn format_effort_mentions_hours(minutes in 60u32..10_000) {
            let formatted = format_effort(Some(minutes));
            let expected = format!("{}h", minutes / 60);
            prop_assert!(formatted.starts_with(&expected));
        }
    }
}
