//! The ranked daily-work queue of one user.
//!
//! A daily-work queue is an ordered list of tasks a user intends to work on.
//! Its order is the task rank; ranking a task "under" another moves it to the
//! position right after that task.

use serde::{Deserialize, Serialize};

use crate::backlog::BacklogId;
use crate::error::{ProtocolError, Result};
use crate::task::{Task, TaskId, TaskState};

/// Server-side identifier of a user.
pub type UserId = u64;

/// Which daily-work section a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DailyWorkViewType {
    /// The manually ordered work queue.
    #[default]
    WorkQueue,
    /// Everything assigned to the user; not manually orderable.
    MyWork,
}

impl DailyWorkViewType {
    /// Returns `true` if rows of this view can be re-ranked by hand.
    #[must_use]
    pub const fn is_rankable(self) -> bool {
        matches!(self, Self::WorkQueue)
    }
}

/// Where a re-ranked task lands relative to its siblings.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::RankPosition;
///
/// assert_eq!(RankPosition::First.predecessor_id(), -1);
/// assert_eq!(RankPosition::After(12).predecessor_id(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPosition {
    /// Before every other task.
    First,
    /// Immediately after the given task.
    After(TaskId),
}

impl RankPosition {
    /// Returns the predecessor id sent to the server, `-1` meaning "first".
    #[must_use]
    pub fn predecessor_id(self) -> i64 {
        match self {
            Self::First => -1,
            Self::After(id) => i64::try_from(id).unwrap_or(i64::MAX),
        }
    }
}

/// A parent that tasks can be ranked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// The daily-work queue of a user.
    WorkQueue(UserId),
    /// A story, iteration, or other backlog.
    Backlog(BacklogId),
}

/// The daily-work queue of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWork {
    /// Owner of the queue.
    pub user: UserId,
    /// Section shown for this queue.
    #[serde(default)]
    pub view_type: DailyWorkViewType,
    tasks: Vec<Task>,
}

impl DailyWork {
    /// Creates an empty work-queue view for a user.
    #[must_use]
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            view_type: DailyWorkViewType::WorkQueue,
            tasks: Vec::new(),
        }
    }

    /// Sets the view type.
    #[must_use]
    pub fn with_view_type(mut self, view_type: DailyWorkViewType) -> Self {
        self.view_type = view_type;
        self
    }

    /// Returns the container this queue represents.
    #[must_use]
    pub const fn container(&self) -> Container {
        Container::WorkQueue(self.user)
    }

    /// Returns the tasks in rank order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task at the end of the queue.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
        self.renumber();
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns a mutable reference to the task with the given id.
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Removes a task from the queue, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if the task is not queued.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let idx = self.position(id)?;
        let task = self.tasks.remove(idx);
        self.renumber();
        Ok(task)
    }

    /// Moves a task to the given position and renumbers ranks.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if either the task or the
    /// predecessor is not queued, and [`ProtocolError::SelfRank`] when a task
    /// is ranked under itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_protocol::{DailyWork, RankPosition, Task};
    ///
    /// let mut work = DailyWork::new(1);
    /// for id in 1..=3 {
    ///     work.push(Task::new(id, format!("Task {id}")));
    /// }
    ///
    /// work.rank_under(1, RankPosition::After(3)).unwrap();
    /// let order: Vec<_> = work.tasks().iter().map(|t| t.id).collect();
    /// assert_eq!(order, vec![2, 3, 1]);
    /// ```
    pub fn rank_under(&mut self, id: TaskId, position: RankPosition) -> Result<()> {
        if position == RankPosition::After(id) {
            return Err(ProtocolError::SelfRank(id));
        }
        if let RankPosition::After(predecessor) = position {
            self.position(predecessor)?;
        }

        let task = self.tasks.remove(self.position(id)?);
        let insert_at = match position {
            RankPosition::First => 0,
            RankPosition::After(predecessor) => self.position(predecessor)? + 1,
        };
        self.tasks.insert(insert_at, task);
        self.renumber();
        Ok(())
    }

    /// Sets the state of a task and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if the task is not queued.
    pub fn set_state(&mut self, id: TaskId, state: TaskState) -> Result<&Task> {
        let task = self.get_mut(id).ok_or(ProtocolError::TaskNotFound(id))?;
        task.set_state(state);
        Ok(task)
    }

    /// Clears the original estimate of a task and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if the task is not queued.
    pub fn reset_original_estimate(&mut self, id: TaskId) -> Result<&Task> {
        let task = self.get_mut(id).ok_or(ProtocolError::TaskNotFound(id))?;
        task.reset_original_estimate();
        Ok(task)
    }

    /// Returns the sum of the remaining effort of every queued task.
    #[must_use]
    pub fn total_effort_left(&self) -> u32 {
        self.tasks.iter().filter_map(|task| task.effort_left).sum()
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ProtocolError::TaskNotFound(id))
    }

    fn renumber(&mut self) {
        for (rank, task) in self.tasks.iter_mut().enumerate() {
            task.rank = u32::try_from(rank).unwrap_or(u32::MAX);
        }
    }
}
