//! Row controllers for task tables.
//!
//! Controllers never touch the task models. Every action they offer, and
//! every reaction to a model change, is a [`TaskCommand`] the application
//! carries out against the daily-work queue.
//!
//! # Overview
//!
//! - [`TaskController`]: the action menu and highlight of any task row
//! - [`DailyWorkTaskController`]: a task row in a daily-work table; adds
//!   removal from the list, ranking, and a one-shot listener that drops the
//!   task from the list once it is done

use sprintboard_protocol::{
    Container, DailyWorkViewType, Delivery, EventBus, ListenerId, ModelEvent, RankPosition, Task,
    TaskClass, TaskId,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use crate::table::{MenuAction, RowController, RowHighlight, TableView};

/// Per-task model event channels shared between the app and controllers.
pub type TaskBus = EventBus<TaskId, ModelEvent<Task>>;

/// Something the application should do with a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCommand {
    /// Show the task's details popup.
    OpenDetails(TaskId),
    /// Advance the task to its next state.
    Edit(TaskId),
    /// Delete the task.
    Delete(TaskId),
    /// Clear the task's original estimate.
    ResetOriginalEstimate(TaskId),
    /// Take the task off the daily-work list.
    RemoveFromDailyWork(TaskId),
    /// Re-rank the task within a daily-work queue.
    RankDailyUnder {
        /// The moved task.
        task: TaskId,
        /// Its new place.
        position: RankPosition,
        /// The queue the rank applies to.
        container: Container,
    },
    /// Rank the task under another container.
    RankUnder {
        /// The moved task.
        task: TaskId,
        /// Its new place.
        position: RankPosition,
        /// The target container.
        container: Container,
    },
}

impl TaskCommand {
    /// Returns the task the command applies to.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        match *self {
            Self::OpenDetails(task)
            | Self::Edit(task)
            | Self::Delete(task)
            | Self::ResetOriginalEstimate(task)
            | Self::RemoveFromDailyWork(task)
            | Self::RankDailyUnder { task, .. }
            | Self::RankUnder { task, .. } => task,
        }
    }
}

/// Action menu and highlight of a task row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskController;

impl RowController<Task, TaskCommand> for TaskController {
    fn actions(&self, model: &Task) -> Vec<MenuAction<TaskCommand>> {
        vec![
            MenuAction::new("Details", TaskCommand::OpenDetails(model.id)),
            MenuAction::new("Edit", TaskCommand::Edit(model.id)),
            MenuAction::new("Delete", TaskCommand::Delete(model.id)),
            MenuAction::new(
                "Reset original estimate",
                TaskCommand::ResetOriginalEstimate(model.id),
            ),
        ]
    }

    fn highlight(&self, model: &Task) -> RowHighlight {
        match model.task_class {
            TaskClass::NextAssigned => RowHighlight::NextAssigned,
            TaskClass::Normal => RowHighlight::Plain,
        }
    }
}

/// Controller of a task row in a daily-work table.
///
/// On creation it subscribes to the task's channel on the [`TaskBus`]. The
/// first [`ModelEvent::Edit`] that carries a done task sends
/// [`TaskCommand::RemoveFromDailyWork`] and detaches the listener; later
/// events are ignored. Dropping the controller unsubscribes.
#[derive(Debug)]
pub struct DailyWorkTaskController {
    base: TaskController,
    task: TaskId,
    view_type: DailyWorkViewType,
    container: Container,
    bus: TaskBus,
    listener: ListenerId,
}

impl DailyWorkTaskController {
    /// Creates the controller of `task` and starts listening for its
    /// completion.
    #[must_use]
    pub fn new(
        task: &Task,
        view_type: DailyWorkViewType,
        container: Container,
        bus: TaskBus,
        commands: UnboundedSender<TaskCommand>,
    ) -> Self {
        let task_id = task.id;
        let listener = bus.subscribe(task_id, move |event: &ModelEvent<Task>| match event {
            ModelEvent::Edit(task) if task.state.is_done() => {
                debug!(task = task_id, "task done, leaving daily work");
                if commands.send(TaskCommand::RemoveFromDailyWork(task_id)).is_err() {
                    trace!(task = task_id, "command receiver gone");
                }
                Delivery::Detach
            }
            _ => Delivery::Keep,
        });

        Self {
            base: TaskController,
            task: task_id,
            view_type,
            container,
            bus,
            listener,
        }
    }

    /// Returns the task id.
    #[must_use]
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// Returns `true` while the completion listener is registered.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.bus.contains(&self.task, self.listener)
    }

    /// Ranks the task after the data row now above `new_pos`, or first when
    /// no data row precedes it.
    ///
    /// Returns `None` for the `MyWork` view, which cannot be ordered by hand.
    #[must_use]
    pub fn add_and_rank<P, C>(
        &self,
        table: &TableView<P, Task, C>,
        new_pos: usize,
    ) -> Option<TaskCommand> {
        if !self.view_type.is_rankable() {
            return None;
        }
        Some(self.sort_and_move(table, new_pos))
    }

    /// Like [`add_and_rank`](Self::add_and_rank), without checking the view
    /// type.
    #[must_use]
    pub fn sort_and_move<P, C>(
        &self,
        table: &TableView<P, Task, C>,
        new_pos: usize,
    ) -> TaskCommand {
        let previous = new_pos
            .checked_sub(1)
            .and_then(|index| table.data_row_at(index));
        let position = previous.map_or(RankPosition::First, |row| {
            RankPosition::After(row.model().id)
        });
        self.rank_daily(position)
    }

    /// Ranks the task first under another container.
    #[must_use]
    pub fn move_task(&self, target: Container) -> TaskCommand {
        TaskCommand::RankUnder {
            task: self.task,
            position: RankPosition::First,
            container: target,
        }
    }

    fn rank_daily(&self, position: RankPosition) -> TaskCommand {
        TaskCommand::RankDailyUnder {
            task: self.task,
            position,
            container: self.container,
        }
    }
}

impl RowController<Task, TaskCommand> for DailyWorkTaskController {
    fn actions(&self, model: &Task) -> Vec<MenuAction<TaskCommand>> {
        let mut actions = self.base.actions(model);
        actions.insert(
            1,
            MenuAction::new("Remove from this list", TaskCommand::RemoveFromDailyWork(model.id)),
        );
        actions
    }

    fn highlight(&self, model: &Task) -> RowHighlight {
        self.base.highlight(model)
    }

    fn reordered(&self, previous: Option<&Task>) -> Option<TaskCommand> {
        if !self.view_type.is_rankable() {
            return None;
        }
        let position = previous.map_or(RankPosition::First, |task| RankPosition::After(task.id));
        Some(self.rank_daily(position))
    }
}

impl Drop for DailyWorkTaskController {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.task, self.listener);
    }
}

#[cfg(test)]
mod tests {
    use sprintboard_protocol::{DailyWork, TaskState};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;
    use crate::table::{ColumnConfig, TableConfig};

    const QUEUE: Container = Container::WorkQueue(1);

    fn controller(
        task: &Task,
        view_type: DailyWorkViewType,
    ) -> (DailyWorkTaskController, TaskBus, UnboundedReceiver<TaskCommand>) {
        let bus = TaskBus::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = DailyWorkTaskController::new(task, view_type, QUEUE, bus.clone(), tx);
        (controller, bus, rx)
    }

    fn daily_table(
        ids: &[TaskId],
        bus: &TaskBus,
        tx: &UnboundedSender<TaskCommand>,
    ) -> TableView<DailyWork, Task, TaskCommand> {
        let (bus, tx) = (bus.clone(), tx.clone());
        let config = TableConfig::new(move |task: &Task| {
            Box::new(DailyWorkTaskController::new(
                task,
                DailyWorkViewType::WorkQueue,
                QUEUE,
                bus.clone(),
                tx.clone(),
            )) as Box<dyn RowController<Task, TaskCommand>>
        })
        .with_column(
            ColumnConfig::new("Rank")
                .with_comparator(|a: &Task, b: &Task| a.rank.cmp(&b.rank))
                .default_sort(),
        )
        .with_data_source(|work: &DailyWork| work.tasks().to_vec());

        let mut work = DailyWork::new(1);
        for &id in ids {
            work.push(Task::new(id, format!("Task {id}")));
        }
        let mut table = TableView::new(config, work);
        table.render();
        table
    }

    #[test]
    fn base_actions_in_order() {
        let labels: Vec<_> = TaskController
            .actions(&Task::new(1, "Task"))
            .into_iter()
            .map(|action| action.label)
            .collect();
        assert_eq!(labels, ["Details", "Edit", "Delete", "Reset original estimate"]);
    }

    #[test]
    fn daily_work_adds_remove_action() {
        let task = Task::new(4, "Task");
        let (controller, _bus, _rx) = controller(&task, DailyWorkViewType::WorkQueue);
        let actions = controller.actions(&task);
        let labels: Vec<_> = actions.iter().map(|action| action.label).collect();
        assert_eq!(
            labels,
            ["Details", "Remove from this list", "Edit", "Delete", "Reset original estimate"]
        );
        assert_eq!(actions[1].command, TaskCommand::RemoveFromDailyWork(4));
    }

    #[test]
    fn next_assigned_tasks_are_highlighted() {
        let task = Task::new(1, "Task").with_class(TaskClass::NextAssigned);
        let (controller, _bus, _rx) = controller(&task, DailyWorkViewType::WorkQueue);
        assert_eq!(controller.highlight(&task), RowHighlight::NextAssigned);
        assert_eq!(TaskController.highlight(&Task::new(2, "Task")), RowHighlight::Plain);
    }

    #[test]
    fn done_edit_removes_once_and_detaches() {
        let task = Task::new(7, "Task");
        let (controller, bus, mut rx) = controller(&task, DailyWorkViewType::WorkQueue);
        assert!(controller.is_listening());

        let started = task.clone().with_state(TaskState::Started);
        assert_eq!(bus.publish(&7, &ModelEvent::Edit(started)), 1);
        assert!(rx.try_recv().is_err());

        let done = task.clone().with_state(TaskState::Done);
        bus.publish(&7, &ModelEvent::Edit(done.clone()));
        assert_eq!(rx.try_recv().ok(), Some(TaskCommand::RemoveFromDailyWork(7)));
        assert!(!controller.is_listening());

        assert_eq!(bus.publish(&7, &ModelEvent::Edit(done)), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn delete_event_keeps_listening() {
        let task = Task::new(3, "Task");
        let (controller, bus, mut rx) = controller(&task, DailyWorkViewType::WorkQueue);
        bus.publish(&3, &ModelEvent::Delete);
        assert!(controller.is_listening());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn drop_unsubscribes() {
        let task = Task::new(5, "Task");
        let (controller, bus, _rx) = controller(&task, DailyWorkViewType::WorkQueue);
        assert_eq!(bus.listener_count(&5), 1);
        drop(controller);
        assert_eq!(bus.listener_count(&5), 0);
    }

    #[test]
    fn add_and_rank_uses_previous_data_row() {
        let bus = TaskBus::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let table = daily_table(&[1, 2, 3], &bus, &tx);
        let task = Task::new(3, "Task 3");
        let controller =
            DailyWorkTaskController::new(&task, DailyWorkViewType::WorkQueue, QUEUE, bus, tx);

        assert_eq!(
            controller.add_and_rank(&table, 2),
            Some(TaskCommand::RankDailyUnder {
                task: 3,
                position: RankPosition::After(2),
                container: QUEUE,
            })
        );
        assert_eq!(
            controller.add_and_rank(&table, 0),
            Some(TaskCommand::RankDailyUnder {
                task: 3,
                position: RankPosition::First,
                container: QUEUE,
            })
        );
        assert_eq!(
            controller.add_and_rank(&table, 9),
            Some(TaskCommand::RankDailyUnder {
                task: 3,
                position: RankPosition::First,
                container: QUEUE,
            })
        );
    }

    #[test]
    fn my_work_is_not_ranked() {
        let bus = TaskBus::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let table = daily_table(&[1, 2], &bus, &tx);
        let task = Task::new(2, "Task 2");
        let controller =
            DailyWorkTaskController::new(&task, DailyWorkViewType::MyWork, QUEUE, bus, tx);

        assert_eq!(controller.add_and_rank(&table, 1), None);
        assert_eq!(controller.reordered(Some(&Task::new(1, "Task 1"))), None);
        assert!(matches!(
            controller.sort_and_move(&table, 1),
            TaskCommand::RankDailyUnder {
                position: RankPosition::After(1),
                ..
            }
        ));
    }

    #[test]
    fn moving_a_row_yields_rank_command() {
        let bus = TaskBus::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut table = daily_table(&[1, 2, 3], &bus, &tx);

        assert_eq!(
            table.move_row(0, 1),
            Some(TaskCommand::RankDailyUnder {
                task: 1,
                position: RankPosition::After(2),
                container: QUEUE,
            })
        );
    }

    #[test]
    fn move_task_ranks_first_in_target() {
        let task = Task::new(8, "Task");
        let (controller, _bus, _rx) = controller(&task, DailyWorkViewType::WorkQueue);
        let command = controller.move_task(Container::Backlog(42));
        assert_eq!(
            command,
            TaskCommand::RankUnder {
                task: 8,
                position: RankPosition::First,
                container: Container::Backlog(42),
            }
        );
        assert_eq!(command.task(), 8);
    }
}
