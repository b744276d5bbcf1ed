//! Board view state: per-status buckets derived from the authoritative list.
//!
//! Buckets are ephemeral and never mutated in place: every change to the
//! authoritative task list rebuilds the partition wholesale, which is what
//! makes eviction on delete atomic: a task id that left the list cannot
//! survive in any column.

use crate::models::{Task, TaskId};
use crate::state_machine::states::TaskStatus;

/// One board column: a status and the ids of the tasks in it, in
/// authoritative-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub task_ids: Vec<TaskId>,
}

/// Partition of the current task set into status buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    columns: Vec<BoardColumn>,
}

impl BoardView {
    /// Rebuild the partition from the authoritative list.
    pub fn partition(tasks: &[Task]) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::COLUMN_ORDER
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                task_ids: Vec::new(),
            })
            .collect();
        for task in tasks {
            columns[task.status.column_index()].task_ids.push(task.id);
        }
        Self { columns }
    }

    /// The columns in board order.
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Ids in the given status column, in list order.
    pub fn column(&self, status: TaskStatus) -> &[TaskId] {
        &self.columns[status.column_index()].task_ids
    }

    /// Locate a task: which column it sits in and at which position.
    pub fn position_of(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .task_ids
                .iter()
                .position(|candidate| *candidate == id)
                .map(|index| (column.status, index))
        })
    }

    /// Whether any column references the id.
    pub fn contains(&self, id: TaskId) -> bool {
        self.position_of(id).is_some()
    }

    /// Total number of task references across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.task_ids.len()).sum()
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::partition(&[])
    }
}
