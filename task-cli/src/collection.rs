use crate::error::{Result, StoreError};
use crate::task::{Status, Task, Timestamp};
use serde::{Deserialize, Serialize};

/// Ordered set of tasks, kept in creation order.
///
/// IDs are always `1..=len`: deleting a task renumbers everything behind it,
/// without moving any task from its position.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Appends a new `todo` task and returns its ID.
    pub fn add(&mut self, description: String, now: Timestamp) -> u32 {
        let id = self.next_id();
        self.tasks.push(Task::new(id, description, now));
        id
    }

    pub fn update(&mut self, id: u32, description: String, now: Timestamp) -> Result<()> {
        self.find_mut(id)?.set_description(description, now);
        Ok(())
    }

    pub fn set_status(&mut self, id: u32, status: Status, now: Timestamp) -> Result<()> {
        self.find_mut(id)?.set_status(status, now);
        Ok(())
    }

    /// Removes the task and renumbers the remaining ones. Returns the removed task.
    pub fn delete(&mut self, id: u32) -> Result<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.tasks.remove(position);
        self.renumber();
        Ok(removed)
    }

    /// Consumes the collection, yielding tasks in order, optionally only those with `status`.
    pub fn into_filtered(self, status: Option<Status>) -> impl Iterator<Item = Task> {
        self.tasks
            .into_iter()
            .filter(move |task| status.is_none_or(|status| task.status() == status))
    }

    fn next_id(&self) -> u32 {
        self.tasks.len() as u32 + 1
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn renumber(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.set_id(index as u32 + 1);
        }
    }
}
