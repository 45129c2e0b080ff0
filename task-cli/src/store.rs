use crate::clock::{Clock, SystemClock};
use crate::collection::TaskCollection;
use crate::error::{Result, StoreError};
use crate::task::{Status, Task, Timestamp};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INDENT: &[u8] = b"    ";

/// JSON file holding every task, read in full and rewritten in full by each operation.
///
/// There is no locking: two processes mutating the same file concurrently race, and
/// the last one to save wins.
#[derive(Debug)]
pub struct TaskStore<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<TaskCollection> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file missing, starting empty");
                return Ok(TaskCollection::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        if contents.trim().is_empty() {
            return Ok(TaskCollection::new());
        }
        let tasks: TaskCollection =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Overwrites the file with `tasks`, creating parent directories if needed.
    pub fn save(&self, tasks: &TaskCollection) -> Result<()> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        tasks.serialize(&mut serializer)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        fs::write(&self.path, buffer).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn add(&self, description: String) -> Result<u32> {
        let id = self.mutate(|tasks, now| Ok(tasks.add(description, now)))?;
        info!(id, "task added");
        Ok(id)
    }

    /// Yields tasks in creation order, keeping only those with `status` when given.
    ///
    /// Returns `None` when the store holds no tasks at all. A filter matching nothing
    /// on a non-empty store yields an empty iterator instead.
    pub fn list(&self, status: Option<Status>) -> Result<Option<impl Iterator<Item = Task>>> {
        let tasks = self.load()?;
        if tasks.is_empty() {
            return Ok(None);
        }
        Ok(Some(tasks.into_filtered(status)))
    }

    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: u32, description: String) -> Result<()> {
        self.mutate(|tasks, now| tasks.update(id, description, now))?;
        info!(id, "task updated");
        Ok(())
    }

    /// Deletes the task and renumbers the rest so IDs stay `1..=len`.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: u32) -> Result<()> {
        let removed = self.mutate(|tasks, _| tasks.delete(id))?;
        info!(id, description = removed.description(), "task deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn set_status(&self, id: u32, status: Status) -> Result<()> {
        self.mutate(|tasks, now| tasks.set_status(id, status, now))?;
        info!(id, %status, "task status changed");
        Ok(())
    }

    /// Load, apply `change`, and save only if it succeeded.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut TaskCollection, Timestamp) -> Result<T>,
    ) -> Result<T> {
        let mut tasks = self.load()?;
        let outcome = change(&mut tasks, self.clock.now())?;
        self.save(&tasks)?;
        Ok(outcome)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
