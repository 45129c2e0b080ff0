use crate::clock::Clock;
use crate::error::StoreError;
use crate::store::TaskStore;
use crate::task::Status;
use clap::Subcommand;
use std::io::Write;

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// The task to add
        #[arg(value_name = "TASK")]
        description: String,
    },
    /// List all tasks
    List {
        /// Filter tasks by status
        status: Option<Status>,
    },
    /// Update an existing task
    Update {
        /// The ID of the task to update
        id: u32,
        /// The new description of the task
        description: String,
    },
    /// Delete an existing task
    Delete {
        /// The ID of the task to delete
        id: u32,
    },
    /// Mark a task as in progress
    MarkInProgress {
        /// The ID of the task to mark as in progress
        id: u32,
    },
    /// Mark a task as done
    MarkDone {
        /// The ID of the task to mark as done
        id: u32,
    },
    /// Move a task back to todo
    MarkTodo {
        /// The ID of the task to mark as todo
        id: u32,
    },
}

/// Runs one command against the store, writing user-facing messages to `out`.
///
/// A missing task is reported on `out` like any other outcome. Only storage failures
/// come back as errors.
pub fn run<C: Clock>(
    command: Commands,
    store: &TaskStore<C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Add { description } => {
            let id = store.add(description)?;
            writeln!(out, "Task added sucessfully (ID: {id})")?;
        }
        Commands::List { status } => match store.list(status)? {
            Some(tasks) => {
                for task in tasks {
                    writeln!(out, "{task}")?;
                }
            }
            None => writeln!(out, "No tasks found.")?,
        },
        Commands::Update { id, description } => report(
            out,
            store.update(id, description),
            format!("Task updated successfully (ID: {id})"),
        )?,
        Commands::Delete { id } => report(
            out,
            store.delete(id),
            format!("Task deleted successfully (ID: {id})"),
        )?,
        Commands::MarkInProgress { id } => mark(out, store, id, Status::InProgress)?,
        Commands::MarkDone { id } => mark(out, store, id, Status::Done)?,
        Commands::MarkTodo { id } => mark(out, store, id, Status::Todo)?,
    }
    Ok(())
}

fn mark<C: Clock>(
    out: &mut impl Write,
    store: &TaskStore<C>,
    id: u32,
    status: Status,
) -> anyhow::Result<()> {
    report(
        out,
        store.set_status(id, status),
        format!("Task status changed to {status} (ID: {id})"),
    )
}

fn report(
    out: &mut impl Write,
    result: Result<(), StoreError>,
    success: String,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => writeln!(out, "{success}")?,
        Err(err) if err.is_not_found() => writeln!(out, "{err}")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
