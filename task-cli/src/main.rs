use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use task_cli::TaskStore;
use task_cli::commands::{self, Commands};
use task_cli::config::Config;
use task_cli::logging;

/// Task Tracker CLI
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
struct Cli {
    /// Path of the JSON task file, overriding configuration
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut config = Config::load()?;
    if let Some(file) = args.file {
        config.file = file;
    }
    logging::init(config.level()?);

    let store = TaskStore::new(&config.file);
    commands::run(command, &store, &mut std::io::stdout().lock())
}
