//! Command-line interface for taskdeck
//!
//! This module defines the CLI structure using clap derive macros. Each
//! subcommand is defined in its own submodule; running with no subcommand
//! opens the interactive UI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::TaskStore;

mod add;
mod clear;
mod list;
mod rm;
mod status;

/// taskdeck - personal task list
///
/// Tracks short task records with deadlines and statuses, persisted as a
/// single JSON document. Run without a subcommand for the interactive UI.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "TASKDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the data file holding the task collection
    #[arg(long, global = true, env = "TASKDECK_DATA")]
    pub data_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive UI (the default)
    Ui,

    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,

        /// Initial status: pending, in-progress, completed
        #[arg(long, default_value = "pending")]
        status: String,
    },

    /// List tasks with the progress summary
    List {
        /// Status filter: all, pending, in-progress, completed
        #[arg(short, long)]
        filter: Option<String>,

        /// Sort key: deadline-asc, deadline-desc, created-desc, created-asc,
        /// title-asc, title-desc
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Change a task's status
    Status {
        /// Task id
        id: String,

        /// New status: pending, in-progress, completed
        status: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },

    /// Delete every task
    Clear {
        /// Confirm the deletion; without this flag nothing happens
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let storage = resolve_storage(self.data_file, &config)?;
        let json = self.json;
        let quiet = self.quiet;

        match self.command.unwrap_or(Commands::Ui) {
            Commands::Ui => {
                let store = TaskStore::open(storage);
                crate::ui::run(store, &config)
            }
            Commands::Add {
                title,
                description,
                deadline,
                status,
            } => add::run(add::AddOptions {
                title,
                description,
                deadline,
                status,
                storage,
                json,
                quiet,
            }),
            Commands::List { filter, sort } => list::run(list::ListOptions {
                filter,
                sort,
                storage,
                config,
                json,
                quiet,
            }),
            Commands::Status { id, status } => status::run(status::StatusOptions {
                id,
                status,
                storage,
                json,
                quiet,
            }),
            Commands::Rm { id } => rm::run(rm::RmOptions {
                id,
                storage,
                json,
                quiet,
            }),
            Commands::Clear { yes } => clear::run(clear::ClearOptions {
                yes,
                storage,
                json,
                quiet,
            }),
        }
    }
}

fn resolve_storage(flag: Option<PathBuf>, config: &Config) -> Result<Storage> {
    if let Some(path) = flag {
        return Ok(Storage::new(path));
    }
    if let Some(path) = config.data_file.as_ref() {
        return Ok(Storage::new(path.clone()));
    }
    Storage::default_location()
}

/// Parse an optional `YYYY-MM-DD` argument; empty text means no deadline.
fn parse_deadline(value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(text) = value else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::InvalidArgument(format!("invalid deadline (want YYYY-MM-DD): {text}")))
}

fn parse_status(value: &str) -> Result<crate::task::Status> {
    crate::task::Status::parse(value)
        .ok_or_else(|| Error::InvalidArgument(format!("unknown status: {value}")))
}
