//! taskdeck status command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::TaskStore;

pub struct StatusOptions {
    pub id: String,
    pub status: String,
    pub storage: Storage,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct StatusReport {
    id: String,
    status: String,
    changed: bool,
}

pub fn run(options: StatusOptions) -> Result<()> {
    let status = super::parse_status(&options.status)?;

    let mut store = TaskStore::open(options.storage);
    let changed = store.set_status(&options.id, status)?;

    let human = if changed {
        HumanOutput::new(format!("{} -> {status}", options.id))
    } else {
        HumanOutput::new(format!("No task with id {}", options.id))
    };

    let report = StatusReport {
        id: options.id,
        status: status.to_string(),
        changed,
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "status",
        &report,
        Some(&human),
    )
}
