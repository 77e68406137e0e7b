//! taskdeck rm command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::TaskStore;

pub struct RmOptions {
    pub id: String,
    pub storage: Storage,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct RmReport {
    id: String,
    removed: bool,
}

pub fn run(options: RmOptions) -> Result<()> {
    let mut store = TaskStore::open(options.storage);
    let removed = store.remove(&options.id)?;

    let human = if removed {
        HumanOutput::new(format!("Removed {}", options.id))
    } else {
        HumanOutput::new(format!("No task with id {}", options.id))
    };

    let report = RmReport {
        id: options.id,
        removed,
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &report,
        Some(&human),
    )
}
