//! taskdeck clear command implementation
//!
//! Clearing is destructive, so a non-empty collection requires `--yes`;
//! omitting it is a no-op, not an error.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::TaskStore;

pub struct ClearOptions {
    pub yes: bool,
    pub storage: Storage,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ClearReport {
    cleared: bool,
    removed: usize,
}

pub fn run(options: ClearOptions) -> Result<()> {
    let mut store = TaskStore::open(options.storage);
    let total = store.len();

    let (cleared, removed, human) = if total == 0 {
        (false, 0, HumanOutput::new("No tasks to clear"))
    } else if !options.yes {
        (
            false,
            0,
            HumanOutput::new(format!(
                "Not clearing {total} tasks; pass --yes to confirm"
            )),
        )
    } else {
        store.clear()?;
        (true, total, HumanOutput::new(format!("Cleared {total} tasks")))
    };

    let report = ClearReport { cleared, removed };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "clear",
        &report,
        Some(&human),
    )
}
