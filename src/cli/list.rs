//! taskdeck list command implementation

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{self, FilterKey, Progress, SortKey};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::{Task, TaskStore};
use crate::ui::format_deadline;

pub struct ListOptions {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub storage: Storage,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ListReport {
    tasks: Vec<Task>,
    progress: Progress,
}

pub fn run(options: ListOptions) -> Result<()> {
    let filter = match options.filter.as_deref() {
        Some(value) => FilterKey::parse(value)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown filter: {value}")))?,
        None => options.config.default_filter(),
    };
    let sort = match options.sort.as_deref() {
        Some(value) => SortKey::parse(value)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown sort key: {value}")))?,
        None => options.config.default_sort(),
    };

    let store = TaskStore::open(options.storage);
    let view = model::project(store.tasks(), filter, sort);
    let progress = model::progress(store.tasks());

    let mut human = HumanOutput::new(format!(
        "{} ({}%)",
        progress.label(),
        progress.percent
    ));
    if view.is_empty() {
        human.push_detail("No tasks match.");
    }
    for task in &view {
        human.push_detail(format!(
            "{}  [{}]  due {}  added {}  {}",
            task.id,
            task.status,
            format_deadline(task.deadline),
            task.created_at.format("%Y-%m-%d"),
            task.title,
        ));
        if !task.description.trim().is_empty() {
            human.push_detail(format!("    {}", task.description));
        }
    }

    let report = ListReport {
        tasks: view,
        progress,
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &report,
        Some(&human),
    )
}
