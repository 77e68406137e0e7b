//! taskdeck add command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::{Draft, Task, TaskStore};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub deadline: Option<String>,
    pub status: String,
    pub storage: Storage,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct AddReport {
    added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
}

pub fn run(options: AddOptions) -> Result<()> {
    let deadline = super::parse_deadline(options.deadline.as_deref())?;
    let status = super::parse_status(&options.status)?;

    let mut store = TaskStore::open(options.storage);
    let draft = Draft {
        title: options.title,
        description: options.description,
        deadline,
        status,
    };
    let task = store.add(draft)?.cloned();

    let human = match task.as_ref() {
        Some(task) => {
            let mut human = HumanOutput::new(format!("Added: {}", task.title));
            human.push_summary("id", task.id.clone());
            human.push_summary("status", task.status.to_string());
            if let Some(deadline) = task.deadline {
                human.push_summary("deadline", deadline.format("%Y-%m-%d").to_string());
            }
            human
        }
        None => HumanOutput::new("Nothing added: title is empty"),
    };

    let report = AddReport {
        added: task.is_some(),
        task,
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &report,
        Some(&human),
    )
}
