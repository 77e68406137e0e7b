use chrono::NaiveDate;
use tempfile::TempDir;

use taskdeck::storage::Storage;
use taskdeck::task::{DateSource, Draft, IdSource, Status, TaskStore};

/// Sequential ids so tests can reference tasks deterministically.
pub struct SeqIds {
    next: u32,
}

impl SeqIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl IdSource for SeqIds {
    fn next_id(&mut self) -> String {
        let id = format!("task-{}", self.next);
        self.next += 1;
        id
    }
}

/// A pinned calendar.
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.dir.path().join("tasks.json"))
    }

    /// Fresh store over this fixture's data file with deterministic ids and a
    /// pinned date. Opening twice models separate sessions over the same file.
    pub fn open(&self, today: &str) -> TaskStore {
        TaskStore::with_sources(
            self.storage(),
            Box::new(SeqIds::new()),
            Box::new(FixedDate(date(today))),
        )
    }
}

pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid test date")
}

pub fn draft(title: &str) -> Draft {
    Draft {
        title: title.to_string(),
        ..Draft::default()
    }
}

pub fn dated_draft(title: &str, deadline: Option<&str>, status: Status) -> Draft {
    Draft {
        title: title.to_string(),
        description: String::new(),
        deadline: deadline.map(date),
        status,
    }
}
