//! Task records and the task store.
//!
//! The store owns the in-memory collection and is the only writer: every
//! mutation is persisted through [`Storage`] before the call returns. Display
//! order is never stored; callers derive it through [`crate::model`].

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::storage::Storage;

/// Task status, persisted as the literal strings `Pending`, `In Progress`
/// and `Completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Parse a status from user-facing text. Case-insensitive; accepts
    /// `in-progress` and `in_progress` spellings alongside the display form.
    pub fn parse(value: &str) -> Option<Status> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "pending" => Some(Status::Pending),
            "in progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }

    /// The next status in selector order, wrapping around.
    pub fn next(&self) -> Status {
        match self {
            Status::Pending => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    /// The previous status in selector order, wrapping around.
    pub fn prev(&self) -> Status {
        match self {
            Status::Pending => Status::Completed,
            Status::InProgress => Status::Pending,
            Status::Completed => Status::InProgress,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

/// A single task record.
///
/// `id` and `created_at` are fixed at creation; everything else is mutable
/// through the store. `deadline` persists as `""` when absent so the on-disk
/// layout stays a flat map of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "deadline_text")]
    pub deadline: Option<NaiveDate>,
    pub status: Status,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDate,
}

/// The mutable field values taken from the input form before they are applied
/// to a new or existing task.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub status: Status,
}

/// Identifier generation capability. Injected so tests can pin ids.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Collision-resistant default: random UUID v4.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Current-date capability. Injected so tests can pin the calendar.
pub trait DateSource {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date, the default.
#[derive(Debug, Default)]
pub struct LocalDates;

impl DateSource for LocalDates {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// In-memory task collection backed by a [`Storage`] adapter.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
    ids: Box<dyn IdSource>,
    dates: Box<dyn DateSource>,
}

impl TaskStore {
    /// Open the store, loading whatever the storage adapter recovers.
    pub fn open(storage: Storage) -> Self {
        Self::with_sources(storage, Box::new(UuidIds), Box::new(LocalDates))
    }

    /// Open the store with explicit id and date sources.
    pub fn with_sources(
        storage: Storage,
        ids: Box<dyn IdSource>,
        dates: Box<dyn DateSource>,
    ) -> Self {
        let tasks = storage.load();
        Self {
            tasks,
            storage,
            ids,
            dates,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Create a task from a draft. Returns `None` without touching storage
    /// when the trimmed title is empty.
    pub fn add(&mut self, draft: Draft) -> Result<Option<&Task>> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let task = Task {
            id: self.ids.next_id(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            deadline: draft.deadline,
            status: draft.status,
            created_at: self.dates.today(),
        };
        self.tasks.push(task);
        self.persist()?;
        Ok(self.tasks.last())
    }

    /// Replace the mutable fields of the task matching `id`, preserving its
    /// id and creation date. Returns `None` without touching storage when the
    /// trimmed title is empty or no task matches.
    pub fn update(&mut self, id: &str, draft: Draft) -> Result<Option<&Task>> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };

        let task = &mut self.tasks[index];
        task.title = title.to_string();
        task.description = draft.description.trim().to_string();
        task.deadline = draft.deadline;
        task.status = draft.status;
        self.persist()?;
        Ok(self.tasks.get(index))
    }

    /// Update only the status of the task matching `id`. Returns `false`
    /// without touching storage when no task matches.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.status = status;
        self.persist()?;
        Ok(true)
    }

    /// Remove the task matching `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Empty the collection unconditionally.
    pub fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.tasks)
    }
}

/// Serde adapter for the `""`-means-absent deadline field.
mod deadline_text {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDate>, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct SeqIds {
        next: u32,
    }

    impl SeqIds {
        fn new() -> Self {
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

    struct FixedDate(NaiveDate);

    impl DateSource for FixedDate {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn test_store(temp: &TempDir) -> TaskStore {
        let storage = Storage::new(temp.path().join("tasks.json"));
        TaskStore::with_sources(
            storage,
            Box::new(SeqIds::new()),
            Box::new(FixedDate(date("2024-04-20"))),
        )
    }

    fn draft(title: &str) -> Draft {
        Draft {
            title: title.to_string(),
            ..Draft::default()
        }
    }

    #[test]
    fn add_assigns_id_and_creation_date() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);

        let task = store.add(draft("Submit essay")).unwrap().unwrap();
        assert_eq!(task.id, "task-1");
        assert_eq!(task.created_at, date("2024-04-20"));
        assert_eq!(task.status, Status::Pending);

        let second = store.add(draft("Read chapter")).unwrap().unwrap();
        assert_eq!(second.id, "task-2");
    }

    #[test]
    fn add_trims_title_and_description() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);

        let task = store
            .add(Draft {
                title: "  Submit essay  ".to_string(),
                description: "  by email  ".to_string(),
                ..Draft::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(task.title, "Submit essay");
        assert_eq!(task.description, "by email");
    }

    #[test]
    fn blank_title_add_is_a_silent_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);

        assert!(store.add(draft("   ")).unwrap().is_none());
        assert!(store.is_empty());
        // Nothing was persisted either.
        assert!(!temp.path().join("tasks.json").exists());
    }

    #[test]
    fn update_replaces_fields_but_preserves_identity() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        let id = store.add(draft("Old title")).unwrap().unwrap().id.clone();

        let updated = store
            .update(
                &id,
                Draft {
                    title: "New title".to_string(),
                    description: "notes".to_string(),
                    deadline: Some(date("2024-05-01")),
                    status: Status::InProgress,
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, date("2024-04-20"));
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.deadline, Some(date("2024-05-01")));
        assert_eq!(updated.status, Status::InProgress);
    }

    #[test]
    fn update_with_blank_title_keeps_the_original() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        let id = store.add(draft("Keep me")).unwrap().unwrap().id.clone();

        assert!(store.update(&id, draft("  ")).unwrap().is_none());
        assert_eq!(store.get(&id).unwrap().title, "Keep me");
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        store.add(draft("Only task")).unwrap();

        assert!(store.update("missing", draft("Other")).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_status_only_touches_status() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        let id = store.add(draft("Task")).unwrap().unwrap().id.clone();

        assert!(store.set_status(&id, Status::Completed).unwrap());
        let task = store.get(&id).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.title, "Task");

        assert!(!store.set_status("missing", Status::Pending).unwrap());
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        let id = store.add(draft("Task")).unwrap().unwrap().id.clone();

        assert!(store.remove(&id).unwrap());
        assert!(!store.remove(&id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_empties_unconditionally() {
        let temp = TempDir::new().unwrap();
        let mut store = test_store(&temp);
        store.add(draft("One")).unwrap();
        store.add(draft("Two")).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());

        // Clearing an already-empty store still succeeds.
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn status_round_trips_through_display_and_parse() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("in-progress"), Some(Status::InProgress));
        assert_eq!(Status::parse("IN_PROGRESS"), Some(Status::InProgress));
        assert_eq!(Status::parse("done"), None);
    }

    #[test]
    fn deadline_serializes_as_empty_string_when_absent() {
        let task = Task {
            id: "task-1".to_string(),
            title: "Task".to_string(),
            description: String::new(),
            deadline: None,
            status: Status::Pending,
            created_at: date("2024-04-20"),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"deadline\":\"\""));
        assert!(json.contains("\"createdAt\":\"2024-04-20\""));
        assert!(json.contains("\"status\":\"Pending\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn in_progress_serializes_with_a_space() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }
}
