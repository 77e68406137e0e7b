//! View model: pure projection of the task collection for display.
//!
//! `project` is stateless; it never mutates the store and the renderer only
//! ever sees its output. Progress is always computed over the full
//! collection, not the filtered one.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Status, Task};

/// Which tasks to include in the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKey {
    #[default]
    All,
    Status(Status),
}

impl FilterKey {
    /// Selector order: `All` followed by each status.
    pub const ALL: [FilterKey; 4] = [
        FilterKey::All,
        FilterKey::Status(Status::Pending),
        FilterKey::Status(Status::InProgress),
        FilterKey::Status(Status::Completed),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::All => "All",
            FilterKey::Status(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<FilterKey> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(FilterKey::All);
        }
        Status::parse(value).map(FilterKey::Status)
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::Status(status) => task.status == *status,
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display order of the projection. Exactly six keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DeadlineAsc,
    DeadlineDesc,
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::DeadlineAsc,
        SortKey::DeadlineDesc,
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DeadlineAsc => "deadline-asc",
            SortKey::DeadlineDesc => "deadline-desc",
            SortKey::CreatedDesc => "created-desc",
            SortKey::CreatedAsc => "created-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    /// Human-readable label for selector UI.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DeadlineAsc => "Deadline (soonest first)",
            SortKey::DeadlineDesc => "Deadline (latest first)",
            SortKey::CreatedDesc => "Added (newest first)",
            SortKey::CreatedAsc => "Added (oldest first)",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
        }
    }

    pub fn parse(value: &str) -> Option<SortKey> {
        let normalized = value.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter then sort the collection into the sequence to display.
pub fn project(tasks: &[Task], filter: FilterKey, sort: SortKey) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();
    view.sort_by(comparator(sort));
    view
}

fn comparator(sort: SortKey) -> impl Fn(&Task, &Task) -> Ordering {
    move |left, right| match sort {
        SortKey::DeadlineAsc => deadline_rank(left).cmp(&deadline_rank(right)),
        SortKey::DeadlineDesc => deadline_rank(right).cmp(&deadline_rank(left)),
        SortKey::CreatedDesc => right.created_at.cmp(&left.created_at),
        SortKey::CreatedAsc => left.created_at.cmp(&right.created_at),
        SortKey::TitleAsc => title_order(left, right),
        SortKey::TitleDesc => title_order(right, left),
    }
}

/// Tasks without a deadline order as the maximum representable date: last in
/// ascending order, first in descending order.
fn deadline_rank(task: &Task) -> NaiveDate {
    task.deadline.unwrap_or(NaiveDate::MAX)
}

fn title_order(left: &Task, right: &Task) -> Ordering {
    left.title
        .to_lowercase()
        .cmp(&right.title.to_lowercase())
        .then_with(|| left.title.cmp(&right.title))
}

/// Completion summary over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole number; 0 for an empty collection.
    pub percent: u8,
}

impl Progress {
    pub fn label(&self) -> String {
        format!("{}/{} tasks completed", self.completed, self.total)
    }
}

pub fn progress(tasks: &[Task]) -> Progress {
    let total = tasks.len();
    let completed = tasks
        .iter()
        .filter(|task| task.status == Status::Completed)
        .count();
    let percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };
    Progress {
        completed,
        total,
        percent,
    }
}
