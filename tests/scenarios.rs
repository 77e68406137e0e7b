mod support;

use support::{dated_draft, draft, TestStore};
use taskdeck::model::{progress, project, FilterKey, SortKey};
use taskdeck::task::Status;

#[test]
fn completing_the_only_task_moves_progress_to_100_percent() {
    let fixture = TestStore::init();
    let mut store = fixture.open("2024-04-20");

    store
        .add(dated_draft("Submit essay", Some("2024-05-01"), Status::Pending))
        .unwrap();
    assert_eq!(store.len(), 1);

    let summary = progress(store.tasks());
    assert_eq!(summary.label(), "0/1 tasks completed");
    assert_eq!(summary.percent, 0);

    store.set_status("task-1", Status::Completed).unwrap();
    let summary = progress(store.tasks());
    assert_eq!(summary.label(), "1/1 tasks completed");
    assert_eq!(summary.percent, 100);
}

#[test]
fn undated_tasks_flip_sides_when_the_deadline_sort_reverses() {
    let fixture = TestStore::init();
    let mut store = fixture.open("2024-04-20");

    store
        .add(dated_draft("Dated", Some("2024-06-01"), Status::Pending))
        .unwrap();
    store.add(draft("Undated")).unwrap();

    let ascending = project(store.tasks(), FilterKey::All, SortKey::DeadlineAsc);
    assert_eq!(ascending[0].title, "Dated");
    assert_eq!(ascending[1].title, "Undated");

    let descending = project(store.tasks(), FilterKey::All, SortKey::DeadlineDesc);
    assert_eq!(descending[0].title, "Undated");
    assert_eq!(descending[1].title, "Dated");
}

#[test]
fn filtering_shows_only_the_requested_status() {
    let fixture = TestStore::init();
    let mut store = fixture.open("2024-04-20");

    store.add(draft("Open one")).unwrap();
    store.add(draft("Open two")).unwrap();
    store
        .add(dated_draft("Done", None, Status::Completed))
        .unwrap();

    let completed = project(
        store.tasks(),
        FilterKey::Status(Status::Completed),
        SortKey::CreatedAsc,
    );
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Done");

    // Filtering never touches the underlying collection.
    assert_eq!(store.len(), 3);
}

#[test]
fn editing_to_a_blank_title_retains_the_original_everywhere() {
    let fixture = TestStore::init();
    let mut store = fixture.open("2024-04-20");
    store.add(draft("Original title")).unwrap();

    assert!(store.update("task-1", draft("   ")).unwrap().is_none());

    let view = project(store.tasks(), FilterKey::All, SortKey::TitleAsc);
    assert_eq!(view[0].title, "Original title");
    assert_eq!(fixture.storage().load()[0].title, "Original title");
}
