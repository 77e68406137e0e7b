use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn taskdeck(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").expect("binary");
    cmd.env("TASKDECK_DATA", data.path().join("tasks.json"));
    // Point at a nonexistent config so the user's real one never leaks in.
    cmd.env("TASKDECK_CONFIG", data.path().join("taskdeck.toml"));
    cmd
}

#[test]
fn help_works() {
    Command::cargo_bin("taskdeck")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task list"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["ui", "add", "list", "status", "rm", "clear"] {
        Command::cargo_bin("taskdeck")
            .expect("binary")
            .args([cmd, "--help"])
            .assert()
            .success();
    }
}

#[test]
fn add_then_list_round_trips() {
    let data = TempDir::new().unwrap();

    taskdeck(&data)
        .args(["add", "Submit essay", "--deadline", "2024-05-01"])
        .assert()
        .success()
        .stdout(contains("Added: Submit essay"));

    taskdeck(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Submit essay"))
        .stdout(contains("0/1 tasks completed"));
}

#[test]
fn json_output_wraps_the_report_in_an_envelope() {
    let data = TempDir::new().unwrap();

    let output = taskdeck(&data)
        .args(["add", "Task", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["command"], "add");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["added"], true);
    assert_eq!(payload["data"]["task"]["status"], "Pending");
}

#[test]
fn status_and_rm_on_unknown_ids_are_noops() {
    let data = TempDir::new().unwrap();

    taskdeck(&data)
        .args(["status", "missing", "completed"])
        .assert()
        .success()
        .stdout(contains("No task with id missing"));

    taskdeck(&data)
        .args(["rm", "missing"])
        .assert()
        .success()
        .stdout(contains("No task with id missing"));
}

#[test]
fn invalid_status_is_a_user_error() {
    let data = TempDir::new().unwrap();

    taskdeck(&data)
        .args(["add", "Task", "--status", "done-ish"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown status"));
}

#[test]
fn clear_without_yes_is_a_noop() {
    let data = TempDir::new().unwrap();

    taskdeck(&data).args(["add", "Task"]).assert().success();

    taskdeck(&data)
        .arg("clear")
        .assert()
        .success()
        .stdout(contains("pass --yes to confirm"));

    taskdeck(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Task"));

    taskdeck(&data)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Cleared 1 tasks"));

    taskdeck(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No tasks match"));
}

#[test]
fn blank_title_add_is_silent_and_successful() {
    let data = TempDir::new().unwrap();

    taskdeck(&data)
        .args(["add", "   "])
        .assert()
        .success()
        .stdout(contains("Nothing added"));

    assert!(!data.path().join("tasks.json").exists());
}

#[test]
fn malformed_data_file_is_recovered_not_fatal() {
    let data = TempDir::new().unwrap();
    std::fs::write(data.path().join("tasks.json"), "{ broken").unwrap();

    taskdeck(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0/0 tasks completed"));
}
