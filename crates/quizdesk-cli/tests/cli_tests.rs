//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Every question's correct answer is its first option.
const POOL: &str = r#"[
    {"question": "Alpha?", "options": ["a1", "a2", "a3", "a4"], "answer": "a1"},
    {"question": "Beta?", "options": ["b1", "b2", "b3", "b4"], "answer": "b1"},
    {"question": "Gamma?", "options": ["g1", "g2", "g3", "g4"], "answer": "g1"},
    {"question": "Delta?", "options": ["d1", "d2", "d3", "d4"], "answer": "d1"},
    {"question": "Epsilon?", "options": ["e1", "e2", "e3", "e4"], "answer": "e1"},
    {"question": "Broken", "options": ["x", "y"], "answer": "x"}
]"#;

const HISTORY: &str = r#"[
    {"user": "Alice", "score": 4, "total": 5, "time": 100, "date": "2025-01-01 10:00"},
    {"user": "bob", "score": 2, "total": 5, "time": 200, "date": "2025-01-02 11:00"},
    {"user": "alicia", "score": 5, "total": 5, "time": 90}
]"#;

fn quizdesk() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizdesk").unwrap();
    cmd.env_remove("QUIZDESK_ADMIN_PASSWORD").env_remove("RUST_LOG");
    cmd
}

/// A temp workspace with a config, a question pool and optionally a history file.
fn workspace(history: Option<&str>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("questions.json"), POOL).unwrap();
    if let Some(h) = history {
        std::fs::write(dir.path().join("history.json"), h).unwrap();
    }
    let config = dir.path().join("quizdesk.toml");
    std::fs::write(
        &config,
        format!(
            "questions_file = {:?}\nhistory_file = {:?}\nexport_dir = {:?}\nadmin_password = \"s3cret\"\n",
            dir.path().join("questions.json"),
            dir.path().join("history.json"),
            dir.path().join("exports"),
        ),
    )
    .unwrap();
    (dir, config)
}

fn history_len(dir: &Path) -> usize {
    let content = std::fs::read_to_string(dir.join("history.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    records.len()
}

#[test]
fn take_all_correct() {
    let (dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", "alice", "--count", "5"])
        .write_stdin("1\n1\n1\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice scored 5/5"))
        .stdout(predicate::str::contains("Time taken:"));

    assert_eq!(history_len(dir.path()), 1);
    let csv = std::fs::read_to_string(dir.path().join("exports/alice_result.csv")).unwrap();
    assert!(csv.starts_with("Question,Your Answer,Correct Answer,Status\n"));
    assert_eq!(csv.lines().count(), 6);
}

#[test]
fn take_with_no_answers_scores_zero() {
    let (dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", "bob"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("bob scored 0/5"));

    assert_eq!(history_len(dir.path()), 1);
}

#[test]
fn take_blank_name_fails() {
    let (dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("please enter your name"));

    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn take_more_than_pool_fails() {
    let (_dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", "bob", "--count", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not enough questions"));
}

#[test]
fn take_rejects_unsupported_count() {
    let (_dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", "bob", "--count", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question count must be one of"));
}

#[test]
fn take_missing_pool_fails() {
    let (dir, config) = workspace(None);
    std::fs::remove_file(dir.path().join("questions.json")).unwrap();

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["take", "--user", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load question pool"));
}

#[test]
fn history_shows_filtered_records() {
    let (_dir, config) = workspace(Some(HISTORY));

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["history", "--password", "s3cret", "--filter", "ALI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("alicia"))
        .stdout(predicate::str::contains("bob").not())
        .stdout(predicate::str::contains("2 of 3 records"));
}

#[test]
fn history_without_records() {
    let (_dir, config) = workspace(None);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["history", "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn admin_commands_reject_wrong_password() {
    let (dir, config) = workspace(Some(HISTORY));

    for args in [
        vec!["history", "--password", "guess"],
        vec!["export", "--password", "guess"],
        vec!["clear", "--password", "guess", "--yes"],
    ] {
        quizdesk()
            .arg("--config")
            .arg(&config)
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid admin password"));
    }

    assert_eq!(history_len(dir.path()), 3);
}

#[test]
fn export_writes_full_history() {
    let (dir, config) = workspace(Some(HISTORY));
    let output = dir.path().join("all.csv");

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["export", "--password", "s3cret", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 records"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "User,Score,Total,Time,Date\n\
         Alice,4,5,100,2025-01-01 10:00\n\
         bob,2,5,200,2025-01-02 11:00\n\
         alicia,5,5,90,\n"
    );
}

#[test]
fn clear_requires_confirmation() {
    let (dir, config) = workspace(Some(HISTORY));

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["clear", "--password", "s3cret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(history_len(dir.path()), 3);

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["clear", "--password", "s3cret", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records removed"));
    assert_eq!(history_len(dir.path()), 0);
}

#[test]
fn clear_wipes_malformed_history() {
    let (dir, config) = workspace(Some("{corrupt"));

    quizdesk()
        .arg("--config")
        .arg(&config)
        .args(["clear", "--password", "s3cret", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("previous file was unreadable"));
    assert_eq!(history_len(dir.path()), 0);
}

#[test]
fn validate_reports_skipped_questions() {
    let (dir, _config) = workspace(None);

    quizdesk()
        .arg("validate")
        .arg("--questions")
        .arg(dir.path().join("questions.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("5 valid questions"))
        .stdout(predicate::str::contains("1 skipped"))
        .stdout(predicate::str::contains("Test sizes available: 5"));
}

#[test]
fn rust_log_raises_verbosity() {
    let (dir, _config) = workspace(None);
    let pool = dir.path().join("questions.json");

    quizdesk()
        .arg("validate")
        .arg("--questions")
        .arg(&pool)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());

    quizdesk()
        .env("RUST_LOG", "quizdesk=debug")
        .arg("validate")
        .arg("--questions")
        .arg(&pool)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("dropping question #6"));
}

#[test]
fn validate_nonexistent_file() {
    quizdesk()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_explicit_config_fails() {
    quizdesk()
        .args(["--config", "no_such_config.toml", "history", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizdesk()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizdesk.toml"))
        .stdout(predicate::str::contains("Created engineering_mcqs.json"));

    assert!(dir.path().join("quizdesk.toml").exists());

    // The sample pool is usable straight away.
    quizdesk()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 valid questions"))
        .stdout(predicate::str::contains("Test sizes available: 5, 10"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizdesk()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizdesk()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timed multiple-choice tests"));
}

#[test]
fn version_output() {
    quizdesk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizdesk"));
}
