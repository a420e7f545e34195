//! End-to-end tests for the calis binary.
//!
//! Each test gets its own data directory and an empty config directory so a
//! real user config can never leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("calis"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn db_path(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("data").join("calis.json")
}

fn read_db(path: &Path) -> Value {
    let contents = fs::read_to_string(path).expect("database exists");
    serde_json::from_str(&contents).expect("database is valid JSON")
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Calisthenics workout rotation and drop-set planner",
        ));
}

#[test]
fn test_default_command_shows_first_workout_without_writing() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout: Upper #1"))
        .stdout(predicate::str::contains("Triceps & Pectorals"))
        .stdout(predicate::str::contains("Rest between sets: 90s"));

    assert!(!db_path(&temp_dir).exists());
}

#[test]
fn test_generate_saves_twelve_sets() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPPER #1 WORKOUT"))
        .stdout(predicate::str::contains("Session:"))
        .stdout(predicate::str::contains("5-7 reps (Strength)"))
        .stdout(predicate::str::contains("Workout saved"));

    let db = read_db(&db_path(&temp_dir));
    let sessions = db["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["workout_type"], "Upper1");
    assert_eq!(sessions[0]["sets"].as_array().unwrap().len(), 12);
    assert_eq!(sessions[0]["completed"], false);
}

#[test]
fn test_dry_run_does_not_save() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!db_path(&temp_dir).exists());
}

#[test]
fn test_generate_explicit_type() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--type", "lower2", "--seed", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOWER #2 WORKOUT"))
        .stdout(predicate::str::contains("Quads"));

    // Generating does not move the schedule
    cli(&temp_dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout: Upper #1"));
}

#[test]
fn test_unknown_workout_type_rejected() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--type", "cardio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown workout type"));
}

#[test]
fn test_full_workout_flow_advances_rotation() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--seed", "7"])
        .assert()
        .success();

    cli(&temp_dir)
        .args(["log", "latest", "1", "--reps", "6", "--weight", "12.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set 1 logged"))
        .stdout(predicate::str::contains("x 6 @ 12.5"));

    cli(&temp_dir)
        .args(["stretches", "latest", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cooldown for Upper #1"));

    cli(&temp_dir)
        .args(["complete", "latest", "--effort", "2", "--stretch", "2", "--stretch", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout: Lower #1"));

    let db = read_db(&db_path(&temp_dir));
    let session = &db["sessions"][0];
    assert_eq!(session["completed"], true);
    assert_eq!(session["effort_rating"], 2);
    assert_eq!(session["stretches_completed"], serde_json::json!([2, 6]));
    assert_eq!(session["sets"][0]["actual_reps"], 6);
    assert_eq!(session["sets"][0]["weight"], 12.5);
    assert!(session["sets"][1]["actual_reps"].is_null());
    assert_eq!(db["settings"]["current_workout_type"], "Lower1");

    cli(&temp_dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout: Lower #1"))
        .stdout(predicate::str::contains("Hamstrings & Calves"));
}

#[test]
fn test_invalid_effort_leaves_data_untouched() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--seed", "2"])
        .assert()
        .success();
    let before = fs::read_to_string(db_path(&temp_dir)).unwrap();

    cli(&temp_dir)
        .args(["complete", "latest", "--effort", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert_eq!(fs::read_to_string(db_path(&temp_dir)).unwrap(), before);
}

#[test]
fn test_log_rejects_bad_set_positions() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["log", "latest", "1", "--reps", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No workouts recorded yet"));

    cli(&temp_dir)
        .args(["generate", "--seed", "2"])
        .assert()
        .success();

    cli(&temp_dir)
        .args(["log", "latest", "0", "--reps", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Set positions start at 1"));

    cli(&temp_dir)
        .args(["log", "latest", "13", "--reps", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_unknown_session_id() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--seed", "2"])
        .assert()
        .success();

    cli(&temp_dir)
        .args([
            "complete",
            "00000000-0000-4000-8000-000000000000",
            "--effort",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session not found"));

    cli(&temp_dir)
        .args(["stretches", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid session id"));
}

#[test]
fn test_schedule_override() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["schedule", "Upper #2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout set to Upper #2"));

    cli(&temp_dir)
        .args(["generate", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPPER #2 WORKOUT"));
}

#[test]
fn test_exercise_and_stretch_toggles() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["exercise", "1", "--disable", "--requires-weight", "true"])
        .assert()
        .success();

    cli(&temp_dir)
        .args(["stretch", "3", "--disable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stretch 3 updated"))
        .stdout(predicate::str::contains("(disabled)"));

    let db = read_db(&db_path(&temp_dir));
    assert_eq!(db["exercises"][0]["active"], false);
    assert_eq!(db["exercises"][0]["requires_weight"], true);
    assert_eq!(db["stretches"][2]["active"], false);

    cli(&temp_dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("(disabled)"));

    cli(&temp_dir)
        .args(["exercise", "999", "--enable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Exercise not found: 999"));

    cli(&temp_dir)
        .args(["exercise", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));

    cli(&temp_dir)
        .args(["stretch", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));

    cli(&temp_dir)
        .args(["stretch", "3", "--enable", "--disable"])
        .assert()
        .failure();
}

#[test]
fn test_edit_exercise_and_stretch_metadata() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args([
            "exercise",
            "3",
            "--name",
            "Standard Push-up",
            "--difficulty",
            "master",
            "--target-reps",
            "12",
            "--target-weight",
            "2.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Push-up (Push-up, Master)"));

    cli(&temp_dir)
        .args([
            "stretch",
            "16",
            "--name",
            "Neck Side Bend",
            "--position",
            "standing",
            "--tag",
            "Neck",
            "--tag",
            "Shoulders",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neck Side Bend (Standing): Neck, Shoulders"));

    let db = read_db(&db_path(&temp_dir));
    let exercise = &db["exercises"][2];
    assert_eq!(exercise["name"], "Standard Push-up");
    assert_eq!(exercise["difficulty"], "Master");
    assert_eq!(exercise["target_reps"], 12);
    assert_eq!(exercise["target_weight"], 2.5);
    let stretch = &db["stretches"][15];
    assert_eq!(stretch["position"], "Standing");
    assert_eq!(stretch["muscle_tags"], serde_json::json!(["Neck", "Shoulders"]));

    cli(&temp_dir)
        .args(["exercise", "3", "--difficulty", "legendary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown difficulty"));

    cli(&temp_dir)
        .args(["stretch", "16", "--name", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name cannot be empty"));
}

#[test]
fn test_completing_twice_is_rejected() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["generate", "--seed", "1"])
        .assert()
        .success();
    cli(&temp_dir)
        .args(["complete", "latest", "--effort", "2"])
        .assert()
        .success();

    cli(&temp_dir)
        .args(["complete", "latest", "--effort", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));

    cli(&temp_dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next workout: Lower #1"));
}

#[test]
fn test_history_listing_and_csv_export() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet"));

    cli(&temp_dir)
        .args(["generate", "--seed", "4"])
        .assert()
        .success();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper #1"))
        .stdout(predicate::str::contains("in progress"));

    let csv_path = temp_dir.path().join("export").join("history.csv");
    cli(&temp_dir)
        .args(["history", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 12 sets"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("date,workout_type,effort,exercise,set,reps,weight")
    );
    assert_eq!(lines.count(), 12);
}

#[test]
fn test_corrupted_database_reported_then_reset() {
    let temp_dir = setup_test_dir();
    let path = db_path(&temp_dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ invalid json }}}}").unwrap();

    cli(&temp_dir)
        .arg("next")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));

    // Corrupt data is never silently replaced
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ invalid json }}}}");

    cli(&temp_dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database reset"));

    let db = read_db(&path);
    assert_eq!(db["progress"].as_array().unwrap().len(), 12);
    assert!(db["sessions"].as_array().unwrap().is_empty());
}

#[test]
fn test_reset_keeps_configured_rest_timer() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config").join("calis");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[workout]\nrest_timer_seconds = 45\n",
    )
    .unwrap();

    cli(&temp_dir)
        .args(["generate", "--seed", "1"])
        .assert()
        .success();
    cli(&temp_dir).arg("reset").assert().success();

    cli(&temp_dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest between sets: 45s"));
}
