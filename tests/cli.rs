use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn perdiem(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("perdiem").unwrap();
    cmd.env("PERDIEM_DATA_DIR", data_dir);
    cmd
}

fn trips_blob(data_dir: &Path) -> String {
    let path = std::fs::read_dir(data_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy().starts_with("trips-"))
        .expect("trips blob not written")
        .path();
    std::fs::read_to_string(path).unwrap()
}

/// Trip ids are the first `id` field in the pretty-printed collection.
fn first_trip_id(data_dir: &Path) -> String {
    let blob = trips_blob(data_dir);
    let marker = "\"id\": \"";
    let start = blob.find(marker).expect("no id field") + marker.len();
    blob[start..start + 8].to_string()
}

fn login(data_dir: &Path) {
    perdiem(data_dir)
        .args(["login", "alice@example.com", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));
}

#[test]
fn mutations_require_a_session() {
    let dir = tempfile::tempdir().unwrap();
    perdiem(dir.path())
        .args(["trips", "add", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
    perdiem(dir.path())
        .args(["whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn login_rejects_malformed_email() {
    let dir = tempfile::tempdir().unwrap();
    perdiem(dir.path())
        .args(["login", "not-an-email", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn trip_and_expense_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());

    perdiem(dir.path())
        .args(["trips", "add", "Berlin Conference", "--destination", "Berlin", "--start", "2025-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trip 'Berlin Conference'"));

    perdiem(dir.path())
        .args([
            "expenses", "add", "--trip", "Berlin Conference",
            "45.75", "Team lunch", "--category", "food", "--date", "2025-04-02",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Food expense of $45.75"));

    perdiem(dir.path())
        .args([
            "expenses", "add", "--trip", "Berlin Conference",
            "89.50", "Train to Hamburg", "--category", "travel", "--date", "2025-04-03",
        ])
        .assert()
        .success();

    perdiem(dir.path())
        .args(["trips", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Berlin Conference"))
        .stdout(predicate::str::contains("$135.25"));

    perdiem(dir.path())
        .args(["expenses", "list", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team lunch"))
        .stdout(predicate::str::contains("Train to Hamburg").not());
}

#[test]
fn report_shows_category_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["trips", "add", "T", "--start", "2025-04-01"])
        .assert()
        .success();
    perdiem(dir.path())
        .args(["expenses", "add", "--trip", "T", "45.75", "Lunch", "--category", "food"])
        .assert()
        .success();
    perdiem(dir.path())
        .args(["expenses", "add", "--trip", "T", "89.50", "Flight", "--category", "travel"])
        .assert()
        .success();

    perdiem(dir.path())
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$135.25"))
        .stdout(predicate::str::contains("33.83%"))
        .stdout(predicate::str::contains("66.17%"));
}

#[test]
fn export_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["trips", "add", "Offsite", "--start", "2025-04-01"])
        .assert()
        .success();
    perdiem(dir.path())
        .args(["expenses", "add", "--trip", "Offsite", "12.00", "Parking", "--category", "parking"])
        .assert()
        .success();

    let out = dir.path().join("report.xlsx");
    perdiem(dir.path())
        .args(["export", "--trip", "Offsite", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn export_with_no_expenses_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    let out = dir.path().join("empty.xlsx");
    perdiem(dir.path())
        .args(["export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("No expenses in scope"));
    assert!(out.exists());
}

#[test]
fn delete_trip_cascades() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["trips", "add", "Doomed", "--start", "2025-04-01"])
        .assert()
        .success();
    perdiem(dir.path())
        .args(["expenses", "add", "--trip", "Doomed", "10.00", "Snacks", "--category", "misc"])
        .assert()
        .success();

    // Resolve the trip id from the trips file rather than scraping the table
    let trip_id = first_trip_id(dir.path());

    perdiem(dir.path())
        .args(["trips", "delete", &trip_id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted trip 'Doomed'"));

    perdiem(dir.path())
        .args(["expenses", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found"));
}

#[test]
fn complete_trip_stamps_end_date() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["trips", "add", "Active One", "--start", "2025-04-01"])
        .assert()
        .success();

    let trip_id = first_trip_id(dir.path());

    perdiem(dir.path())
        .args(["trips", "complete", &trip_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    let blob = trips_blob(dir.path());
    assert!(blob.contains("\"status\": \"completed\""), "got: {blob}");
    assert!(blob.contains("\"end_date\": \""), "got: {blob}");
    assert!(blob.contains("\"start_date\": \"2025-04-01\""), "got: {blob}");
}

#[test]
fn logout_ends_session_but_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["trips", "add", "Kept", "--start", "2025-04-01"])
        .assert()
        .success();
    perdiem(dir.path()).args(["logout"]).assert().success();
    perdiem(dir.path())
        .args(["trips", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
    let has_trips_blob = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().starts_with("trips-"));
    assert!(has_trips_blob);
}

#[test]
fn demo_seeds_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample trips"));
    perdiem(dir.path())
        .args(["trips", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Berlin Sales Conference"))
        .stdout(predicate::str::contains("Austin Site Visit"));
}

#[test]
fn profile_update_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    login(dir.path());
    perdiem(dir.path())
        .args(["profile", "--position", "Field Engineer", "--department", "Support"])
        .assert()
        .success();
    perdiem(dir.path())
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field Engineer"))
        .stdout(predicate::str::contains("Support"));
}
