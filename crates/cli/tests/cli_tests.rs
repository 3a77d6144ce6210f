use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("smartmark").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal bookmark manager"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("smartmark").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("port").and(predicate::str::contains("memory")));
}

#[test]
fn test_cli_list_requires_user() {
    let mut cmd = Command::cargo_bin("smartmark").unwrap();
    cmd.arg("list").assert().failure().stderr(predicate::str::contains("--user"));
}

#[test]
fn test_cli_list_rejects_malformed_user() {
    let mut cmd = Command::cargo_bin("smartmark").unwrap();
    cmd.args(["list", "--user", "not-a-uuid"]).assert().failure();
}

#[test]
fn test_cli_migrate_without_database_url() {
    let mut cmd = Command::cargo_bin("smartmark").unwrap();
    cmd.arg("migrate")
        .env_remove("SMARTMARK_DATABASE_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SMARTMARK_DATABASE_URL must be set"));
}
