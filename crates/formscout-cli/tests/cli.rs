//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn keys_lists_the_vocabulary() {
    Command::cargo_bin("formscout")
        .unwrap()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("first_name"))
        .stdout(predicate::str::contains("transcript"));
}

#[test]
fn keys_json_output_is_valid() {
    let output = Command::cargo_bin("formscout")
        .unwrap()
        .args(["keys", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let keys: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert_eq!(keys.len(), 22);
}

#[test]
fn match_resolves_an_email_label() {
    Command::cargo_bin("formscout")
        .unwrap()
        .args(["match", "Email Address", "--no-assist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("email"));
}

#[test]
fn match_reports_unresolvable_labels() {
    Command::cargo_bin("formscout")
        .unwrap()
        .args(["match", "xyz123", "--no-assist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn scan_rejects_a_missing_input_file() {
    Command::cargo_bin("formscout")
        .unwrap()
        .args(["scan", "/nonexistent/frame.png"])
        .assert()
        .failure();
}
