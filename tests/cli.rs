use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bistro <COMMAND>"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.arg("start")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bistro start"))
        .stdout(predicate::str::contains("--port <PORT>"))
        .stdout(predicate::str::contains("--templates <TEMPLATES>"))
        .stdout(predicate::str::contains("--static-dir <STATIC_DIR>"));
}

#[test]
fn test_cli_menu() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.arg("menu")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("- Vada Pav ($3)"))
        .stdout(predicate::str::contains("- Bombil Fry ($10)"))
        .stdout(predicate::str::contains("Total number of dishes: 30"));
}

#[test]
fn test_cli_order() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.args(["order", "--name", "Asha", "Vada Pav ($3)", "Puran Poli ($6)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thank you, Asha!"))
        .stdout(predicate::str::contains("<td>Total</td><td>$9</td>"));
}

#[test]
fn test_cli_order_defaults_to_guest() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.args(["order", "Chakli ($2)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thank you, Guest!"));
}

#[test]
fn test_cli_order_requires_items() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.arg("order").assert().failure();
}

#[test]
fn test_cli_chat_ends_on_empty_input() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.arg("chat")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What do you recommend?"));
}

#[test]
fn test_cli_no_command() {
    let mut cmd = Command::cargo_bin("bistro").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: bistro <COMMAND>"));
}
