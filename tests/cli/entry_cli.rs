use predicates::prelude::predicate;
use serde_json::Value;

#[test]
fn help_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("adqa")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("qa"))
        .stdout(predicate::str::contains("parse"));
}

#[test]
fn version_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("adqa")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("adqa")
        .arg("upload")
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(3));
    let stderr: Value = serde_json::from_slice(&output.stderr).expect("stderr json");
    assert_eq!(stderr["error"], Value::from("input_usage_error"));
    assert_eq!(stderr["details"]["kind"], Value::from("cli_parse_error"));
}

#[test]
fn qa_requires_config_flag() {
    assert_cmd::cargo::cargo_bin_cmd!("adqa")
        .arg("qa")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--config"));
}
