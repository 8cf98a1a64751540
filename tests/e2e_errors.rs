mod common;

use assert_cmd::Command;
use common::cli::{Workspace, run_pagesmith};
use predicates::prelude::*;
use serde_json::Value;

// Log lines precede the error; the JSON body is the first line that is exactly `{`.
fn parse_error(stderr: &str) -> Value {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines
        .iter()
        .position(|line| *line == "{")
        .unwrap_or_else(|| panic!("no JSON in stderr: {stderr}"));
    serde_json::from_str(&lines[start..].join("\n")).expect("parse structured error")
}

#[test]
fn e2e_missing_recording_is_structured_error() {
    let _log = common::test_log("e2e_missing_recording_is_structured_error");
    let workspace = Workspace::new();

    let run = run_pagesmith(&workspace, ["record", "absent.ts"], "record_missing");
    assert_eq!(run.code(), Some(1), "stderr: {}", run.stderr);

    let error = parse_error(&run.stderr);
    assert_eq!(error["error"]["code"], "INPUT_NOT_FOUND");
    assert!(
        error["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .contains("absent.ts")
    );
    assert!(!workspace.exists("pages"));
}

#[test]
fn e2e_missing_api_input_is_fatal() {
    let _log = common::test_log("e2e_missing_api_input_is_fatal");
    let workspace = Workspace::new();

    let run = run_pagesmith(&workspace, ["api"], "api_missing");
    assert_eq!(run.code(), Some(1), "stderr: {}", run.stderr);
    assert_eq!(parse_error(&run.stderr)["error"]["code"], "INPUT_NOT_FOUND");
}

#[test]
fn e2e_non_array_api_input_is_invalid() {
    let _log = common::test_log("e2e_non_array_api_input_is_invalid");
    let workspace = Workspace::new();
    workspace.write("tests.json", r#"{ "pageName": "UserApi" }"#);

    let run = run_pagesmith(&workspace, ["api"], "api_not_array");
    assert_eq!(run.code(), Some(2), "stderr: {}", run.stderr);
    assert_eq!(parse_error(&run.stderr)["error"]["code"], "INVALID_INPUT");
    assert!(!workspace.exists("api"));
}

#[test]
fn e2e_bad_wait_until_is_config_error() {
    let _log = common::test_log("e2e_bad_wait_until_is_config_error");
    let workspace = Workspace::new();
    workspace.write("login.ts", common::LOGIN_RECORDING);

    let run = run_pagesmith(
        &workspace,
        ["record", "login.ts", "--wait-until", "eventually"],
        "record_bad_wait",
    );
    assert_eq!(run.code(), Some(7), "stderr: {}", run.stderr);
    assert!(!workspace.exists("pages"));
}

#[test]
fn e2e_explicit_config_must_exist() {
    let _log = common::test_log("e2e_explicit_config_must_exist");
    let workspace = Workspace::new();

    let run = run_pagesmith(
        &workspace,
        ["--config", "missing.yaml", "config"],
        "config_missing",
    );
    assert_eq!(run.code(), Some(7), "stderr: {}", run.stderr);
    assert_eq!(parse_error(&run.stderr)["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn e2e_watch_missing_dir_fails() {
    let _log = common::test_log("e2e_watch_missing_dir_fails");
    let workspace = Workspace::new();

    let run = run_pagesmith(&workspace, ["watch", "nowhere"], "watch_missing");
    assert_eq!(run.code(), Some(1), "stderr: {}", run.stderr);
    assert_eq!(parse_error(&run.stderr)["error"]["code"], "INPUT_NOT_FOUND");
}

#[test]
fn e2e_unknown_subcommand_is_usage_error() {
    let _log = common::test_log("e2e_unknown_subcommand_is_usage_error");
    let workspace = Workspace::new();

    Command::new(assert_cmd::cargo::cargo_bin!("pagesmith"))
        .current_dir(&workspace.root)
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn e2e_help_lists_commands() {
    let _log = common::test_log("e2e_help_lists_commands");

    Command::new(assert_cmd::cargo::cargo_bin!("pagesmith"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("record")
                .and(predicate::str::contains("watch"))
                .and(predicate::str::contains("api")),
        );
}

#[test]
fn e2e_path_like_test_prefix_is_validation_error() {
    let _log = common::test_log("e2e_path_like_test_prefix_is_validation_error");
    let workspace = Workspace::new();
    workspace.write("login.ts", common::LOGIN_RECORDING);

    let run = run_pagesmith(
        &workspace,
        ["record", "login.ts", "--test-prefix", "../escape"],
        "record_bad_prefix",
    );
    assert_eq!(run.code(), Some(4), "stderr: {}", run.stderr);
    let error = parse_error(&run.stderr);
    assert_eq!(error["error"]["code"], "VALIDATION_FAILED");
    assert!(!workspace.exists("pages"));
    assert!(!workspace.exists("escape.spec.ts"));
}

#[test]
fn e2e_non_identifier_class_name_is_validation_error() {
    let _log = common::test_log("e2e_non_identifier_class_name_is_validation_error");
    let workspace = Workspace::new();
    workspace.write("login.ts", common::LOGIN_RECORDING);

    let run = run_pagesmith(
        &workspace,
        ["record", "login.ts", "--class-name", "Login-Page"],
        "record_bad_class",
    );
    assert_eq!(run.code(), Some(4), "stderr: {}", run.stderr);
    assert!(!workspace.exists("pages"));
}
