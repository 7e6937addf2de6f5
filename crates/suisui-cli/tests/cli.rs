//! End-to-end tests for the `suisui` binary.

use std::path::PathBuf;
use std::str;

use assert_cmd::Command;
use rstest::rstest;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn suisui() -> Command {
    let mut cmd = Command::cargo_bin("suisui").expect("binary exists");
    cmd.env_remove("SUISUI_STEPS_EXPORT")
        .env_remove("SUISUI_LOG_LEVEL");
    cmd
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn stdout_of(cmd: &mut Command) -> (i32, String) {
    let output = cmd.output().expect("runs");
    let stdout = str::from_utf8(&output.stdout).expect("utf8").to_owned();
    (output.status.code().unwrap_or(-1), stdout)
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn args_prints_typed_arguments() {
    let (code, stdout) = stdout_of(suisui().args(["args", "user <username> picks (red|blue)"]));
    assert_eq!(code, 0);
    let args: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(
        args.pointer("/0/name").and_then(serde_json::Value::as_str),
        Some("username")
    );
    assert_eq!(
        args.pointer("/1/type").and_then(serde_json::Value::as_str),
        Some("enum")
    );
    assert_eq!(
        args.pointer("/1/enumValues/1").and_then(serde_json::Value::as_str),
        Some("blue")
    );
}

#[test]
fn segments_prints_one_line_per_segment() {
    let (code, stdout) = stdout_of(suisui().args(["segments", "I wait {int} seconds"]));
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "text \"I wait \"\narg arg0:int = \ntext \" seconds\"\n"
    );
}

#[test]
fn steps_lists_exported_definitions() {
    let export = fixture("steps.json");
    let (code, stdout) = stdout_of(
        suisui()
            .args(["steps", "--export"])
            .arg(&export),
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("Given 'I am on the {string} page' (steps/navigation.steps.ts:12)"));
    assert!(stdout.contains("Then 'I see {string}' (generic) [generic]"));
}

#[test]
fn steps_without_export_is_empty() {
    let (code, stdout) = stdout_of(suisui().arg("steps"));
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[rstest]
#[case(
    "Given",
    "I am on the \"dashboard\" page",
    "matched Given 'I am on the {string} page'\n  arg0:string = dashboard\n"
)]
#[case(
    "and",
    "I am logged in as guest",
    concat!(
        "matched Given '^I am logged in as (admin|user|guest)$'\n",
        "  arg0:enum = guest [admin|user|guest]\n",
    )
)]
#[case("Then", "I log in as <role>", "unresolved\n  role:string = \n")]
fn match_reads_export_from_environment(
    #[case] keyword: &str,
    #[case] text: &str,
    #[case] expected: &str,
) {
    let (code, stdout) = stdout_of(
        suisui()
            .env("SUISUI_STEPS_EXPORT", fixture("steps.json"))
            .args(["match", keyword, text]),
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, expected);
}

#[test]
fn validate_accepts_complete_feature() {
    let (code, stdout) = stdout_of(
        suisui()
            .arg("validate")
            .arg(fixture("login.feature"))
            .arg("--export")
            .arg(fixture("steps.json")),
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "Admin signs in: valid\nForm validation: valid\n");
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn validate_exits_one_on_errors() {
    let (code, stdout) = stdout_of(
        suisui()
            .env("SUISUI_STEPS_EXPORT", fixture("steps.json"))
            .arg("validate")
            .arg(fixture("broken.feature"))
            .arg("--json"),
    );
    assert_eq!(code, 1);
    let reports: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(
        reports.pointer("/0/scenario").and_then(serde_json::Value::as_str),
        Some("Impatient")
    );
    assert_eq!(
        reports.pointer("/0/isValid").and_then(serde_json::Value::as_bool),
        Some(false)
    );
    assert_eq!(
        reports
            .pointer("/0/issues/0/message")
            .and_then(serde_json::Value::as_str),
        Some("Argument \"arg0\" must be an integer")
    );
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn unreadable_export_fails() {
    let dir = TempDir::new().expect("temp dir");
    let export = dir.path().join("steps.json");
    std::fs::write(&export, "{ not json").expect("write export");
    let output = suisui()
        .args(["steps", "--export"])
        .arg(&export)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("failed to load step export"));
}

#[test]
fn invalid_log_level_environment_exits_two() {
    let (code, stdout) = stdout_of(
        suisui()
            .env("SUISUI_LOG_LEVEL", "chatty")
            .args(["args", "x"]),
    );
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
}
