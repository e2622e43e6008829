//! Tests for `warren run` command.

use crate::support::*;

#[test]
fn test_run_without_command_fails() {
    let t = Test::new();

    // The empty-command check fires before the workspace is opened
    let output = t.run(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no command specified");
}

#[test]
fn test_run_without_init_fails() {
    let t = Test::new();

    let output = t.run(&["echo", "test"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
}

#[test]
fn test_run_without_credential_fails() {
    let t = Test::init();

    let output = t.run(&["echo", "test"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no credential");
}

#[test]
fn test_run_with_unreachable_store_fails() {
    let t = Test::init_unreachable();

    let output = t
        .cmd()
        .env("WARREN_TOKEN", "some-token")
        .args(["run", "--", "echo", "test"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
    // The child command must not have run
    assert_stdout_excludes(&output, "test");
}
