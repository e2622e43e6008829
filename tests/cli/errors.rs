//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_shows_usage() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("warren") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("warren") || !out.is_empty());
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();

    // Verbose flag should be accepted
    let output = t
        .cmd()
        .args(["--verbose", "init", "--url", TEST_STORE_URL])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_list_without_init_fails_with_hint() {
    let t = Test::new();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
    // The init hint lands on stdout
    assert_stdout_contains(&output, "warren init");
}

#[test]
fn test_get_without_init_fails() {
    let t = Test::new();

    let output = t.get("DATABASE_URL");
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
}

#[test]
fn test_export_without_init_fails() {
    let t = Test::new();

    let output = t.export();
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.completions("bash");
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_warren") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.completions("zsh");
    assert_success(&output);
    let out = stdout(&output);
    // Verify output contains zsh-specific syntax
    assert!(
        out.contains("#compdef") || out.contains("_warren"),
        "zsh completion should contain zsh-specific syntax"
    );
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    let output = t.completions("fish");
    assert_success(&output);
    let out = stdout(&output);
    // Verify output contains fish-specific syntax
    assert!(
        out.contains("complete") && out.contains("warren"),
        "fish completion should contain fish-specific syntax"
    );
}

#[test]
fn test_completions_powershell() {
    let t = Test::new();

    let output = t.completions("power-shell");
    assert_success(&output);
    let out = stdout(&output);
    // Verify output contains PowerShell-specific syntax
    assert!(
        out.contains("Register-ArgumentCompleter") || out.contains("param"),
        "powershell completion should contain PowerShell-specific syntax"
    );
}
