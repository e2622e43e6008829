//! Tests for `warren status` command.

use crate::support::*;
use std::fs;

#[test]
fn test_status_shows_configured_scope() {
    let t = Test::init();

    let output = t.status();
    assert_success(&output);
    let out = stdout(&output);

    assert!(out.contains("Warren Status"));
    assert!(out.contains(".warren.toml"));
    assert!(out.contains(TEST_STORE_URL));
    assert!(out.contains("dev"));
}

#[test]
fn test_status_without_init_fails() {
    let t = Test::new();

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
    // The init hint lands on stdout
    assert_stdout_contains(&output, "warren init");
}

#[test]
fn test_status_with_base_url_from_env() {
    let t = Test::new();

    // No config file, but WARREN_BASE_URL is enough to work from
    let output = t
        .cmd()
        .env("WARREN_BASE_URL", TEST_STORE_URL)
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains(TEST_STORE_URL));
    // Config source is the environment, not a file
    assert!(!out.contains(".warren.toml"));
}

#[test]
fn test_status_environment_var_overrides_config() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_ENVIRONMENT", "prod")
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "prod");
}

#[test]
fn test_status_flag_overrides_environment_var() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_ENVIRONMENT", "qa")
        .args(["status", "--environment", "prod"])
        .output()
        .unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("prod"));
    assert!(!out.contains("qa"));
}

#[test]
fn test_status_path_flag_overrides_config() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["status", "--path", "/backend/api"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "/backend/api");
}

#[test]
fn test_status_reports_missing_credential() {
    let t = Test::init();

    let output = t.status();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("none"));
    assert!(out.contains("no credential"));
}

#[test]
fn test_status_reports_bearer_credential() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_TOKEN", "some-token")
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "bearer");
    // The token value itself must never be shown
    assert_stdout_excludes(&output, "some-token");
}

#[test]
fn test_status_reports_service_token_credential() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_SERVICE_TOKEN", "st.id.secret.material")
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "service token");
    assert_stdout_excludes(&output, "secret");
}

#[test]
fn test_status_service_token_wins_over_bearer() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_TOKEN", "bearer-token")
        .env("WARREN_SERVICE_TOKEN", "st.id.sec.mat")
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "service token");
}

#[test]
fn test_status_reports_malformed_service_token() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_SERVICE_TOKEN", "st.only-two-segments")
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("invalid"));
    assert!(out.contains("malformed service token"));
}

#[test]
fn test_status_with_corrupted_config_fails() {
    let t = Test::init();

    let config_path = t.dir.path().join(".warren.toml");
    fs::write(&config_path, "this is not valid toml {{{{").unwrap();

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "parse");
}
