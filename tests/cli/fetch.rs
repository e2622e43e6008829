//! Tests for credential and store failure paths of `get`, `list`, and `export`.
//!
//! These tests never reach a real store: they exercise everything up to the
//! first request, plus the error path when the store is unreachable.

use crate::support::*;

#[test]
fn test_list_without_credential_fails_with_hint() {
    let t = Test::init();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "no credential");
    // The credential hint lands on stdout
    assert_stdout_contains(&output, "WARREN_TOKEN");
}

#[test]
fn test_get_without_credential_fails() {
    let t = Test::init();

    let output = t.get("DATABASE_URL");
    assert_failure(&output);
    assert_stderr_contains(&output, "no credential");
}

#[test]
fn test_export_without_credential_fails() {
    let t = Test::init();

    let output = t.export();
    assert_failure(&output);
    assert_stderr_contains(&output, "no credential");
}

#[test]
fn test_list_with_malformed_service_token_fails() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_SERVICE_TOKEN", "not-a-service-token")
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed service token");
}

#[test]
fn test_list_with_short_service_token_fails() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("WARREN_SERVICE_TOKEN", "st.id.secret")
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed service token");
}

#[test]
fn test_list_with_unreachable_store_fails() {
    let t = Test::init_unreachable();

    let output = t
        .cmd()
        .env("WARREN_TOKEN", "some-token")
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
}

#[test]
fn test_get_with_unreachable_store_fails() {
    let t = Test::init_unreachable();

    let output = t
        .cmd()
        .env("WARREN_TOKEN", "some-token")
        .args(["get", "DATABASE_URL"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
}

#[test]
fn test_service_token_source_with_unreachable_store_fails() {
    let t = Test::init_unreachable();

    // Well-formed token; opening the source needs the store, which is down
    let output = t
        .cmd()
        .env("WARREN_SERVICE_TOKEN", "st.id.secret.material")
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
}

#[test]
fn test_export_rejects_unknown_format() {
    let t = Test::init();

    let output = t.export_format("yaml");
    assert_failure(&output);
}

#[test]
fn test_base_url_env_overrides_config_file() {
    let t = Test::init();

    // Config points at a reachable-looking URL; the env override points at a
    // dead port, proving the override is what gets used
    let output = t
        .cmd()
        .env("WARREN_TOKEN", "some-token")
        .env("WARREN_BASE_URL", UNREACHABLE_STORE_URL)
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
}
