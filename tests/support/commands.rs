//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a warren command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - All WARREN_* variables cleared, so ambient credentials or scope
    ///   overrides on the developer's machine cannot leak into tests
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("warren").expect("failed to find warren binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env_remove("WARREN_TOKEN");
        cmd.env_remove("WARREN_SERVICE_TOKEN");
        cmd.env_remove("WARREN_BASE_URL");
        cmd.env_remove("WARREN_ENVIRONMENT");
        cmd.env_remove("WARREN_PATH");
        cmd.env_remove("WARREN_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `warren init` command.
    pub fn init_cmd(&self, url: &str) -> Output {
        self.cmd()
            .args(["init", "--url", url])
            .output()
            .expect("failed to run warren init")
    }

    /// Shortcut for `warren get` command.
    pub fn get(&self, key: &str) -> Output {
        self.cmd()
            .args(["get", key])
            .output()
            .expect("failed to run warren get")
    }

    /// Shortcut for `warren list` command.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run warren list")
    }

    /// Shortcut for `warren list --json` command.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run warren list --json")
    }

    /// Shortcut for `warren export` command.
    pub fn export(&self) -> Output {
        self.cmd()
            .arg("export")
            .output()
            .expect("failed to run warren export")
    }

    /// Shortcut for `warren export --format <format>` command.
    pub fn export_format(&self, format: &str) -> Output {
        self.cmd()
            .args(["export", "--format", format])
            .output()
            .expect("failed to run warren export --format")
    }

    /// Shortcut for `warren status` command.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run warren status")
    }

    /// Shortcut for `warren completions` command.
    pub fn completions(&self, shell: &str) -> Output {
        self.cmd()
            .args(["completions", shell])
            .output()
            .expect("failed to run warren completions")
    }

    /// Shortcut for `warren run` command.
    pub fn run(&self, command: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("run").arg("--");
        for arg in command {
            cmd.arg(arg);
        }
        cmd.output().expect("failed to run warren run")
    }
}
