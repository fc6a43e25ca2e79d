//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `golden` binary.
pub struct GoldenCommand {
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl GoldenCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--dir` option to the fixture directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Bytes fed to the command on stdin.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    ///
    /// The package config and update switch of the calling test run are
    /// hidden from the child.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("golden").expect("Failed to find golden binary");
        cmd.args(&self.args)
            .env_remove("CARGO_MANIFEST_DIR")
            .env_remove("GOLDEN_UPDATE")
            .env_remove("RUST_LOG");
        if let Some(stdin) = self.stdin {
            cmd.write_stdin(stdin);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn path(self, test: &str) -> Self {
        self.args(["path", test])
    }

    pub fn show(self, test: &str) -> Self {
        self.args(["show", test])
    }

    pub fn write(self, test: &str) -> Self {
        self.args(["write", test])
    }

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for GoldenCommand {
    fn default() -> Self {
        Self::new()
    }
}
