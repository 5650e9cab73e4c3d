//! Shared testing utilities for platformkit CLI tests.
//!
//! The real platform CLI is replaced by a generated shell script on `PATH`
//! that records every invocation and replays canned responses.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// One canned response of the fake platform CLI: any invocation whose
/// argument string contains `pattern` produces this output and exit code.
#[allow(dead_code)]
pub struct TwCase {
    pub pattern: &'static str,
    pub stdout: &'static str,
    pub stderr: &'static str,
    pub exit: i32,
}

#[allow(dead_code)]
impl TwCase {
    pub fn ok(pattern: &'static str, stdout: &'static str) -> Self {
        Self { pattern, stdout, stderr: "", exit: 0 }
    }

    pub fn fail(pattern: &'static str, stderr: &'static str, exit: i32) -> Self {
        Self { pattern, stdout: "", stderr, exit }
    }
}

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(&bin_dir).expect("Failed to create test bin directory");

        Self { root, work_dir, bin_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Write a YAML configuration file into the work directory.
    pub fn write_yaml(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write YAML fixture");
        path
    }

    /// Install a fake `tw` that logs its arguments and replays the first
    /// matching case. Unmatched invocations succeed with empty output.
    pub fn install_tw(&self, cases: &[TwCase]) {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("printf '%s\\n' \"$*\" >> '{}'\n", self.calls_log().display()));
        script.push_str("case \" $* \" in\n");
        for case in cases {
            script.push_str(&format!("  *'{}'*)\n", case.pattern));
            if !case.stdout.is_empty() {
                script.push_str(&format!("    printf '%s\\n' '{}'\n", case.stdout));
            }
            if !case.stderr.is_empty() {
                script.push_str(&format!("    printf '%s\\n' '{}' >&2\n", case.stderr));
            }
            script.push_str(&format!("    exit {}\n    ;;\n", case.exit));
        }
        script.push_str("esac\nexit 0\n");
        self.install_tw_script(&script);
    }

    /// Install a fake `tw` from a raw shell script body.
    pub fn install_tw_script(&self, script: &str) {
        let path = self.bin_dir.join("tw");
        fs::write(&path, script).expect("Failed to write fake tw script");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake tw executable");
        }
    }

    pub fn calls_log(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    /// Every fake `tw` invocation so far, one argument string per element.
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.calls_log()) {
            Ok(text) => text.lines().map(String::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Build a command for invoking the compiled `platformkit` binary with
    /// the fake `tw` first on `PATH`.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("platformkit").expect("Failed to locate platformkit binary");
        let path = match std::env::var("PATH") {
            Ok(existing) => format!("{}:{existing}", self.bin_dir.display()),
            Err(_) => self.bin_dir.display().to_string(),
        };
        cmd.current_dir(&self.work_dir).env("PATH", path);
        cmd
    }
}
