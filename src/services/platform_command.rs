use std::process::Command;

use tracing::{debug, info};

use crate::domain::{AppError, CommandInvocation, CommandResult};
use crate::ports::PlatformPort;

/// Adapter that executes invocations against the real `tw` binary.
///
/// The binary is resolved from `PATH`. Global passthrough arguments (from
/// `--cli`) are inserted before the subcommand; `-o json` is added when the
/// run is in JSON mode or the invocation requires parseable output.
#[derive(Debug, Clone)]
pub struct PlatformCliAdapter {
    binary: String,
    global_args: Vec<String>,
    json: bool,
    dry_run: bool,
}

impl PlatformCliAdapter {
    pub fn new(global_args: Vec<String>, json: bool, dry_run: bool) -> Self {
        Self { binary: "tw".to_string(), global_args, json, dry_run }
    }
}

impl PlatformPort for PlatformCliAdapter {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, AppError> {
        let rendered = self.rendered(invocation);
        if self.dry_run {
            info!("DRYRUN: Running command: {rendered}");
            return Ok(CommandResult::default());
        }
        debug!("Running command: {rendered}");

        let mut command = Command::new(&self.binary);
        command.args(&self.global_args);
        if self.json || invocation.json_output {
            command.args(["-o", "json"]);
        }
        command.args(invocation.argv());

        let output = command.output().map_err(|e| AppError::Command {
            command: rendered.clone(),
            exit_code: -1,
            stderr: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        if exit_code != 0 {
            return Err(classify_failure(rendered, exit_code, stderr));
        }
        Ok(CommandResult { stdout, stderr, exit_code })
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn rendered(&self, invocation: &CommandInvocation) -> String {
        invocation.rendered(&self.binary, &self.global_args, self.json)
    }
}

/// Map a non-zero exit to a typed error based on recognized stderr
/// diagnostics.
fn classify_failure(command: String, exit_code: i32, stderr: String) -> AppError {
    let lower = stderr.to_lowercase();
    if lower.contains("already exists") {
        AppError::ResourceExists(stderr)
    } else if lower.contains("not found") || lower.contains("does not exist") {
        AppError::ResourceNotFound(stderr)
    } else {
        AppError::Command { command, exit_code, stderr }
    }
}
