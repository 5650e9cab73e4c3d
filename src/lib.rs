//! platformkit: automate Seqera Platform resource provisioning from YAML
//! definitions, driving the `tw` CLI.

pub mod app;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use app::AppContext;
use domain::CommandInvocation;
use ports::PlatformPort;
use services::PlatformCliAdapter;

pub use app::{ActionKind, ActionReport, RunOptions};
pub use domain::{AppError, OnExists};

/// Process every resource entry described by the run options.
pub fn run(options: RunOptions) -> Result<(), AppError> {
    let platform =
        PlatformCliAdapter::new(options.cli_args.clone(), options.json, options.dry_run);
    let context = AppContext::new(platform);
    app::execute(&context, &options)
}

/// Print the platform connection details (`tw info`), as a configuration
/// health check.
pub fn info(cli_args: Vec<String>, dry_run: bool) -> Result<(), AppError> {
    let platform = PlatformCliAdapter::new(cli_args, false, dry_run);
    let result = platform.run(&CommandInvocation::new("info", None, vec![]))?;
    if !dry_run {
        print!("{}", result.stdout);
    }
    Ok(())
}
