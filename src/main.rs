use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use platformkit::{AppError, OnExists, RunOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "platformkit")]
#[command(version)]
#[command(about = "Automate Seqera Platform resources from YAML definitions")]
struct Cli {
    /// YAML configuration files, directories to search, or '-' for stdin
    yaml: Vec<String>,

    /// Logging verbosity
    #[arg(short = 'l', long, default_value = "info")]
    log_level: LogLevel,

    /// Print platform connection details and exit
    #[arg(short, long)]
    info: bool,

    /// Emit one JSON record per processed resource on stdout
    #[arg(short, long)]
    json: bool,

    /// Print the commands that would run without executing them
    #[arg(short, long = "dryrun")]
    dryrun: bool,

    /// Delete the resources defined in the YAML instead of creating them
    #[arg(long)]
    delete: bool,

    /// Additional arguments passed through to the platform CLI, quoted
    /// (e.g. --cli="--insecure")
    #[arg(long = "cli")]
    cli: Vec<String>,

    /// Comma-separated block names to process (e.g. "teams,workspaces")
    #[arg(long)]
    targets: Option<String>,

    /// YAML file of environment variables to set before processing
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Override every block-level on_exists policy
    #[arg(long, value_name = "POLICY")]
    on_exists: Option<OnExistsArg>,

    /// Globally enable overwrite for all resources (deprecated; use
    /// --on-exists=overwrite)
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnExistsArg {
    Fail,
    Ignore,
    Overwrite,
}

impl From<OnExistsArg> for OnExists {
    fn from(arg: OnExistsArg) -> Self {
        match arg {
            OnExistsArg::Fail => OnExists::Fail,
            OnExistsArg::Ignore => OnExists::Ignore,
            OnExistsArg::Overwrite => OnExists::Overwrite,
        }
    }
}

/// Logs go to stderr so JSON records on stdout stay machine-readable.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let cli_args: Vec<String> =
        cli.cli.iter().flat_map(|chunk| chunk.split_whitespace().map(String::from)).collect();

    let on_exists = match (cli.on_exists, cli.overwrite) {
        (Some(policy), _) => Some(OnExists::from(policy)),
        (None, true) => {
            tracing::warn!(
                "The '--overwrite' flag is deprecated. Please use '--on-exists=overwrite' instead."
            );
            Some(OnExists::Overwrite)
        }
        (None, false) => None,
    };

    let result: Result<(), AppError> = if cli.info {
        platformkit::info(cli_args, cli.dryrun)
    } else {
        platformkit::run(RunOptions {
            yaml: cli.yaml,
            on_exists,
            dry_run: cli.dryrun,
            delete: cli.delete,
            json: cli.json,
            targets: cli.targets,
            env_file: cli.env_file,
            cli_args,
        })
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
