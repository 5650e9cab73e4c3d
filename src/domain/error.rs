use std::io;

use thiserror::Error;

/// Library-wide error type for platformkit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed YAML input.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration or input issue (missing keys, bad values, empty files).
    #[error("{0}")]
    Configuration(String),

    /// A YAML string referenced an environment variable that is not set.
    #[error("Environment variable '{0}' not found")]
    UnresolvedEnvVar(String),

    /// Two entries in the same block resolve to the same identifying name.
    #[error("Duplicate name '{name}' specified in the '{block}' block. Please specify a unique value.")]
    DuplicateName { block: String, name: String },

    /// Top-level YAML key is not a known resource block.
    #[error("Unrecognized resource block in YAML: '{0}'")]
    UnknownBlock(String),

    /// Create attempted on a resource that already exists with on_exists=fail.
    #[error("{0}")]
    ResourceExists(String),

    /// Delete or reference targets a resource that does not exist remotely.
    #[error("{0}")]
    ResourceNotFound(String),

    /// The platform CLI returned an unexpected non-zero exit.
    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    Command { command: String, exit_code: i32, stderr: String },

    /// on_exists=overwrite requested for a type that cannot be deleted.
    #[error("Resource type '{0}' has no deletion strategy; 'on_exists: overwrite' cannot be applied")]
    NoDeletionStrategy(String),
}
