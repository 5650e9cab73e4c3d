use crate::domain::{AppError, CommandInvocation, CommandResult};

/// Boundary to the external platform CLI binary.
///
/// The real adapter spawns the `tw` subprocess; tests substitute a scripted
/// implementation.
pub trait PlatformPort {
    /// Execute one invocation, blocking until the subprocess completes.
    ///
    /// Non-zero exits are mapped to typed errors: stderr matching an
    /// "already exists" diagnostic becomes [`AppError::ResourceExists`], a
    /// "not found" diagnostic becomes [`AppError::ResourceNotFound`], and
    /// anything else becomes [`AppError::Command`] with the raw stderr.
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, AppError>;

    /// Whether this port prints commands instead of executing them.
    fn dry_run(&self) -> bool {
        false
    }

    /// Render the full command line for logs, reports, and dry-run output.
    fn rendered(&self, invocation: &CommandInvocation) -> String;
}
