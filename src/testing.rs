//! Scripted in-memory platform for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::{AppError, CommandInvocation, CommandResult};
use crate::ports::PlatformPort;

/// A [`PlatformPort`] that replays queued responses and records every
/// invocation it receives. With the queue empty, calls succeed with an empty
/// result.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPlatform {
    responses: RefCell<VecDeque<Result<CommandResult, AppError>>>,
    calls: RefCell<Vec<CommandInvocation>>,
    dry_run: bool,
}

impl ScriptedPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A scripted platform that reports itself as dry-running.
    pub(crate) fn dry() -> Self {
        Self { dry_run: true, ..Self::default() }
    }

    /// Queue a successful response with the given stdout.
    pub(crate) fn push_stdout(&self, stdout: &str) {
        self.responses.borrow_mut().push_back(Ok(CommandResult {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        }));
    }

    /// Queue a failure.
    pub(crate) fn push_err(&self, err: AppError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    /// All invocations received so far, in order.
    pub(crate) fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.borrow().clone()
    }
}

impl PlatformPort for ScriptedPlatform {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandResult, AppError> {
        self.calls.borrow_mut().push(invocation.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandResult::default()))
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn rendered(&self, invocation: &CommandInvocation) -> String {
        invocation.rendered("tw", &[], false)
    }
}
