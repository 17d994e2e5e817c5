//! Process invocation model and the execution collaborator contract.

mod local;

pub use local::LocalProcessExecutor;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::args::ProcessArguments;

/// One external command to execute: program, arguments, and the execution
/// context the host supplied. Executed exactly once.
#[derive(Debug, Clone)]
pub struct ProcessInvocation {
    pub program: String,
    pub arguments: ProcessArguments,
    pub working_dir: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl ProcessInvocation {
    pub fn new(program: impl Into<String>, arguments: ProcessArguments) -> Self {
        Self {
            program: program.into(),
            arguments,
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
        }
    }

    /// Render the command line for logs and diagnostics.
    pub fn command_line(&self) -> String {
        if self.arguments.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.arguments)
        }
    }
}

/// What the executor observed for one finished invocation.
#[derive(Debug, Clone)]
pub struct ProcessExecution {
    /// Rendered command line, for diagnostics
    pub command: String,
    /// Whether the process exited successfully
    pub succeeded: bool,
    /// Exit code, absent when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessExecution {
    /// A successful execution with no captured output, for wiring tests.
    pub fn succeeded_for(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            succeeded: true,
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A failed execution carrying the tool's stderr.
    pub fn failed_for(command: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            succeeded: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Executes one invocation to completion.
///
/// A tool reporting problems is a failed [`ProcessExecution`], not an error;
/// `Err` is reserved for environment faults (the process could not be
/// launched or supervised at all) and is propagated to the host unmodified.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn execute(&self, invocation: &ProcessInvocation) -> anyhow::Result<ProcessExecution>;
}
