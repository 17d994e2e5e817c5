//! Task surface: the host-facing entry point, shared invocation options,
//! and the two execution strategies.

pub mod batch;
pub mod single_path;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::args::ProcessArguments;
use crate::outcome::TaskOutcome;
use crate::process::ProcessInvocation;

/// One configured check the host framework executes as part of a run.
///
/// The host calls [`run`](CheckTask::run) once per configured task per run
/// and uses the outcome discriminant plus any diagnostic text to decide
/// overall run status and console reporting.
#[async_trait]
pub trait CheckTask: Send + Sync {
    fn name(&self) -> &str;

    /// Execute the task to completion.
    ///
    /// # Errors
    /// `Err` is reserved for collaborator-level faults (the resolver or the
    /// executor hit an environment problem); a tool reporting findings is a
    /// `Failed` outcome, not an error.
    async fn run(&self) -> anyhow::Result<TaskOutcome>;
}

/// Invocation shape shared by both strategies, wired straight from host
/// task configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOptions {
    /// Program to execute, resolved via `PATH` unless absolute
    pub program: String,

    /// Working directory for every invocation; inherited when absent
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables layered over the inherited environment
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Per-invocation timeout in seconds; unlimited when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TaskOptions {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
            env: HashMap::new(),
            timeout_secs: None,
        }
    }

    /// Build the invocation for one set of arguments.
    pub fn invocation(&self, arguments: ProcessArguments) -> ProcessInvocation {
        ProcessInvocation {
            program: self.program.clone(),
            arguments,
            working_dir: self.working_dir.clone(),
            env: self.env.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), TaskError> {
        if self.program.trim().is_empty() {
            return Err(TaskError::EmptyProgram);
        }
        Ok(())
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), TaskError> {
    if name.trim().is_empty() {
        return Err(TaskError::EmptyName);
    }
    Ok(())
}

/// Errors surfaced when a task is constructed from invalid wiring.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Task program cannot be empty")]
    EmptyProgram,
}
