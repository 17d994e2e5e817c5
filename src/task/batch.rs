//! One invocation covering the whole candidate set.

use std::sync::Arc;

use async_trait::async_trait;

use super::{validate_name, CheckTask, TaskError, TaskOptions};
use crate::args::ProcessArguments;
use crate::candidates::{CandidatePath, Candidates};
use crate::format::OutputFormatter;
use crate::outcome::TaskOutcome;
use crate::process::ProcessExecutor;
use crate::resolve::PathResolver;

/// Builds one argument list covering every candidate path, for tools that
/// accept multiple targets in a single invocation.
///
/// Pure with respect to its input: order-preserving, no filtering, no
/// deduplication (callers supply an already-deduplicated, already-filtered
/// set), and total over an empty slice; implementers must not assume
/// non-emptiness even though the gate normally prevents that case.
pub trait MultiPathArgumentsBuilder: Send + Sync {
    fn build_arguments(&self, paths: &[CandidatePath]) -> ProcessArguments;
}

impl<F> MultiPathArgumentsBuilder for F
where
    F: Fn(&[CandidatePath]) -> ProcessArguments + Send + Sync,
{
    fn build_arguments(&self, paths: &[CandidatePath]) -> ProcessArguments {
        self(paths)
    }
}

/// Runs the configured tool exactly once over the full candidate set and
/// maps the single execution straight to an outcome; with one invocation
/// there is nothing to fold.
///
/// An empty, non-terminal candidate list is reported as skipped without
/// spawning anything: the gate exists to guarantee zero spawns on empty
/// input, and a check tool given no targets at all has nothing to say.
pub struct BatchTask {
    name: String,
    options: TaskOptions,
    resolver: Box<dyn PathResolver>,
    builder: Box<dyn MultiPathArgumentsBuilder>,
    executor: Arc<dyn ProcessExecutor>,
    formatter: Arc<dyn OutputFormatter>,
}

impl BatchTask {
    /// # Errors
    /// Rejects an empty task name or program name before anything runs.
    pub fn new(
        name: impl Into<String>,
        options: TaskOptions,
        resolver: Box<dyn PathResolver>,
        builder: Box<dyn MultiPathArgumentsBuilder>,
        executor: Arc<dyn ProcessExecutor>,
        formatter: Arc<dyn OutputFormatter>,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        validate_name(&name)?;
        options.validate()?;
        Ok(Self {
            name,
            options,
            resolver,
            builder,
            executor,
            formatter,
        })
    }
}

#[async_trait]
impl CheckTask for BatchTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> anyhow::Result<TaskOutcome> {
        let paths = match self.resolver.resolve().await? {
            Candidates::Resolved(outcome) => {
                tracing::debug!("{}: resolved without running: {}", self.name, outcome);
                return Ok(outcome);
            }
            Candidates::Paths(paths) => paths,
        };
        if paths.is_empty() {
            tracing::debug!("{}: no paths to check", self.name);
            return Ok(TaskOutcome::Skipped);
        }

        tracing::info!("{}: checking {} path(s) in one batch", self.name, paths.len());
        let arguments = self.builder.build_arguments(&paths);
        let invocation = self.options.invocation(arguments);
        let execution = self.executor.execute(&invocation).await?;
        if execution.succeeded {
            Ok(TaskOutcome::Passed)
        } else {
            tracing::warn!("{}: batch invocation failed", self.name);
            Ok(TaskOutcome::failed(self.formatter.format(&execution)))
        }
    }
}
