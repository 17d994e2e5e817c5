//! One invocation per candidate path.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::{validate_name, CheckTask, TaskError, TaskOptions};
use crate::args::ProcessArguments;
use crate::candidates::Candidates;
use crate::format::OutputFormatter;
use crate::outcome::{InvocationRecord, TaskOutcome};
use crate::process::ProcessExecutor;
use crate::resolve::PathResolver;

/// Builds the argument list for one candidate path.
///
/// Each concrete task supplies its own mapping ("lint this file",
/// "typecheck this file"); closures implement the trait directly.
pub trait ArgumentsFromPath: Send + Sync {
    fn build_arguments_from_path(&self, path: &Path) -> ProcessArguments;
}

impl<F> ArgumentsFromPath for F
where
    F: Fn(&Path) -> ProcessArguments + Send + Sync,
{
    fn build_arguments_from_path(&self, path: &Path) -> ProcessArguments {
        self(path)
    }
}

/// Runs the configured tool once per candidate path and folds the results
/// into one outcome.
///
/// Paths are processed strictly in resolver order, one invocation awaited
/// to completion at a time, so aggregated diagnostics line up with the
/// input. A failing path never aborts the loop: every remaining path is
/// still checked and every failure is reported in a single run.
pub struct SinglePathTask {
    name: String,
    options: TaskOptions,
    resolver: Box<dyn PathResolver>,
    arguments: Box<dyn ArgumentsFromPath>,
    executor: Arc<dyn ProcessExecutor>,
    formatter: Arc<dyn OutputFormatter>,
}

impl SinglePathTask {
    /// # Errors
    /// Rejects an empty task name or program name before anything runs.
    pub fn new(
        name: impl Into<String>,
        options: TaskOptions,
        resolver: Box<dyn PathResolver>,
        arguments: Box<dyn ArgumentsFromPath>,
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
            arguments,
            executor,
            formatter,
        })
    }
}

#[async_trait]
impl CheckTask for SinglePathTask {
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

        tracing::info!("{}: checking {} path(s)", self.name, paths.len());
        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            let arguments = self.arguments.build_arguments_from_path(path);
            let invocation = self.options.invocation(arguments);
            let execution = self.executor.execute(&invocation).await?;
            if execution.succeeded {
                records.push(InvocationRecord::passed());
            } else {
                tracing::warn!("{}: {} failed", self.name, path.display());
                records.push(InvocationRecord::failed(self.formatter.format(&execution)));
            }
        }

        Ok(TaskOutcome::fold(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ProcessExecution, ProcessInvocation};
    use crate::resolve::StaticPaths;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Executor double: fails any invocation whose final argument is listed
    /// in `failures`, answering with the scripted stderr.
    #[derive(Default)]
    struct ScriptedExecutor {
        calls: AtomicUsize,
        failures: HashMap<String, String>,
    }

    impl ScriptedExecutor {
        fn failing_on<const N: usize>(failures: [(&str, &str); N]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures: failures
                    .into_iter()
                    .map(|(path, stderr)| (path.to_string(), stderr.to_string()))
                    .collect(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProcessExecutor for ScriptedExecutor {
        async fn execute(
            &self,
            invocation: &ProcessInvocation,
        ) -> anyhow::Result<ProcessExecution> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let target = invocation
                .arguments
                .as_slice()
                .last()
                .cloned()
                .unwrap_or_default();
            match self.failures.get(&target) {
                Some(stderr) => Ok(ProcessExecution::failed_for(
                    invocation.command_line(),
                    1,
                    stderr.clone(),
                )),
                None => Ok(ProcessExecution::succeeded_for(invocation.command_line())),
            }
        }
    }

    /// Resolver double that always reports an already-decided outcome.
    struct PreDecided(TaskOutcome);

    #[async_trait]
    impl PathResolver for PreDecided {
        async fn resolve(&self) -> anyhow::Result<Candidates> {
            Ok(Candidates::Resolved(self.0.clone()))
        }
    }

    fn path_argument(path: &Path) -> ProcessArguments {
        let mut args = ProcessArguments::new();
        args.add_path(path);
        args
    }

    fn stderr_formatter() -> Arc<dyn OutputFormatter> {
        Arc::new(|execution: &ProcessExecution| execution.stderr.clone())
    }

    fn lint_task(
        resolver: Box<dyn PathResolver>,
        executor: Arc<dyn ProcessExecutor>,
    ) -> SinglePathTask {
        SinglePathTask::new(
            "lint",
            TaskOptions::new("lint-tool"),
            resolver,
            Box::new(path_argument),
            executor,
            stderr_formatter(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn skips_without_invoking_when_nothing_matched() {
        let executor = Arc::new(ScriptedExecutor::default());
        let task = lint_task(Box::new(StaticPaths::default()), executor.clone());

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Skipped);
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn pre_decided_outcome_is_returned_unchanged() {
        let executor = Arc::new(ScriptedExecutor::default());
        let decided = TaskOutcome::failed("decided elsewhere");
        let task = lint_task(Box::new(PreDecided(decided.clone())), executor.clone());

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, decided);
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn passes_when_the_only_invocation_succeeds() {
        let executor = Arc::new(ScriptedExecutor::default());
        let task = lint_task(Box::new(StaticPaths::new(["a.php"])), executor.clone());

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Passed);
        assert_eq!(executor.calls(), 1);
    }

    #[tokio::test]
    async fn passes_when_every_invocation_succeeds() {
        let executor = Arc::new(ScriptedExecutor::default());
        let task = lint_task(
            Box::new(StaticPaths::new(["a.php", "b.php", "lib/"])),
            executor.clone(),
        );

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Passed);
        assert_eq!(executor.calls(), 3);
    }

    #[tokio::test]
    async fn concatenates_all_failures_in_input_order() {
        let executor = Arc::new(ScriptedExecutor::failing_on([
            ("a.php", "E1"),
            ("b.php", "E2"),
        ]));
        let task = lint_task(
            Box::new(StaticPaths::new(["a.php", "b.php"])),
            executor.clone(),
        );

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, TaskOutcome::failed("E1E2"));
        assert_eq!(executor.calls(), 2);
    }

    #[tokio::test]
    async fn a_failure_never_aborts_the_remaining_paths() {
        let executor = Arc::new(ScriptedExecutor::failing_on([("b.php", "E2")]));
        let task = lint_task(
            Box::new(StaticPaths::new(["a.php", "b.php", "c.php"])),
            executor.clone(),
        );

        let outcome = task.run().await.unwrap();
        assert_eq!(outcome, TaskOutcome::failed("E2"));
        assert_eq!(executor.calls(), 3);
    }

    #[tokio::test]
    async fn repeated_runs_yield_the_same_outcome() {
        let executor = Arc::new(ScriptedExecutor::failing_on([("a.php", "E1")]));
        let task = lint_task(
            Box::new(StaticPaths::new(["a.php", "b.php"])),
            executor.clone(),
        );

        let first = task.run().await.unwrap();
        let second = task.run().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(executor.calls(), 4);
    }

    #[test]
    fn construction_rejects_invalid_wiring() {
        let bad_name = SinglePathTask::new(
            "",
            TaskOptions::new("lint-tool"),
            Box::new(StaticPaths::default()),
            Box::new(path_argument),
            Arc::new(ScriptedExecutor::default()),
            stderr_formatter(),
        );
        assert!(matches!(bad_name, Err(TaskError::EmptyName)));

        let bad_program = SinglePathTask::new(
            "lint",
            TaskOptions::new(""),
            Box::new(StaticPaths::default()),
            Box::new(path_argument),
            Arc::new(ScriptedExecutor::default()),
            stderr_formatter(),
        );
        assert!(matches!(bad_program, Err(TaskError::EmptyProgram)));
    }
}
