//! Local process execution on top of the tokio process API.

use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use super::{ProcessExecution, ProcessExecutor, ProcessInvocation};

/// Runs invocations on the local machine.
///
/// Both output streams are captured and sanitized before any formatter sees
/// them. An invocation-level timeout, when present, is enforced here;
/// hitting it surfaces as an environment fault, not as a failed check.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProcessExecutor;

impl LocalProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessExecutor for LocalProcessExecutor {
    async fn execute(&self, invocation: &ProcessInvocation) -> anyhow::Result<ProcessExecution> {
        let command_line = invocation.command_line();
        tracing::info!("Executing {}", command_line);

        let mut command = Command::new(&invocation.program);
        command
            .args(invocation.arguments.as_slice())
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let output = match invocation.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .with_context(|| {
                    format!("{} timed out after {:?}", invocation.program, limit)
                })?,
            None => command.output().await,
        }
        .with_context(|| format!("failed to launch {}", invocation.program))?;

        let stdout = capture_text(&output.stdout);
        let stderr = capture_text(&output.stderr);
        let exit_code = output.status.code();
        let succeeded = output.status.success();

        tracing::debug!(
            "{} finished: exit={:?}, stdout_len={}, stderr_len={}",
            invocation.program,
            exit_code,
            stdout.len(),
            stderr.len()
        );
        if !succeeded {
            tracing::warn!("{} reported failure (exit {:?})", command_line, exit_code);
        }

        Ok(ProcessExecution {
            command: command_line,
            succeeded,
            exit_code,
            stdout,
            stderr,
        })
    }
}

/// Capture a raw output stream as text, dropping control characters that
/// would mangle aggregated diagnostics. Newlines and tabs survive.
fn capture_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c == '\n' || c == '\r' || c == '\t' || !c.is_control())
        .collect()
}
