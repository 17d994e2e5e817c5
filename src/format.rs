//! Diagnostic formatting for failed invocations.

use crate::process::ProcessExecution;

/// Turns one failed execution into the diagnostic text a user sees.
///
/// Called only for failures; successful executions produce no output.
pub trait OutputFormatter: Send + Sync {
    fn format(&self, execution: &ProcessExecution) -> String;
}

impl<F> OutputFormatter for F
where
    F: Fn(&ProcessExecution) -> String + Send + Sync,
{
    fn format(&self, execution: &ProcessExecution) -> String {
        self(execution)
    }
}

/// Default formatter: the failing command line, its exit code, and whatever
/// the tool wrote to either stream, truncated beyond a fixed ceiling.
#[derive(Debug, Clone)]
pub struct RawOutputFormatter {
    max_len: usize,
}

impl RawOutputFormatter {
    const DEFAULT_MAX_LEN: usize = 16 * 1024;

    pub fn new() -> Self {
        Self {
            max_len: Self::DEFAULT_MAX_LEN,
        }
    }

    /// Override the truncation ceiling (in bytes of formatted output).
    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for RawOutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for RawOutputFormatter {
    fn format(&self, execution: &ProcessExecution) -> String {
        let mut result = match execution.exit_code {
            Some(code) => format!("{} (exit code {})\n", execution.command, code),
            None => format!("{} (terminated by signal)\n", execution.command),
        };

        if !execution.stdout.is_empty() {
            result.push_str(&execution.stdout);
            if !execution.stdout.ends_with('\n') {
                result.push('\n');
            }
        }
        if !execution.stderr.is_empty() {
            result.push_str(&execution.stderr);
            if !execution.stderr.ends_with('\n') {
                result.push('\n');
            }
        }

        if result.len() > self.max_len {
            // Truncate on a char boundary so we never split multibyte output.
            let mut cut = self.max_len;
            while !result.is_char_boundary(cut) {
                cut -= 1;
            }
            result.truncate(cut);
            result.push_str("\n... [output truncated]\n");
        }

        result
    }
}
