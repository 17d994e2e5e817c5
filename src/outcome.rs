//! Task-level and invocation-level outcomes.
//!
//! # Invariants
//! - `Skipped` is only produced by the path-acquisition gate, never after a
//!   process has been spawned
//! - `Failed` carries the combined output of every failing invocation, in
//!   input-path order

use serde::{Deserialize, Serialize};

/// Result of one finished task run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskOutcome {
    /// No candidate paths applied to this run; nothing was executed
    Skipped,
    /// Every invocation succeeded
    Passed,
    /// At least one invocation failed
    Failed {
        /// Combined diagnostic output of all failing invocations
        output: String,
    },
}

impl TaskOutcome {
    /// Create a failed outcome from diagnostic text.
    pub fn failed(output: impl Into<String>) -> Self {
        Self::Failed {
            output: output.into(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Diagnostic text, present only on failed outcomes.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output } => Some(output),
            _ => None,
        }
    }

    /// Fold per-invocation records into one task outcome.
    ///
    /// Passes only if every record succeeded (vacuously true for zero
    /// records); otherwise fails with the concatenation of every failing
    /// record's output, preserving record order.
    pub fn fold<'a>(records: impl IntoIterator<Item = &'a InvocationRecord>) -> Self {
        let mut combined = String::new();
        let mut any_failed = false;
        for record in records {
            if record.succeeded() {
                continue;
            }
            any_failed = true;
            if let Some(output) = record.output() {
                combined.push_str(output);
            }
        }
        if any_failed {
            Self::Failed { output: combined }
        } else {
            Self::Passed
        }
    }
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Passed => write!(f, "passed"),
            Self::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// Record of one finished process invocation.
///
/// Diagnostic output is captured only for failures; successful invocations
/// carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    succeeded: bool,
    output: Option<String>,
}

impl InvocationRecord {
    /// Record a successful invocation.
    pub fn passed() -> Self {
        Self {
            succeeded: true,
            output: None,
        }
    }

    /// Record a failed invocation with its formatted diagnostic output.
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: Some(output.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}
