//! # checkrun
//!
//! Building blocks for check-runner tasks that shell out to external tools.
//!
//! A host framework supplies the candidate paths (or a pre-decided skip)
//! and wires a task from small collaborators; the task runs the tool once
//! per path (or once for the whole batch) and folds every result into a
//! single skip/pass/fail outcome.
//!
//! ## Task Flow
//! 1. Resolve candidate paths; a terminal outcome is returned untouched and
//!    nothing is spawned
//! 2. Build arguments per path, or once for the full set
//! 3. Execute one invocation at a time, awaited to completion, in input
//!    order
//! 4. Fold: pass only if every invocation passed, otherwise fail with every
//!    failure's formatted output concatenated in input order
//!
//! ## Modules
//! - `task`: host-facing entry point and the two execution strategies
//! - `process`: invocation model, executor contract, local executor
//! - `resolve`: path-acquisition collaborator
//! - `format`: diagnostics for failed invocations

pub mod args;
pub mod candidates;
pub mod format;
pub mod outcome;
pub mod process;
pub mod resolve;
pub mod task;

pub use args::ProcessArguments;
pub use candidates::{CandidatePath, Candidates};
pub use format::{OutputFormatter, RawOutputFormatter};
pub use outcome::{InvocationRecord, TaskOutcome};
pub use process::{LocalProcessExecutor, ProcessExecution, ProcessExecutor, ProcessInvocation};
pub use resolve::{PathResolver, StaticPaths};
pub use task::batch::{BatchTask, MultiPathArgumentsBuilder};
pub use task::single_path::{ArgumentsFromPath, SinglePathTask};
pub use task::{CheckTask, TaskError, TaskOptions};
