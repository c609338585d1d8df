/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use crate::process::scheduler::CycleEvent;
use crate::process::types::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Common result type for session operations
pub type SimResult<T> = Result<T, SimError>;

/// Process control errors
///
/// All variants are recoverable: the table is left untouched when one is returned.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("Use `list` to see the identifiers of existing processes.")
    )]
    NotFound(Pid),

    #[error("Process {0} is already finished")]
    #[diagnostic(
        code(process::already_finished),
        help("Finished processes keep their final state; create a new process instead.")
    )]
    AlreadyFinished(Pid),

    #[error("Process {pid}: invalid state transition {from} -> {to}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Only Blocked processes can be unblocked.")
    )]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Scheduler and engine errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use one of: fifo, sjf, prio, rr.")
    )]
    InvalidPolicy(String),

    /// Fatal halt; `trace` holds the cycles executed before it
    #[error("Scheduler invariant violated: {detail}")]
    #[diagnostic(
        code(scheduler::invariant_violation),
        help("The run was halted. Ready processes exist that the active policy cannot reach.")
    )]
    InvariantViolation {
        detail: String,
        trace: Vec<CycleEvent>,
    },
}

impl SchedulerError {
    /// Cycles that ran before the error; empty unless the run was halted midway
    #[must_use]
    pub fn executed(&self) -> &[CycleEvent] {
        match self {
            SchedulerError::InvariantViolation { trace, .. } => trace.as_slice(),
            SchedulerError::InvalidPolicy(_) => &[],
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that SCHEDSIM_CONFIG points at a readable JSON file.")
    )]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    #[diagnostic(code(config::parse_failed))]
    ParseFailed(String),

    #[error("Unknown clock kind: {0}")]
    #[diagnostic(code(config::unknown_clock), help("Use `logical` or `wall`."))]
    UnknownClock(String),

    #[error("Invalid {name} range: {min} > {max}")]
    #[diagnostic(code(config::invalid_range))]
    InvalidRange { name: String, min: i64, max: i64 },

    #[error("Invalid seed: {0}")]
    #[diagnostic(code(config::invalid_seed))]
    InvalidSeed(String),
}

/// Unified session error
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Config error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    /// True when the error leaves the session usable
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            SimError::Scheduler(SchedulerError::InvariantViolation { .. })
        )
    }
}
