/*!
 * Simulation Engine
 * Drives a run cycle by cycle until every process finishes or nothing is Ready
 */

use super::policy::SchedulingPolicy;
use super::stats::SchedulerStats;
use crate::core::clock::Clock;
use crate::core::errors::{ProcessError, SchedulerError, SchedulerResult};
use crate::core::types::{CpuUnits, Cycle, Pid};
use crate::process::table::ProcessTable;
use crate::process::types::ProcessState;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

/// Session-level engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No run has started yet
    Idle,
    /// Scanning the ready set and consulting the policy
    Selecting,
    /// Executing one unit on the selected process
    Cycling,
    /// Last run reached a halt condition
    Halted,
}

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HaltReason {
    /// Every process is Finished
    AllCompleted,
    /// Nothing is Ready but unfinished (Blocked) work remains
    NoReadyProcess { unfinished: Vec<Pid> },
}

impl HaltReason {
    #[must_use]
    pub fn is_deadlock(&self) -> bool {
        matches!(self, HaltReason::NoReadyProcess { .. })
    }
}

/// One executed cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CycleEvent {
    pub cycle: Cycle,
    pub pid: Pid,
    pub name: String,
    pub remaining: CpuUnits,
    pub finished: bool,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub policy: SchedulingPolicy,
    pub trace: Vec<CycleEvent>,
    pub halt: HaltReason,
}

impl RunReport {
    /// Number of cycles executed
    #[inline]
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.trace.len()
    }

    /// Pids in the order they received the CPU
    #[must_use]
    pub fn schedule(&self) -> Vec<Pid> {
        self.trace.iter().map(|e| e.pid).collect()
    }
}

/// Synchronous run loop
///
/// Holds no reference to the table between runs; every cycle re-scans the
/// ready set, so control operations applied between runs are observed.
#[derive(Debug, Clone)]
pub struct Engine {
    state: EngineState,
    stats: SchedulerStats,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            stats: SchedulerStats::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Cumulative counters across every run of this engine
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Parse `policy_name` and run. An unknown name fails before any mutation.
    pub fn run_named(
        &mut self,
        table: &mut ProcessTable,
        policy_name: &str,
        clock: &dyn Clock,
    ) -> SchedulerResult<RunReport> {
        let policy = policy_name.parse::<SchedulingPolicy>().map_err(|e| {
            warn!("Rejected run request: {}", e);
            e
        })?;
        self.run(table, policy, clock)
    }

    /// Execute cycles until a halt condition fires
    pub fn run(
        &mut self,
        table: &mut ProcessTable,
        policy: SchedulingPolicy,
        clock: &dyn Clock,
    ) -> SchedulerResult<RunReport> {
        let span = tracing::info_span!("run", policy = %policy);
        let _enter = span.enter();

        info!("Running simulation with {}", policy.as_str().to_uppercase());
        self.stats.record_run(policy);

        let mut trace = Vec::new();
        let halt = loop {
            self.state = EngineState::Selecting;

            if table.ready_set().is_empty() {
                let unfinished = table.unfinished();
                break if unfinished.is_empty() {
                    HaltReason::AllCompleted
                } else {
                    HaltReason::NoReadyProcess { unfinished }
                };
            }

            let Some(pid) = policy.select(table) else {
                let detail = format!(
                    "{} selected nothing while {} process(es) are Ready",
                    policy,
                    table.ready_set().len()
                );
                return Err(self.violation(detail, trace));
            };

            if policy == SchedulingPolicy::RoundRobin {
                table.rotation_mut().push_back(pid);
            }

            self.state = EngineState::Cycling;
            let event = match execute_unit(table, pid, trace.len() as Cycle + 1, clock) {
                Ok(event) => event,
                Err(e) => {
                    let detail = format!("lifecycle error during cycle: {}", e);
                    return Err(self.violation(detail, trace));
                }
            };
            debug!(
                "Cycle {}: running {} (pid {}) | remaining: {}",
                event.cycle, event.name, event.pid, event.remaining
            );
            if event.finished {
                info!("Process {} finished", event.pid);
            }
            trace.push(event);
        };

        self.state = EngineState::Halted;
        self.stats.record_cycles(&trace);
        if halt.is_deadlock() {
            self.stats.record_deadlock();
        }

        match &halt {
            HaltReason::AllCompleted => {
                info!("All processes finished after {} cycles", trace.len())
            }
            HaltReason::NoReadyProcess { unfinished } => warn!(
                "No Ready process after {} cycles; unfinished: {:?}",
                trace.len(),
                unfinished
            ),
        }

        Ok(RunReport {
            policy,
            trace,
            halt,
        })
    }

    /// Halt on a broken invariant, keeping the cycles that already ran
    fn violation(&mut self, detail: String, trace: Vec<CycleEvent>) -> SchedulerError {
        error!("Engine halted after {} cycles: {}", trace.len(), detail);
        self.state = EngineState::Halted;
        self.stats.record_cycles(&trace);
        self.stats.record_violation();
        SchedulerError::InvariantViolation { detail, trace }
    }
}

/// Ready -> Running, consume one unit, then Finished or back to Ready
fn execute_unit(
    table: &mut ProcessTable,
    pid: Pid,
    cycle: Cycle,
    clock: &dyn Clock,
) -> Result<CycleEvent, ProcessError> {
    table.transition(pid, ProcessState::Running, clock.now())?;

    let process = table.find_mut(pid).ok_or(ProcessError::NotFound(pid))?;
    let remaining = process.consume_unit();
    let name = process.name().to_string();
    clock.advance(1);

    let finished = remaining == 0;
    let next = if finished {
        ProcessState::Finished
    } else {
        ProcessState::Ready
    };
    table.transition(pid, next, clock.now())?;

    Ok(CycleEvent {
        cycle,
        pid,
        name,
        remaining,
        finished,
    })
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
