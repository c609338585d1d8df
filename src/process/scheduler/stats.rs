/*!
 * Scheduler Statistics
 * Cumulative counters across the runs of a session
 */

use super::engine::CycleEvent;
use super::policy::SchedulingPolicy;
use serde::Serialize;

/// Session-wide run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub runs: u64,
    pub total_cycles: u64,
    pub completions: u64,
    pub deadlocks: u64,
    pub invariant_violations: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_policy: Option<SchedulingPolicy>,
}

impl SchedulerStats {
    pub(super) fn record_run(&mut self, policy: SchedulingPolicy) {
        self.runs += 1;
        self.last_policy = Some(policy);
    }

    /// Count executed cycles, whether the run halted normally or not
    pub(super) fn record_cycles(&mut self, trace: &[CycleEvent]) {
        self.total_cycles += trace.len() as u64;
        self.completions += trace.iter().filter(|e| e.finished).count() as u64;
    }

    pub(super) fn record_deadlock(&mut self) {
        self.deadlocks += 1;
    }

    pub(super) fn record_violation(&mut self) {
        self.invariant_violations += 1;
    }
}
