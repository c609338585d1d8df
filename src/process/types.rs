/*!
 * Process Types
 * The simulated process entity and its lifecycle states
 */

use crate::core::limits::{DEFAULT_CPU_DEMAND, DEFAULT_MEMORY, DEFAULT_PRIORITY, MIN_CPU_DEMAND};
use crate::core::types::{CpuUnits, MemorySize, Pid, Priority, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process lifecycle state
///
/// `Finished` is terminal: no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Eligible for selection
    Ready,
    /// Executing the current cycle
    Running,
    /// Excluded from selection until unblocked
    Blocked,
    /// Demand exhausted or killed
    Finished,
}

impl ProcessState {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Blocked => "Blocked",
            Self::Finished => "Finished",
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Whether the lifecycle allows moving from `self` to `to`
    ///
    /// Re-blocking a Blocked process is allowed and leaves it unchanged.
    #[must_use]
    pub const fn can_transition_to(&self, to: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (*self, to),
            (Ready, Running)
                | (Running, Ready)
                | (Ready, Blocked)
                | (Blocked, Blocked)
                | (Blocked, Ready)
                | (Ready, Finished)
                | (Running, Finished)
                | (Blocked, Finished)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parameters of a creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub cpu_demand: CpuUnits,
    pub memory: MemorySize,
    pub priority: Priority,
}

impl ProcessSpec {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpu_demand: DEFAULT_CPU_DEMAND,
            memory: DEFAULT_MEMORY,
            priority: DEFAULT_PRIORITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_demand(mut self, cpu_demand: CpuUnits) -> Self {
        self.cpu_demand = cpu_demand;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_memory(mut self, memory: MemorySize) -> Self {
        self.memory = memory;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Simulated process
///
/// Fields are read-only outside the crate. The table and the engine are the
/// only writers, which keeps `0 <= remaining <= total` and
/// "completion set iff Finished" true at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pid: Pid,
    name: String,
    total_demand: CpuUnits,
    remaining_demand: CpuUnits,
    memory: MemorySize,
    priority: Priority,
    state: ProcessState,
    created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<Timestamp>,
}

impl Process {
    /// Build a Ready process. A demand below 1 is raised to 1; this floor is
    /// intentional and never reported as an error.
    pub(crate) fn new(pid: Pid, spec: ProcessSpec, created_at: Timestamp) -> Self {
        let total_demand = spec.cpu_demand.max(MIN_CPU_DEMAND);
        Self {
            pid,
            name: spec.name,
            total_demand,
            remaining_demand: total_demand,
            memory: spec.memory,
            priority: spec.priority,
            state: ProcessState::Ready,
            created_at,
            completed_at: None,
        }
    }

    #[inline(always)]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn total_demand(&self) -> CpuUnits {
        self.total_demand
    }

    #[inline(always)]
    pub fn remaining_demand(&self) -> CpuUnits {
        self.remaining_demand
    }

    #[inline(always)]
    pub fn memory(&self) -> MemorySize {
        self.memory
    }

    #[inline(always)]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline(always)]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline(always)]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[inline(always)]
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Check if process is ready
    ///
    /// # Performance
    /// Hot path - evaluated for every process on every cycle
    #[inline(always)]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ProcessState::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self.state, ProcessState::Blocked)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, ProcessState::Finished)
    }

    /// Completion minus creation, once finished
    #[must_use]
    pub fn turnaround(&self) -> Option<u64> {
        self.completed_at
            .map(|done| done.saturating_sub(self.created_at))
    }

    /// Turnaround minus total demand, once finished
    ///
    /// Signed, since a wall clock can report a turnaround shorter than the
    /// demand expressed in cycles.
    #[must_use]
    pub fn waiting(&self) -> Option<i64> {
        self.turnaround()
            .map(|t| t as i64 - i64::from(self.total_demand))
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Consume one execution unit, returning what is left
    pub(crate) fn consume_unit(&mut self) -> CpuUnits {
        self.remaining_demand = self.remaining_demand.saturating_sub(1);
        self.remaining_demand
    }

    /// Move to Finished and stamp completion. A second call keeps the first stamp.
    pub(crate) fn finish(&mut self, at: Timestamp) {
        if self.completed_at.is_none() {
            self.completed_at = Some(at);
        }
        self.state = ProcessState::Finished;
    }

    /// Forced termination: drop the remaining demand and finish
    pub(crate) fn terminate(&mut self, at: Timestamp) {
        self.remaining_demand = 0;
        self.finish(at);
    }
}
