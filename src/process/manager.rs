/*!
 * Process Management
 * Session facade: creation, control operations, runs and metrics
 */

use super::metrics::{self, MetricsRow};
use super::scheduler::{Engine, EngineState, RunReport, SchedulerStats, SchedulingPolicy};
use super::table::ProcessTable;
use super::types::{Process, ProcessSpec, ProcessState};
use crate::config::SimConfig;
use crate::core::clock::Clock;
use crate::core::errors::{ProcessResult, SchedulerResult};
use crate::core::types::{CpuUnits, MemorySize, Pid, Priority};
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything a session mutates, guarded together
struct Session {
    table: ProcessTable,
    engine: Engine,
}

/// Cloneable handle to one simulation session
///
/// The process table, rotation queue and engine sit behind a single mutex, so
/// control operations and runs from concurrent callers are serialised. A run
/// holds the lock until it halts.
#[derive(Clone)]
pub struct ProcessManager {
    session: Arc<Mutex<Session>>,
    clock: Arc<dyn Clock>,
    config: Arc<SimConfig>,
}

/// Builder for ProcessManager
pub struct ProcessManagerBuilder {
    config: SimConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl ProcessManagerBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            clock: None,
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the clock selected by the configuration
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> ProcessManager {
        let clock = self.clock.unwrap_or_else(|| self.config.clock.build());
        info!(
            "Process manager initialized (clock: {:?}, defaults: cpu={}, mem={}, prio={})",
            self.config.clock,
            self.config.default_demand,
            self.config.default_memory,
            self.config.default_priority
        );

        ProcessManager {
            session: Arc::new(Mutex::new(Session {
                table: ProcessTable::new(),
                engine: Engine::new(),
            })),
            clock,
            config: Arc::new(self.config),
        }
    }
}

impl Default for ProcessManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessManager {
    /// Session with default configuration and a logical clock
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ProcessManagerBuilder {
        ProcessManagerBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Creation request pre-filled with the configured defaults
    pub fn spec(&self, name: impl Into<String>) -> ProcessSpec {
        ProcessSpec::new(name)
            .with_demand(self.config.default_demand)
            .with_memory(self.config.default_memory)
            .with_priority(self.config.default_priority)
    }

    /// Create a process. A demand below 1 is raised to 1.
    pub fn create_process(
        &self,
        name: impl Into<String>,
        cpu_demand: CpuUnits,
        memory: MemorySize,
        priority: Priority,
    ) -> Process {
        self.spawn(
            ProcessSpec::new(name)
                .with_demand(cpu_demand)
                .with_memory(memory)
                .with_priority(priority),
        )
    }

    /// Create a process from a prepared request
    pub fn spawn(&self, spec: ProcessSpec) -> Process {
        let mut session = self.session.lock();
        session.table.create(spec, self.clock.now()).clone()
    }

    /// Snapshot of one process; `None` when the pid is unknown
    pub fn find_process(&self, pid: Pid) -> Option<Process> {
        self.session.lock().table.find(pid).cloned()
    }

    /// Exclude a process from selection
    ///
    /// Blocking an already Blocked process succeeds without change.
    pub fn block(&self, pid: Pid) -> ProcessResult<()> {
        self.control(pid, ProcessState::Blocked, "blocked")
    }

    /// Return a Blocked process to Ready
    pub fn unblock(&self, pid: Pid) -> ProcessResult<()> {
        self.control(pid, ProcessState::Ready, "unblocked")
    }

    /// Terminate a process: remaining demand drops to 0 and completion is stamped now
    pub fn kill(&self, pid: Pid) -> ProcessResult<()> {
        self.control(pid, ProcessState::Finished, "killed")
    }

    fn control(&self, pid: Pid, to: ProcessState, verb: &str) -> ProcessResult<()> {
        let mut session = self.session.lock();
        match session.table.transition(pid, to, self.clock.now()) {
            Ok(_) => {
                info!("Process {} {}", pid, verb);
                Ok(())
            }
            Err(e) => {
                warn!("Process {} not {}: {}", pid, verb, e);
                Err(e)
            }
        }
    }

    /// Snapshot of every process in creation order
    pub fn list_processes(&self) -> Vec<Process> {
        self.session.lock().table.list_all().to_vec()
    }

    /// Run to a halt with the named policy (`fifo`, `sjf`, `prio`, `rr`)
    pub fn run(&self, policy_name: &str) -> SchedulerResult<RunReport> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session
            .engine
            .run_named(&mut session.table, policy_name, &*self.clock)
    }

    /// Run to a halt with an already parsed policy
    pub fn run_policy(&self, policy: SchedulingPolicy) -> SchedulerResult<RunReport> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.engine.run(&mut session.table, policy, &*self.clock)
    }

    /// Per-process turnaround and waiting time
    pub fn metrics(&self) -> Vec<MetricsRow> {
        metrics::report(&self.session.lock().table)
    }

    /// Cumulative run statistics
    pub fn stats(&self) -> SchedulerStats {
        self.session.lock().engine.stats().clone()
    }

    /// Engine state after the most recent run (`Idle` before the first)
    pub fn engine_state(&self) -> EngineState {
        self.session.lock().engine.state()
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}
