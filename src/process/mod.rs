/*!
 * Process Module
 * Process entity, table, scheduling and metrics
 */

pub mod manager;
pub mod metrics;
pub mod scheduler;
pub mod table;
pub mod types;

// Re-export for convenience
pub use manager::{ProcessManager, ProcessManagerBuilder};
pub use metrics::MetricsRow;
pub use scheduler::{
    CycleEvent, Engine, EngineState, HaltReason, RotationQueue, RunReport, SchedulerStats,
    SchedulingPolicy,
};
pub use table::ProcessTable;
pub use types::{Process, ProcessSpec, ProcessState};
