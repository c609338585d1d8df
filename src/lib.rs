/*!
 * Scheduling Simulator Library
 * Single-CPU process scheduling core exposed as a library
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod shell;

// Re-exports
pub use config::{ClockKind, SimConfig};
pub use crate::core::errors::*;
pub use crate::core::{Clock, LogicalClock, WallClock};
pub use monitoring::init_tracing;
pub use process::{
    CycleEvent, HaltReason, MetricsRow, Process, ProcessManager, ProcessSpec, ProcessState,
    ProcessTable, RunReport, SchedulingPolicy,
};
