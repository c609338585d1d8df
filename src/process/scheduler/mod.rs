/*!
 * CPU Scheduler
 * Selection policies, the Round-Robin rotation queue and the run loop
 */

pub mod engine;
pub mod operations;
pub mod policy;
pub mod rotation;
pub mod stats;

pub use engine::{CycleEvent, Engine, EngineState, HaltReason, RunReport};
pub use operations::{
    select_fifo, select_highest_priority, select_round_robin, select_shortest_remaining,
};
pub use policy::SchedulingPolicy;
pub use rotation::RotationQueue;
pub use stats::SchedulerStats;
