/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (assigned sequentially from 1, never reused)
pub type Pid = u32;

/// Priority level (lower value is more urgent)
pub type Priority = i32;

/// CPU execution units owed to or consumed by a process
pub type CpuUnits = u32;

/// Informational memory footprint of a process
pub type MemorySize = u32;

/// Clock reading; its unit depends on the active clock (cycles or milliseconds)
pub type Timestamp = u64;

/// 1-based index of an executed cycle within a run
pub type Cycle = u64;
