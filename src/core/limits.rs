/*!
 * Simulator Limits and Defaults
 *
 * Centralized location for creation defaults and the ranges the shell
 * draws from when a creation request leaves parameters out.
 */

use super::types::{CpuUnits, MemorySize, Pid, Priority};
use std::ops::RangeInclusive;

// =============================================================================
// PROCESS DEFAULTS
// =============================================================================

/// First identifier handed out by a fresh process table
pub const FIRST_PID: Pid = 1;

/// Floor applied to total CPU demand at construction
/// Smaller caller-supplied values are raised to this silently
pub const MIN_CPU_DEMAND: CpuUnits = 1;

/// CPU demand used when a creation request does not name one
pub const DEFAULT_CPU_DEMAND: CpuUnits = 5;

/// Memory footprint used when a creation request does not name one
pub const DEFAULT_MEMORY: MemorySize = 100;

/// Priority used when a creation request does not name one
pub const DEFAULT_PRIORITY: Priority = 3;

// =============================================================================
// RANDOM PARAMETER RANGES (shell convenience)
// =============================================================================

/// CPU demand drawn for `create <name>` without explicit demand
pub const RANDOM_DEMAND: RangeInclusive<CpuUnits> = 3..=8;

/// Memory drawn for `create <name>` without explicit memory
pub const RANDOM_MEMORY: RangeInclusive<MemorySize> = 50..=200;

/// Priority drawn for `create <name>` without explicit priority
pub const RANDOM_PRIORITY: RangeInclusive<Priority> = 1..=5;
