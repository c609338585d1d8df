/*!
 * Selection Operations
 * One pure selection function per policy
 *
 * Ties always go to the process that appears first in the table's
 * insertion-ordered ready view.
 */

use super::policy::SchedulingPolicy;
use super::rotation::RotationQueue;
use crate::core::types::Pid;
use crate::process::table::ProcessTable;
use crate::process::types::Process;
use log::debug;

impl SchedulingPolicy {
    /// Pick the next process to run, or `None` when nothing is selectable
    ///
    /// Process state is never touched here. Round-Robin consumes entries from
    /// the rotation queue; re-enqueueing the winner is the engine's job.
    pub fn select(&self, table: &mut ProcessTable) -> Option<Pid> {
        match self {
            Self::Fifo => select_fifo(&table.ready_set()),
            Self::ShortestJobFirst => select_shortest_remaining(&table.ready_set()),
            Self::Priority => select_highest_priority(&table.ready_set()),
            Self::RoundRobin => {
                let (processes, rotation) = table.split_rotation();
                select_round_robin(processes, rotation)
            }
        }
    }
}

/// First Ready process in table order
pub fn select_fifo(ready: &[&Process]) -> Option<Pid> {
    ready.first().map(|p| p.pid())
}

/// Ready process with the least *remaining* demand
///
/// Evaluated every cycle, so a shorter job that becomes Ready mid-run displaces
/// a longer one after the current unit. This is shortest-remaining-time-first,
/// not classic non-preemptive SJF.
pub fn select_shortest_remaining(ready: &[&Process]) -> Option<Pid> {
    // min_by_key keeps the first of equal keys
    ready
        .iter()
        .min_by_key(|p| p.remaining_demand())
        .map(|p| p.pid())
}

/// Ready process with the lowest priority value
pub fn select_highest_priority(ready: &[&Process]) -> Option<Pid> {
    ready.iter().min_by_key(|p| p.priority()).map(|p| p.pid())
}

/// Pop the rotation queue until a Ready process surfaces
///
/// Non-Ready entries are discarded, not re-enqueued: a process that is
/// unblocked after being discarded is no longer reachable by Round-Robin.
/// Returns `None` once the queue is exhausted, even if Ready processes exist
/// that were never in the queue.
pub fn select_round_robin(processes: &[Process], rotation: &mut RotationQueue) -> Option<Pid> {
    while let Some(pid) = rotation.pop_front() {
        match processes.iter().find(|p| p.pid() == pid) {
            Some(p) if p.is_ready() => return Some(pid),
            Some(p) => debug!("Round-robin discarded pid {} ({})", pid, p.state()),
            None => debug!("Round-robin discarded unknown pid {}", pid),
        }
    }
    None
}
