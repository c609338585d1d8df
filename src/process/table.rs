/*!
 * Process Table
 * Insertion-ordered process collection plus the Round-Robin rotation queue
 */

use super::scheduler::rotation::RotationQueue;
use super::types::{Process, ProcessSpec, ProcessState};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::FIRST_PID;
use crate::core::types::{Pid, Timestamp};
use log::{debug, info};

/// Owns every process of a session
///
/// Processes are never removed, so a finished process stays available to the
/// metrics reporter. Identifiers are assigned sequentially and never reused.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    processes: Vec<Process>,
    next_pid: Pid,
    rotation: RotationQueue,
}

impl ProcessTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            next_pid: FIRST_PID,
            rotation: RotationQueue::new(),
        }
    }

    /// Create a Ready process and enqueue it for Round-Robin. Never fails.
    pub fn create(&mut self, spec: ProcessSpec, created_at: Timestamp) -> &Process {
        let pid = self.next_pid;
        self.next_pid += 1;

        let process = Process::new(pid, spec, created_at);
        info!(
            "Process created: pid={}, name={}, cpu={}, mem={}, prio={}",
            pid,
            process.name(),
            process.total_demand(),
            process.memory(),
            process.priority()
        );

        self.processes.push(process);
        self.rotation.push_back(pid);
        &self.processes[self.processes.len() - 1]
    }

    /// Look up a process; `None` means "not found", not a failure
    ///
    /// Identifiers are dense and ascending, so the position is computed directly.
    #[must_use]
    pub fn find(&self, pid: Pid) -> Option<&Process> {
        self.index_of(pid).map(|idx| &self.processes[idx])
    }

    pub(crate) fn find_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        let idx = self.index_of(pid)?;
        Some(&mut self.processes[idx])
    }

    fn index_of(&self, pid: Pid) -> Option<usize> {
        let idx = pid.checked_sub(FIRST_PID)? as usize;
        (idx < self.processes.len()).then_some(idx)
    }

    /// All processes in insertion order, finished ones included
    #[inline]
    #[must_use]
    pub fn list_all(&self) -> &[Process] {
        &self.processes
    }

    /// Ready processes in insertion order
    #[must_use]
    pub fn ready_set(&self) -> Vec<&Process> {
        self.processes.iter().filter(|p| p.is_ready()).collect()
    }

    /// Identifiers of processes that are not Finished
    #[must_use]
    pub fn unfinished(&self) -> Vec<Pid> {
        self.processes
            .iter()
            .filter(|p| !p.is_finished())
            .map(Process::pid)
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> &RotationQueue {
        &self.rotation
    }

    /// Direct access to the rotation queue, bypassing creation-time seeding
    #[inline]
    pub fn rotation_mut(&mut self) -> &mut RotationQueue {
        &mut self.rotation
    }

    /// Processes and rotation queue borrowed together for Round-Robin selection
    pub(crate) fn split_rotation(&mut self) -> (&[Process], &mut RotationQueue) {
        (&self.processes, &mut self.rotation)
    }

    /// Move a process to `to`, enforcing the lifecycle rules
    ///
    /// Finished is never exited. Entering Finished zeroes the remaining demand
    /// and stamps completion with `now`. Returns the previous state.
    pub fn transition(
        &mut self,
        pid: Pid,
        to: ProcessState,
        now: Timestamp,
    ) -> ProcessResult<ProcessState> {
        let process = self.find_mut(pid).ok_or(ProcessError::NotFound(pid))?;
        let from = process.state();

        if from.is_terminal() {
            return Err(ProcessError::AlreadyFinished(pid));
        }
        if !from.can_transition_to(to) {
            return Err(ProcessError::InvalidStateTransition { pid, from, to });
        }

        if to == ProcessState::Finished {
            process.terminate(now);
        } else {
            process.set_state(to);
        }

        debug!("Process {} transitioned {} -> {}", pid, from, to);
        Ok(from)
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(demands: &[u32]) -> ProcessTable {
        let mut table = ProcessTable::new();
        for (i, &d) in demands.iter().enumerate() {
            table.create(ProcessSpec::new(format!("p{}", i + 1)).with_demand(d), 0);
        }
        table
    }

    #[test]
    fn test_sequential_pids() {
        let table = table_with(&[1, 2, 3]);
        let pids: Vec<Pid> = table.list_all().iter().map(Process::pid).collect();
        assert_eq!(pids, vec![1, 2, 3]);
        assert_eq!(table.rotation().iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_find() {
        let table = table_with(&[4, 5]);
        assert_eq!(table.find(2).map(Process::total_demand), Some(5));
        assert!(table.find(0).is_none());
        assert!(table.find(3).is_none());
    }

    #[test]
    fn test_ready_set_excludes_blocked_and_finished() {
        let mut table = table_with(&[1, 1, 1]);
        table.transition(1, ProcessState::Blocked, 0).unwrap();
        table.transition(3, ProcessState::Finished, 7).unwrap();

        let ready: Vec<Pid> = table.ready_set().iter().map(|p| p.pid()).collect();
        assert_eq!(ready, vec![2]);
        assert_eq!(table.unfinished(), vec![1, 2]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut table = table_with(&[3]);
        table.transition(1, ProcessState::Finished, 5).unwrap();

        let err = table.transition(1, ProcessState::Ready, 6).unwrap_err();
        assert_eq!(err, ProcessError::AlreadyFinished(1));

        let p = table.find(1).unwrap();
        assert_eq!(p.remaining_demand(), 0);
        assert_eq!(p.completed_at(), Some(5));
    }

    #[test]
    fn test_invalid_transition_leaves_state() {
        let mut table = table_with(&[3]);
        let err = table.transition(1, ProcessState::Ready, 0).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidStateTransition {
                pid: 1,
                from: ProcessState::Ready,
                to: ProcessState::Ready,
            }
        );
        assert_eq!(table.find(1).unwrap().state(), ProcessState::Ready);
    }

    #[test]
    fn test_transition_unknown_pid() {
        let mut table = ProcessTable::new();
        assert_eq!(
            table.transition(9, ProcessState::Blocked, 0),
            Err(ProcessError::NotFound(9))
        );
    }
}
