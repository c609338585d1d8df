/*!
 * Round-Robin Rotation Queue
 * Persistent turn order that outlives individual runs
 */

use crate::core::types::Pid;
use serde::Serialize;
use std::collections::VecDeque;

/// FIFO ring of process identifiers
///
/// Seeded on process creation and consulted only by Round-Robin. Entries are
/// never compacted: finished or blocked identifiers stay until a selection
/// pops and discards them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RotationQueue {
    queue: VecDeque<Pid>,
}

impl RotationQueue {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push_back(&mut self, pid: Pid) {
        self.queue.push_back(pid);
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<Pid> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, pid: Pid) -> bool {
        self.queue.contains(&pid)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.queue.iter().copied()
    }
}
