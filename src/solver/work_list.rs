use std::collections::{HashSet, VecDeque};

use crate::solver::engine::ConstraintId;

/// A FIFO queue of constraints awaiting revision, deduplicated so a
/// constraint is never queued twice at the same time. Popping a constraint
/// makes it eligible for re-enqueueing.
#[derive(Debug)]
pub struct WorkList {
    queue: VecDeque<ConstraintId>,
    queued: HashSet<ConstraintId>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, constraint_id: ConstraintId) {
        if self.queued.insert(constraint_id) {
            self.queue.push_back(constraint_id);
        }
    }

    pub fn pop_front(&mut self) -> Option<ConstraintId> {
        let constraint_id = self.queue.pop_front()?;
        self.queued.remove(&constraint_id);
        Some(constraint_id)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
