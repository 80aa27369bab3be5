//! Work requested during one update pass and run at the start of the next
//! frame, so the controller is never mutated re-entrantly.

use std::collections::VecDeque;

/// A deferred request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Snap the camera onto its goal.
    JumpToGoal,
}

/// FIFO of deferred requests. Duplicate pending requests collapse.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<DeferredTask>,
}

impl DeferredQueue {
    /// Queue `task` unless an identical request is already pending.
    pub fn push(&mut self, task: DeferredTask) {
        if !self.tasks.contains(&task) {
            self.tasks.push_back(task);
        }
    }

    /// Whether `task` is pending.
    #[must_use]
    pub fn is_pending(&self, task: DeferredTask) -> bool {
        self.tasks.contains(&task)
    }

    /// Drop a pending request that has already been satisfied.
    pub fn cancel(&mut self, task: DeferredTask) {
        self.tasks.retain(|t| *t != task);
    }

    /// Take every pending request in submission order.
    pub fn drain(&mut self) -> impl Iterator<Item = DeferredTask> + '_ {
        self.tasks.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let mut queue = DeferredQueue::default();
        queue.push(DeferredTask::JumpToGoal);
        queue.push(DeferredTask::JumpToGoal);
        assert!(queue.is_pending(DeferredTask::JumpToGoal));
        assert_eq!(queue.drain().count(), 1);
        assert!(!queue.is_pending(DeferredTask::JumpToGoal));
    }
}
