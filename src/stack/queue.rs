//! The two-level FIFO behind [`Game::drain`](crate::game::Game).

use std::collections::VecDeque;

use crate::core::EntityId;
use crate::tasks::Execution;
use crate::triggers::{GameEvent, TriggerId};

/// One unit of queued work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pending {
    /// Run a task list.
    Run(Execution),
    /// Fire a matched trigger, if it is still active when dequeued.
    Trigger { id: TriggerId, event: GameEvent },
    /// Match an event against the registry when dequeued.
    Fire(GameEvent),
    /// Move a resolved spell from set-aside to the graveyard.
    Graveyard(EntityId),
}

/// Pending work for the action being processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQueue {
    agenda: VecDeque<Pending>,
    triggered: VecDeque<Pending>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a phase of the current action.
    pub fn queue_action(&mut self, item: Pending) {
        self.agenda.push_back(item);
    }

    /// Schedule a reaction. Runs before any remaining agenda item.
    pub fn queue_triggered(&mut self, item: Pending) {
        self.triggered.push_back(item);
    }

    /// Next item: reactions first, then the agenda.
    pub fn pop(&mut self) -> Option<Pending> {
        self.triggered.pop_front().or_else(|| self.agenda.pop_front())
    }

    /// Drop everything, e.g. on game over or a contract violation.
    pub fn clear(&mut self) {
        self.agenda.clear();
        self.triggered.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agenda.is_empty() && self.triggered.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agenda.len() + self.triggered.len()
    }
}
