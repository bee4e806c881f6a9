//! Execution state for a running task list.

use crate::core::{EntityId, PlayerId};
use crate::triggers::GameEvent;

use super::task::Task;

/// Who is running a task list and what it is aimed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskContext {
    pub controller: PlayerId,
    /// The card, minion or trigger owner the tasks belong to.
    pub source: EntityId,
    pub target: Option<EntityId>,
    /// The event that fired a trigger.
    pub event: Option<GameEvent>,
}

impl TaskContext {
    #[must_use]
    pub fn new(controller: PlayerId, source: EntityId) -> Self {
        Self {
            controller,
            source,
            target: None,
            event: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = Some(event);
        self
    }
}

/// Scratch values passed between the tasks of one list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStack {
    pub entities: Vec<EntityId>,
    /// Cards generated but not yet placed.
    pub playables: Vec<EntityId>,
    pub number: i32,
    pub flag: bool,
}

/// One task list and the index of its next task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub tasks: Vec<Task>,
    pub next: usize,
}

/// A task list in progress: nested frames, its context and its stack.
///
/// An execution is a plain value, so a list suspended on a choice is parked
/// on the game and resumed later from the same frame and index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    pub(crate) frames: Vec<Frame>,
    pub ctx: TaskContext,
    pub stack: TaskStack,
}

impl Execution {
    #[must_use]
    pub fn new(tasks: Vec<Task>, ctx: TaskContext) -> Self {
        Self {
            frames: vec![Frame { tasks, next: 0 }],
            ctx,
            stack: TaskStack::default(),
        }
    }

    /// Enter a nested list.
    pub(crate) fn push(&mut self, tasks: Vec<Task>) {
        if !tasks.is_empty() {
            self.frames.push(Frame { tasks, next: 0 });
        }
    }

    /// Everything has run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.frames.iter().all(|f| f.next >= f.tasks.len())
    }
}
