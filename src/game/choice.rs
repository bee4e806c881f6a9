//! Pending player choices.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// Opening hand: pick any subset to replace.
    Mulligan,
    /// Pick exactly one option; it goes to the hand.
    Discover,
}

/// A decision the engine is waiting on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub player: PlayerId,
    pub kind: ChoiceKind,
    pub options: Vec<EntityId>,
}

impl Choice {
    #[must_use]
    pub fn new(player: PlayerId, kind: ChoiceKind, options: Vec<EntityId>) -> Self {
        Self { player, kind, options }
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.options.contains(&id)
    }
}
