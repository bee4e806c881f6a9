//! Enchantments: modifiers attached to a single entity.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EntityId, GameTag};

/// The stat change and keyword grants an enchantment or aura applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchant {
    pub atk: i32,
    pub health: i32,
    pub cost: i32,
    pub grants: Vec<GameTag>,
    /// Expires during the cleanup step of the turn it was applied.
    pub one_turn: bool,
    /// Removed when the entity that created it leaves play.
    pub linked: bool,
}

impl Enchant {
    /// Attack and health change.
    #[must_use]
    pub fn stats(atk: i32, health: i32) -> Self {
        Self {
            atk,
            health,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_grant(mut self, tag: GameTag) -> Self {
        self.grants.push(tag);
        self
    }

    #[must_use]
    pub fn this_turn(mut self) -> Self {
        self.one_turn = true;
        self
    }

    #[must_use]
    pub fn linked(mut self) -> Self {
        self.linked = true;
        self
    }
}

/// An enchantment applied to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// The enchantment card this came from.
    pub card: CardId,
    /// The entity whose task applied it.
    pub creator: EntityId,
    pub effect: Enchant,
}

impl Enchantment {
    #[must_use]
    pub fn new(card: CardId, creator: EntityId, effect: Enchant) -> Self {
        Self { card, creator, effect }
    }
}
