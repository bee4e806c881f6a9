//! Game events.
//!
//! Events are fired when things happen in the game. Triggers listen for a
//! [`TriggerType`] and may respond by queueing their tasks.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

/// Kind of event a trigger listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    // === Turn ===
    TurnStart,
    TurnEnd,

    // === Cards ===
    PlayCard,
    PlayMinion,
    AfterPlayMinion,
    Summon,
    AfterSummon,
    CastSpell,
    AfterCast,
    DrawCard,
    EquipWeapon,
    /// A hero power was used.
    Inspire,

    // === Combat and damage ===
    Attack,
    AfterAttack,
    TakeDamage,
    DealDamage,
    Heal,
    Death,
}

impl TriggerType {
    /// Event types whose subject is the event target rather than its source.
    #[must_use]
    pub const fn subject_is_target(self) -> bool {
        matches!(self, Self::TakeDamage | Self::Heal)
    }

    /// Turn events have a player but no subject entity.
    #[must_use]
    pub const fn is_turn_event(self) -> bool {
        matches!(self, Self::TurnStart | Self::TurnEnd)
    }
}

/// An event with its context.
///
/// - `source`: the entity that caused the event (attacker, damage dealer,
///   played card)
/// - `target`: the entity affected (damaged character, attack defender,
///   battlecry target)
/// - `player`: the player the event belongs to
/// - `amount`: damage dealt, health restored, and so on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub trigger_type: TriggerType,
    pub player: PlayerId,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub amount: i32,
}

impl GameEvent {
    /// Create a new event for a player.
    pub fn new(trigger_type: TriggerType, player: PlayerId) -> Self {
        Self {
            trigger_type,
            player,
            source: None,
            target: None,
            amount: 0,
        }
    }

    /// Set the source entity (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the target entity (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set an optional target entity (builder pattern).
    #[must_use]
    pub fn with_target_opt(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    /// Set the amount (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// The entity a trigger source filter is checked against.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        if self.trigger_type.is_turn_event() {
            None
        } else if self.trigger_type.subject_is_target() {
            self.target
        } else {
            self.source
        }
    }
}
