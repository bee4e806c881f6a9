//! Task definitions.
//!
//! Tasks are the building blocks of card behavior. A card's power is an
//! ordered `Vec<Task>`; the [executor](super::executor) runs it against a
//! [`TaskContext`](super::TaskContext) and a scratch
//! [`TaskStack`](super::TaskStack).
//!
//! ## Control
//!
//! - `Condition`: evaluate a predicate, store the result in the stack flag
//! - `Guard`: stop the current list unless the predicate holds
//! - `Flag`: run a nested list when the stack flag has a given value
//! - `Sequence` / `Repeat`: nested lists
//!
//! ## Stack
//!
//! Tasks that read `EntityType::Stack` act on whatever `Include`,
//! `FilterStack`, `RandomPick` or a generating task (`RandomCard`,
//! `RandomEntourage`) left there. `GetGameTag` and the `Math*` tasks work on
//! the stack number that `DamageNumber` and `HealNumber` read.
//!
//! ## Effects
//!
//! Everything else changes the game. Damage, heal, summon, draw and the like
//! fire their events as they apply; the triggered reactions are queued, not
//! run inline.

use serde::{Deserialize, Serialize};

use crate::cards::{CardClass, CardType, Race};
use crate::core::GameTag;
use crate::triggers::SelfCondition;
use crate::zones::ZoneType;

use super::targeting::EntityType;

/// Result of running one task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Continue with the next task.
    Complete,
    /// Skip the rest of the current list.
    Stop,
    /// Waiting for a player choice; the execution is parked on the game.
    Suspended,
}

/// Where a summoned minion lands relative to the task source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonSide {
    /// Rightmost slot.
    #[default]
    Default,
    /// Directly right of the source.
    Right,
    /// Directly left of the source.
    Left,
    /// The slot the source occupied when it left the board.
    InPlace,
}

/// A unit of card behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    // === Control ===
    /// Set the stack flag to whether every resolved entity satisfies the
    /// condition.
    Condition {
        entity_type: EntityType,
        condition: SelfCondition,
    },

    /// Stop unless every resolved entity satisfies the condition.
    Guard {
        entity_type: EntityType,
        condition: SelfCondition,
    },

    /// Run `tasks` when the stack flag equals `value`.
    Flag { value: bool, tasks: Vec<Task> },

    Sequence(Vec<Task>),

    Repeat { times: u32, tasks: Vec<Task> },

    // === Stack ===
    /// Replace the stack entities with a selection.
    Include(EntityType),

    /// Keep only the stack entities satisfying a condition.
    FilterStack(SelfCondition),

    /// Keep `n` random stack entities.
    RandomPick(usize),

    /// Load a tag of the first resolved entity into the stack number.
    GetGameTag { entity_type: EntityType, tag: GameTag },

    MathAdd(i32),

    MathMultiply(i32),

    // === Damage and health ===
    Damage {
        entity_type: EntityType,
        amount: i32,
        /// Boosted by the controller's spell damage.
        spell_damage: bool,
    },

    /// Damage by the stack number.
    DamageNumber { entity_type: EntityType, spell_damage: bool },

    Heal { entity_type: EntityType, amount: i32 },

    /// Heal by the stack number.
    HealNumber(EntityType),

    /// Give the controller's hero armor.
    Armor(i32),

    // === Removal and status ===
    Destroy(EntityType),

    Freeze(EntityType),

    Silence(EntityType),

    /// Combat between the context source and target.
    Attack,

    // === Card creation ===
    /// Draw cards for the controller.
    Draw(u32),

    /// Create copies of a card in a zone of the controller (or opponent).
    AddCard {
        code: String,
        zone: ZoneType,
        count: u32,
        opposite: bool,
    },

    Summon { code: String, side: SummonSide },

    // === Moves ===
    ReturnHand(EntityType),

    MoveTo { entity_type: EntityType, zone: ZoneType },

    /// Turn each resolved entity into another card, keeping its id and slot.
    Transform { entity_type: EntityType, code: String },

    // === Random generation ===
    /// Generate one random collectible card into the stack playables.
    ///
    /// The class comes from the hero named by `entity_type` (`Hero` or
    /// `EnemyHero`), or from `card_class` when `entity_type` is `Invalid`.
    /// Class and race match exactly; `CardType::Invalid` and `Race::Invalid`
    /// mean any. With `opposite` the card belongs to the opponent.
    RandomCard {
        entity_type: EntityType,
        card_type: CardType,
        card_class: CardClass,
        race: Race,
        opposite: bool,
    },

    /// Generate cards from the source's entourage into the stack playables.
    RandomEntourage { count: usize, exclude_in_play: bool },

    /// Move the stack playables to `Hand`, `EnemyHand`, `Deck` or onto the
    /// field (`Minions`).
    AddStackTo(EntityType),

    /// Offer three distinct cards; the pick goes to the controller's hand.
    Discover { card_type: CardType, race: Race },

    // === Equipment and hero ===
    Weapon(String),

    ReplaceHero {
        hero: String,
        power: String,
        weapon: Option<String>,
    },

    // === Tags, enchantments, mana ===
    SetGameTag {
        entity_type: EntityType,
        tag: GameTag,
        value: i32,
    },

    /// Set a tag on the controller's player record.
    SetPlayerGameTag { tag: GameTag, value: i32 },

    /// Attach the enchantment card `code` to each resolved entity.
    AddEnchantment { code: String, entity_type: EntityType },

    /// Gain (or lose) mana crystals, optionally already filled.
    ManaCrystal { amount: i32, fill: bool },

    /// Mana usable this turn only.
    TempMana(i32),
}

impl Task {
    /// Damage task.
    #[must_use]
    pub fn damage(entity_type: EntityType, amount: i32, spell_damage: bool) -> Self {
        Self::Damage {
            entity_type,
            amount,
            spell_damage,
        }
    }

    #[must_use]
    pub fn heal(entity_type: EntityType, amount: i32) -> Self {
        Self::Heal { entity_type, amount }
    }

    /// Summon at the rightmost slot.
    #[must_use]
    pub fn summon(code: impl Into<String>) -> Self {
        Self::Summon {
            code: code.into(),
            side: SummonSide::Default,
        }
    }

    #[must_use]
    pub fn summon_side(code: impl Into<String>, side: SummonSide) -> Self {
        Self::Summon {
            code: code.into(),
            side,
        }
    }

    /// One copy of a card into the controller's hand.
    #[must_use]
    pub fn add_to_hand(code: impl Into<String>) -> Self {
        Self::AddCard {
            code: code.into(),
            zone: ZoneType::Hand,
            count: 1,
            opposite: false,
        }
    }

    #[must_use]
    pub fn enchant(code: impl Into<String>, entity_type: EntityType) -> Self {
        Self::AddEnchantment {
            code: code.into(),
            entity_type,
        }
    }

    #[must_use]
    pub fn condition(entity_type: EntityType, condition: SelfCondition) -> Self {
        Self::Condition {
            entity_type,
            condition,
        }
    }

    #[must_use]
    pub fn guard(entity_type: EntityType, condition: SelfCondition) -> Self {
        Self::Guard {
            entity_type,
            condition,
        }
    }

    #[must_use]
    pub fn flag(value: bool, tasks: impl IntoIterator<Item = Task>) -> Self {
        Self::Flag {
            value,
            tasks: tasks.into_iter().collect(),
        }
    }
}
