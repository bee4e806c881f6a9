//! Entities: every game object with a position and a tag store.
//!
//! ## ID Layout
//!
//! - `0..2`: reserved for the two players
//! - `2..`: heroes, hero powers, minions, spells and weapons, allocated in
//!   creation order and never reused within a match
//!
//! Entities never point at each other or at their owner. They hold
//! [`EntityId`] and [`PlayerId`] handles, resolved through the
//! [`Game`](crate::game::Game) arena.
//!
//! ## Derived stats
//!
//! Attack, health and cost are computed on read from the tag store, the
//! applied enchantments and the aura buffer written by the last aura pass:
//!
//! ```text
//! attack = ATK + sum(enchantment.atk) + aura.atk
//! health = HEALTH + sum(enchantment.health) + aura.health - DAMAGE
//! ```

use serde::{Deserialize, Serialize};

use crate::auras::{AuraBuffer, Enchantment};
use crate::cards::{Card, CardId, CardType};
use crate::zones::ZoneType;

use super::player::PlayerId;
use super::tags::{GameTag, Tags};

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First id available for card entities.
    pub const FIRST_CARD: u32 = 2;

    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Entity ID of a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// Check if this entity ID refers to a player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 < Self::FIRST_CARD
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What an entity is, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hero,
    HeroPower,
    Minion,
    Spell,
    Weapon,
}

impl EntityKind {
    /// Map a card type to the entity kind it instantiates.
    ///
    /// Enchantment cards are never instantiated as entities.
    #[must_use]
    pub fn from_card_type(card_type: CardType) -> Option<Self> {
        match card_type {
            CardType::Hero => Some(Self::Hero),
            CardType::HeroPower => Some(Self::HeroPower),
            CardType::Minion => Some(Self::Minion),
            CardType::Spell => Some(Self::Spell),
            CardType::Weapon => Some(Self::Weapon),
            CardType::Enchantment | CardType::Invalid => None,
        }
    }

    /// Heroes and minions can attack and be attacked.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(self, Self::Hero | Self::Minion)
    }
}

/// A live game object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub owner: PlayerId,
    pub card: CardId,
    pub kind: EntityKind,
    pub tags: Tags,
    pub zone: ZoneType,
    pub zone_position: usize,
    /// Field index held when the entity last left the board.
    pub last_board_position: usize,
    /// Marked for removal at the next death-processing step.
    pub destroyed: bool,
    pub enchantments: Vec<Enchantment>,
    pub aura: AuraBuffer,
}

impl Entity {
    /// Instantiate a card. Tags are seeded from the card's base stats and
    /// mechanics. The entity starts outside every zone.
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, card: &Card, kind: EntityKind) -> Self {
        let mut tags = card.game_tags.clone();
        tags.set(GameTag::Cost, card.cost);
        tags.set(GameTag::Atk, card.attack);
        if let Some(health) = card.health {
            tags.set(GameTag::Health, health);
        }
        if let Some(durability) = card.durability {
            tags.set(GameTag::Durability, durability);
        }
        if let Some(spell_power) = card.spell_power {
            tags.set(GameTag::SpellPower, spell_power);
        }

        Self {
            id,
            owner,
            card: card.id,
            kind,
            tags,
            zone: ZoneType::Invalid,
            zone_position: 0,
            last_board_position: 0,
            destroyed: false,
            enchantments: Vec::new(),
            aura: AuraBuffer::default(),
        }
    }

    // === Derived stats ===

    /// Current attack, never negative.
    #[must_use]
    pub fn attack(&self) -> i32 {
        let ench: i32 = self.enchantments.iter().map(|e| e.effect.atk).sum();
        (self.tags.get(GameTag::Atk) + ench + self.aura.atk).max(0)
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        let ench: i32 = self.enchantments.iter().map(|e| e.effect.health).sum();
        self.tags.get(GameTag::Health) + ench + self.aura.health
    }

    /// Max health minus damage taken.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.max_health() - self.tags.get(GameTag::Damage)
    }

    #[must_use]
    pub fn damage(&self) -> i32 {
        self.tags.get(GameTag::Damage)
    }

    /// Current mana cost, never negative.
    #[must_use]
    pub fn cost(&self) -> i32 {
        let ench: i32 = self.enchantments.iter().map(|e| e.effect.cost).sum();
        (self.tags.get(GameTag::Cost) + ench + self.aura.cost).max(0)
    }

    #[must_use]
    pub fn durability(&self) -> i32 {
        self.tags.get(GameTag::Durability)
    }

    #[must_use]
    pub fn armor(&self) -> i32 {
        self.tags.get(GameTag::Armor)
    }

    /// Check a keyword, including grants from enchantments and auras.
    #[must_use]
    pub fn has(&self, tag: GameTag) -> bool {
        self.tags.has(tag)
            || self.aura.grants.contains(&tag)
            || self.enchantments.iter().any(|e| e.effect.grants.contains(&tag))
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.damage() > 0
    }

    /// Destroyed, out of health, or out of durability.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        if self.destroyed {
            return true;
        }
        match self.kind {
            EntityKind::Hero | EntityKind::Minion => self.health() <= 0,
            EntityKind::Weapon => self.durability() <= 0,
            EntityKind::HeroPower | EntityKind::Spell => false,
        }
    }

    /// In a live board slot (field minion, hero, hero power, weapon).
    #[must_use]
    pub fn in_play(&self) -> bool {
        self.zone == ZoneType::Play
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.kind.is_character()
    }
}
