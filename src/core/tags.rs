//! GameTag store.
//!
//! Every entity and every player carries a [`Tags`] map from an enumerated
//! [`GameTag`] key to an `i32`. Rules read and write through this map rather
//! than through dedicated fields, so a card definition can touch any property
//! with the same generic tasks.
//!
//! Missing keys read as `0`. Setting a key to `0` removes it, which keeps two
//! stores with the same observable contents equal.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Enumerated property key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameTag {
    // === Base stats ===
    Atk,
    Health,
    Cost,
    Damage,
    Durability,
    Armor,
    SpellPower,
    Overload,

    // === Keywords ===
    Taunt,
    Charge,
    Rush,
    Windfury,
    DivineShield,
    Stealth,
    Frozen,
    Immune,
    Poisonous,
    Lifesteal,
    Freeze,
    CantBeTargetedBySpells,
    Battlecry,
    Deathrattle,
    Secret,
    Combo,
    Silenced,

    // === Turn state ===
    Exhausted,
    NumAttacksThisTurn,
    NumTurnsInPlay,

    // === Player resources ===
    Resources,
    ResourcesUsed,
    TempResources,
    OverloadOwed,
    OverloadLocked,
    Fatigue,
    NumCardsPlayedThisTurn,
    NumMinionsPlayedThisTurn,
    HeroPowerDamage,

    /// Free slot for card scripts that need a scratch counter.
    TagScriptDataNum1,
}

impl GameTag {
    /// Keyword tags cleared by silence.
    pub const SILENCEABLE: [GameTag; 16] = [
        GameTag::Taunt,
        GameTag::Charge,
        GameTag::Rush,
        GameTag::Windfury,
        GameTag::DivineShield,
        GameTag::Stealth,
        GameTag::Frozen,
        GameTag::Poisonous,
        GameTag::Lifesteal,
        GameTag::Freeze,
        GameTag::CantBeTargetedBySpells,
        GameTag::Battlecry,
        GameTag::Deathrattle,
        GameTag::SpellPower,
        GameTag::Overload,
        GameTag::Combo,
    ];
}

/// Sparse map from [`GameTag`] to value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    values: FxHashMap<GameTag, i32>,
}

impl Tags {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a tag; missing tags are `0`.
    #[must_use]
    pub fn get(&self, tag: GameTag) -> i32 {
        self.values.get(&tag).copied().unwrap_or(0)
    }

    /// Write a tag. Writing `0` removes the key.
    pub fn set(&mut self, tag: GameTag, value: i32) {
        if value == 0 {
            self.values.remove(&tag);
        } else {
            self.values.insert(tag, value);
        }
    }

    /// Add `delta` to a tag and return the new value.
    pub fn add(&mut self, tag: GameTag, delta: i32) -> i32 {
        let value = self.get(tag) + delta;
        self.set(tag, value);
        value
    }

    /// Check a boolean tag.
    #[must_use]
    pub fn has(&self, tag: GameTag) -> bool {
        self.get(tag) > 0
    }

    /// Number of non-zero tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate tags in key order.
    pub fn sorted(&self) -> Vec<(GameTag, i32)> {
        let mut pairs: Vec<_> = self.values.iter().map(|(&t, &v)| (t, v)).collect();
        pairs.sort_by_key(|&(t, _)| t);
        pairs
    }
}

impl FromIterator<(GameTag, i32)> for Tags {
    fn from_iter<I: IntoIterator<Item = (GameTag, i32)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (tag, value) in iter {
            tags.set(tag, value);
        }
        tags
    }
}
