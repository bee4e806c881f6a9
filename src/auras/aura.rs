//! Auras: continuous effects projected by an entity in play.
//!
//! An aura never writes to the entities it affects. Each recalculation pass
//! rebuilds every entity's [`AuraBuffer`] from the auras active at that
//! moment, so a source that leaves play stops contributing on the next pass.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameTag;
use crate::triggers::SelfCondition;

use super::enchantment::Enchant;

/// Which entities an aura reaches, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    /// Friendly minions, the source included.
    Field,
    /// Friendly minions other than the source.
    FieldExceptSource,
    /// Minions directly left and right of the source.
    Adjacent,
    /// Enemy minions.
    EnemyField,
    /// Every minion on both sides.
    AllMinions,
    /// Cards in the owner's hand.
    Hand,
    /// The owner's hero.
    Hero,
    /// The owner's weapon.
    Weapon,
}

/// A continuous effect definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aura {
    pub scope: AuraScope,
    pub effect: Enchant,
    /// Only entities satisfying this are affected.
    pub condition: Option<SelfCondition>,
}

impl Aura {
    #[must_use]
    pub fn new(scope: AuraScope, effect: Enchant) -> Self {
        Self {
            scope,
            effect,
            condition: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: SelfCondition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Aura contributions currently applied to one entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraBuffer {
    pub atk: i32,
    pub health: i32,
    pub cost: i32,
    pub grants: SmallVec<[GameTag; 4]>,
}

impl AuraBuffer {
    /// Fold one aura effect into the buffer.
    pub fn apply(&mut self, effect: &Enchant) {
        self.atk += effect.atk;
        self.health += effect.health;
        self.cost += effect.cost;
        for &tag in &effect.grants {
            if !self.grants.contains(&tag) {
                self.grants.push(tag);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_accumulates() {
        let mut buffer = AuraBuffer::default();
        buffer.apply(&Enchant::stats(1, 0));
        buffer.apply(&Enchant::stats(1, 1).with_grant(GameTag::Taunt));
        buffer.apply(&Enchant::default().with_grant(GameTag::Taunt));
        assert_eq!(buffer.atk, 2);
        assert_eq!(buffer.health, 1);
        assert_eq!(buffer.grants.as_slice(), &[GameTag::Taunt]);
        assert!(!buffer.is_empty());
    }
}
