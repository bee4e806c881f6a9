//! Conditions on entities.
//!
//! A `SelfCondition` is a predicate on one entity, read against the live
//! game. Triggers use it to filter the event subject, `Condition` and
//! `Guard` tasks use it to branch, auras use it to pick their targets.
//! Conditions about zones ("hand is empty") refer to the entity's owner.

use serde::{Deserialize, Serialize};

use crate::cards::Race;
use crate::core::{EntityId, EntityKind, GameTag, PlayerId};
use crate::game::Game;
use crate::zones::ZoneType;

/// A predicate on an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfCondition {
    // === Owner state ===
    IsHandEmpty,
    IsHandFull,
    IsFieldFull,
    IsDeckEmpty,
    IsWeaponEquipped,
    /// It is the evaluating controller's turn.
    IsMyTurn,

    // === Kind ===
    IsMinion,
    IsHero,
    IsWeapon,
    IsSpell,

    // === Relation ===
    IsFriendly,
    IsEnemy,
    IsSource,
    IsNotSource,
    InZone(ZoneType),

    // === Stats ===
    IsDamaged,
    IsUndamaged,
    IsFrozen,
    HasTag(GameTag),
    IsRace(Race),
    AttackAtLeast(i32),
    AttackAtMost(i32),
    HealthAtMost(i32),

    // === Combinators ===
    All(Vec<SelfCondition>),
    Any(Vec<SelfCondition>),
    Not(Box<SelfCondition>),
    Always,
}

impl SelfCondition {
    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: SelfCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }
}

/// Evaluates conditions from the point of view of a controller and source.
pub struct ConditionEvaluator<'a> {
    game: &'a Game,
    controller: PlayerId,
    source: EntityId,
}

impl<'a> ConditionEvaluator<'a> {
    #[must_use]
    pub fn new(game: &'a Game, controller: PlayerId, source: EntityId) -> Self {
        Self {
            game,
            controller,
            source,
        }
    }

    /// Check a condition on an entity. Unknown entities satisfy nothing.
    #[must_use]
    pub fn check(&self, condition: &SelfCondition, id: EntityId) -> bool {
        let game = self.game;
        let Some(entity) = game.entities.get(&id) else {
            return false;
        };
        let owner = entity.owner;

        match condition {
            SelfCondition::IsHandEmpty => game.zones.hand(owner).is_empty(),
            SelfCondition::IsHandFull => game
                .zones
                .zone(owner, ZoneType::Hand)
                .is_some_and(|z| z.is_full()),
            SelfCondition::IsFieldFull => game
                .zones
                .zone(owner, ZoneType::Play)
                .is_some_and(|z| z.is_full()),
            SelfCondition::IsDeckEmpty => game.zones.deck(owner).is_empty(),
            SelfCondition::IsWeaponEquipped => game.players[owner].weapon.is_some(),
            SelfCondition::IsMyTurn => game.current_player == self.controller,

            SelfCondition::IsMinion => entity.kind == EntityKind::Minion,
            SelfCondition::IsHero => entity.kind == EntityKind::Hero,
            SelfCondition::IsWeapon => entity.kind == EntityKind::Weapon,
            SelfCondition::IsSpell => entity.kind == EntityKind::Spell,

            SelfCondition::IsFriendly => owner == self.controller,
            SelfCondition::IsEnemy => owner != self.controller,
            SelfCondition::IsSource => id == self.source,
            SelfCondition::IsNotSource => id != self.source,
            SelfCondition::InZone(zone) => entity.zone == *zone,

            SelfCondition::IsDamaged => entity.is_damaged(),
            SelfCondition::IsUndamaged => !entity.is_damaged(),
            SelfCondition::IsFrozen => entity.has(GameTag::Frozen),
            SelfCondition::HasTag(tag) => entity.has(*tag),
            SelfCondition::IsRace(race) => game
                .cards
                .get(entity.card)
                .is_some_and(|card| card.race != Race::Invalid && card.race.matches(*race)),
            SelfCondition::AttackAtLeast(n) => game.attack_of(id) >= *n,
            SelfCondition::AttackAtMost(n) => game.attack_of(id) <= *n,
            SelfCondition::HealthAtMost(n) => entity.health() <= *n,

            SelfCondition::All(conditions) => conditions.iter().all(|c| self.check(c, id)),
            SelfCondition::Any(conditions) => conditions.iter().any(|c| self.check(c, id)),
            SelfCondition::Not(inner) => !self.check(inner, id),
            SelfCondition::Always => true,
        }
    }

    /// Check every entity; an empty set fails.
    #[must_use]
    pub fn check_all(&self, condition: &SelfCondition, ids: &[EntityId]) -> bool {
        !ids.is_empty() && ids.iter().all(|&id| self.check(condition, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_flattens() {
        let c = SelfCondition::IsMinion
            .and(SelfCondition::IsDamaged)
            .and(SelfCondition::IsFriendly);
        match c {
            SelfCondition::All(list) => assert_eq!(list.len(), 3),
            other => panic!("expected All, got {other:?}"),
        }
    }

    #[test]
    fn test_negate() {
        assert_eq!(
            SelfCondition::IsHero.negate(),
            SelfCondition::Not(Box::new(SelfCondition::IsHero))
        );
    }
}
