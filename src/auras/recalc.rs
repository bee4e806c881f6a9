//! Full aura recalculation pass.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Entity, EntityId, GameTag, PlayerId};
use crate::game::Game;
use crate::triggers::ConditionEvaluator;

use super::aura::{AuraBuffer, AuraScope};

impl Game {
    /// Recompute every entity's aura buffer from the auras active right now.
    ///
    /// The pass rebuilds buffers from scratch, so a source that left play
    /// since the last pass contributes nothing. Running it twice with no
    /// state change in between leaves every derived stat unchanged.
    pub fn update_auras(&mut self) {
        let cards = Arc::clone(&self.cards);
        let mut computed: FxHashMap<EntityId, AuraBuffer> = FxHashMap::default();

        for player in PlayerId::all() {
            let mut sources: SmallVec<[EntityId; 10]> = self.zones.field(player).iter().copied().collect();
            sources.extend(self.players[player].weapon);
            sources.push(self.players[player].hero);

            for source in sources {
                let Some(entity) = self.entities.get(&source) else {
                    continue;
                };
                if entity.tags.has(GameTag::Silenced) || !entity.in_play() {
                    continue;
                }
                let Some(aura) = cards.def(entity.card).and_then(|d| d.power.aura.as_ref()) else {
                    continue;
                };

                let evaluator = ConditionEvaluator::new(self, player, source);
                for target in self.aura_targets(source, player, aura.scope) {
                    if let Some(condition) = &aura.condition {
                        if !evaluator.check(condition, target) {
                            continue;
                        }
                    }
                    computed.entry(target).or_default().apply(&aura.effect);
                }
            }
        }

        for entity in self.entities.values_mut() {
            let next = computed.remove(&entity.id).unwrap_or_default();
            if next == entity.aura {
                continue;
            }
            trace!(entity = %entity.id, atk = next.atk, health = next.health, "aura buffer changed");
            let old_max = entity.max_health();
            let old_health = entity.health();
            entity.aura = next;
            clamp_health(entity, old_max, old_health);
        }
    }

    fn aura_targets(&self, source: EntityId, owner: PlayerId, scope: AuraScope) -> SmallVec<[EntityId; 8]> {
        let field = self.zones.field(owner);
        match scope {
            AuraScope::Field => field.iter().copied().collect(),
            AuraScope::FieldExceptSource => field.iter().copied().filter(|&id| id != source).collect(),
            AuraScope::Adjacent => {
                let Some(pos) = field.iter().position(|&id| id == source) else {
                    return SmallVec::new();
                };
                let mut out = SmallVec::new();
                if pos > 0 {
                    out.push(field[pos - 1]);
                }
                if let Some(&right) = field.get(pos + 1) {
                    out.push(right);
                }
                out
            }
            AuraScope::EnemyField => self.zones.field(owner.opponent()).iter().copied().collect(),
            AuraScope::AllMinions => field
                .iter()
                .chain(self.zones.field(owner.opponent()))
                .copied()
                .collect(),
            AuraScope::Hand => self.zones.hand(owner).iter().copied().collect(),
            AuraScope::Hero => SmallVec::from_elem(self.players[owner].hero, 1),
            AuraScope::Weapon => self.players[owner].weapon.into_iter().collect(),
        }
    }
}

/// Keep current health when a health bonus goes away, unless it now
/// exceeds the new maximum.
pub(crate) fn clamp_health(entity: &mut Entity, old_max: i32, old_health: i32) {
    let new_max = entity.max_health();
    if new_max < old_max && old_health > 0 && entity.is_character() {
        let current = old_health.min(new_max);
        entity.tags.set(GameTag::Damage, (new_max - current).max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auras::{Enchant, Enchantment};
    use crate::cards::{Card, CardId};
    use crate::core::EntityKind;

    fn entity(attack: i32, health: i32) -> Entity {
        let card = Card::minion(CardId::new(1), "T", "T", 1, attack, health);
        Entity::new(EntityId::new(5), PlayerId::new(0), &card, EntityKind::Minion)
    }

    #[test]
    fn test_clamp_undamaged_returns_to_base() {
        let mut e = entity(1, 1);
        e.aura.health = 2;
        let (max, health) = (e.max_health(), e.health());
        e.aura = AuraBuffer::default();
        clamp_health(&mut e, max, health);
        assert_eq!(e.health(), 1);
        assert_eq!(e.damage(), 0);
    }

    #[test]
    fn test_clamp_damage_absorbed_by_bonus() {
        let mut e = entity(1, 1);
        e.enchantments.push(Enchantment::new(CardId::new(2), EntityId::new(3), Enchant::stats(0, 2)));
        e.tags.set(GameTag::Damage, 1);
        let (max, health) = (e.max_health(), e.health());
        assert_eq!(health, 2);

        e.enchantments.clear();
        clamp_health(&mut e, max, health);
        assert_eq!(e.health(), 1);
        assert_eq!(e.damage(), 0);
    }

    #[test]
    fn test_clamp_keeps_lower_health() {
        let mut e = entity(1, 4);
        e.aura.health = 2;
        e.tags.set(GameTag::Damage, 4);
        let (max, health) = (e.max_health(), e.health());
        assert_eq!(health, 2);

        e.aura = AuraBuffer::default();
        clamp_health(&mut e, max, health);
        assert_eq!(e.health(), 2);
    }
}
