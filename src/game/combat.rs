//! Attack resolution.

use tracing::debug;

use crate::core::{EntityId, EntityKind, GameTag};
use crate::error::Result;
use crate::tasks::TaskStatus;
use crate::triggers::{GameEvent, TriggerType};

use super::game::Game;

impl Game {
    /// Exchange damage between an attacker and a defender.
    ///
    /// Legality was checked when the attack was requested. If either side
    /// died or left play since (a secret, an `Attack` trigger), the attack
    /// fizzles with `Stop`. A defending hero deals no damage back.
    pub(crate) fn resolve_attack(&mut self, attacker: EntityId, defender: EntityId) -> Result<TaskStatus> {
        if !self.is_standing(attacker) || !self.is_standing(defender) {
            debug!(%attacker, %defender, "attack fizzled");
            return Ok(TaskStatus::Stop);
        }

        let attack = self.attack_of(attacker);
        let counter = match self.entity(defender)?.kind {
            EntityKind::Minion => self.attack_of(defender),
            _ => 0,
        };

        let (owner, kind) = {
            let entity = self.entity_mut(attacker)?;
            entity.tags.add(GameTag::NumAttacksThisTurn, 1);
            entity.tags.set(GameTag::Stealth, 0);
            (entity.owner, entity.kind)
        };
        if kind == EntityKind::Hero {
            if let Some(weapon) = self.players[owner].weapon {
                self.entity_mut(weapon)?.tags.add(GameTag::Durability, -1);
            }
        }

        debug!(%attacker, %defender, attack, counter, "attack");
        self.deal_damage(attacker, defender, attack)?;
        self.deal_damage(defender, attacker, counter)?;

        self.fire(
            GameEvent::new(TriggerType::AfterAttack, owner)
                .with_source(attacker)
                .with_target(defender),
        );
        Ok(TaskStatus::Complete)
    }

    fn is_standing(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(|e| e.in_play() && !e.is_dead())
    }
}
