//! Draining the pending queue.
//!
//! Each queue item runs to completion, then deaths are processed and auras
//! recalculated before the next item is taken. Reactions queued while an
//! item ran go ahead of the remaining agenda.

use tracing::{debug, trace};

use crate::core::{EntityId, EntityKind, PlayerId};
use crate::error::Result;
use crate::stack::Pending;
use crate::tasks::{Execution, TaskContext};
use crate::triggers::{ConditionEvaluator, GameEvent, SelfCondition, Trigger, TriggerContext, TriggerId};
use crate::zones::{ZonePosition, ZoneType};

use super::game::Game;

impl Game {
    /// Run queued work until the queue is empty, a choice is pending, or
    /// the game ends.
    ///
    /// A contract violation clears the queue and propagates; effects already
    /// applied stay applied.
    pub(crate) fn drain(&mut self) -> Result<()> {
        loop {
            self.process_deaths()?;
            self.update_auras();
            if self.is_over() || self.suspended.is_some() {
                return Ok(());
            }
            let Some(item) = self.queue.pop() else {
                return Ok(());
            };
            if let Err(err) = self.resolve_pending(item) {
                self.queue.clear();
                return Err(err);
            }
        }
    }

    fn resolve_pending(&mut self, item: Pending) -> Result<()> {
        match item {
            Pending::Run(exec) => {
                self.execute(exec)?;
            }
            Pending::Trigger { id, event } => self.fire_trigger(id, event)?,
            Pending::Fire(event) => self.fire(event),
            Pending::Graveyard(id) => {
                if self.entity(id)?.zone == ZoneType::SetAside {
                    self.move_entity(id, ZoneType::Graveyard, ZonePosition::Top)?;
                }
            }
        }
        Ok(())
    }

    fn fire_trigger(&mut self, id: TriggerId, event: GameEvent) -> Result<()> {
        let Some(trigger) = self.triggers.get(id).cloned() else {
            trace!(trigger = %id, "trigger removed before it could fire");
            return Ok(());
        };

        if trigger.def.remove_after_triggered {
            self.triggers.unregister(id);
        }
        if trigger.def.zone == ZoneType::Secret {
            debug!(secret = %trigger.owner, "secret revealed");
            self.move_entity(trigger.owner, ZoneType::Graveyard, ZonePosition::Top)?;
        }

        debug!(trigger = %id, owner = %trigger.owner, event = ?event.trigger_type, "trigger fired");
        let ctx = TaskContext::new(trigger.controller, trigger.owner)
            .with_target(event.target)
            .with_event(event);
        self.execute(Execution::new(trigger.def.tasks, ctx))?;
        Ok(())
    }
}

impl TriggerContext for Game {
    fn current_player(&self) -> PlayerId {
        self.current_player
    }

    fn owner_of(&self, entity: EntityId) -> Option<PlayerId> {
        self.entities.get(&entity).map(|e| e.owner)
    }

    fn kind_of(&self, entity: EntityId) -> Option<EntityKind> {
        self.entities.get(&entity).map(|e| e.kind)
    }

    fn hero_of(&self, player: PlayerId) -> EntityId {
        self.players[player].hero
    }

    /// Hero-side slots first, then the field left to right, then secrets,
    /// then the hand.
    fn board_order(&self, entity: EntityId) -> usize {
        let Some(e) = self.entities.get(&entity) else {
            return usize::MAX;
        };
        match e.zone {
            ZoneType::Play if e.kind == EntityKind::Minion => e.zone_position + 1,
            ZoneType::Play => 0,
            ZoneType::Secret => 100 + e.zone_position,
            ZoneType::Hand => 200 + e.zone_position,
            _ => 300 + e.zone_position,
        }
    }

    fn condition_holds(&self, trigger: &Trigger, condition: &SelfCondition, subject: EntityId) -> bool {
        ConditionEvaluator::new(self, trigger.controller, trigger.owner).check(condition, subject)
    }
}
