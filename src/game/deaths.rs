//! Death processing and game end.
//!
//! Entities that are destroyed or out of health stay where they are until
//! this pass runs at the end of a queue item. Every dead minion's board
//! position is recorded before any of them leaves, so deathrattles that
//! summon in place see the board as it was.

use tracing::{debug, info};

use crate::core::{EntityId, PlayState, PlayerId};
use crate::error::Result;
use crate::tasks::{Execution, TaskContext};
use crate::triggers::{GameEvent, TriggerType};
use crate::zones::{ZonePosition, ZoneType};

use super::game::Game;
use super::phase::Step;

impl Game {
    /// Move every dead minion and weapon to the graveyard, queue their
    /// deathrattles and `Death` events, and end the game if a hero died.
    pub(crate) fn process_deaths(&mut self) -> Result<()> {
        if self.is_over() {
            return Ok(());
        }
        let order = [self.current_player, self.current_player.opponent()];

        let mut dead: Vec<EntityId> = Vec::new();
        for player in order {
            let field = self.zones.field(player).to_vec();
            for (index, id) in field.into_iter().enumerate() {
                let entity = self.entity_mut(id)?;
                if entity.is_dead() {
                    entity.last_board_position = index;
                    dead.push(id);
                }
            }
        }
        for player in order {
            if let Some(weapon) = self.players[player].weapon {
                if self.entity(weapon)?.is_dead() {
                    dead.push(weapon);
                }
            }
        }

        for id in dead {
            let (owner, card, silenced) = {
                let entity = self.entity(id)?;
                (entity.owner, entity.card, entity.tags.has(crate::core::GameTag::Silenced))
            };
            let deathrattle = if silenced {
                Vec::new()
            } else {
                self.cards
                    .def(card)
                    .map(|def| def.power.deathrattle.clone())
                    .unwrap_or_default()
            };

            self.move_entity(id, ZoneType::Graveyard, ZonePosition::Top)?;
            debug!(entity = %id, %owner, "died");

            if !deathrattle.is_empty() {
                self.queue_tasks(Execution::new(deathrattle, TaskContext::new(owner, id)));
            }
            self.fire(GameEvent::new(TriggerType::Death, owner).with_source(id));
        }

        let losers: Vec<PlayerId> = PlayerId::all()
            .filter(|&p| self.entities.get(&self.players[p].hero).is_some_and(|h| h.is_dead()))
            .collect();
        if !losers.is_empty() {
            self.end_game(&losers);
        }
        Ok(())
    }

    /// Settle play states and enter the final steps.
    pub(crate) fn end_game(&mut self, losers: &[PlayerId]) {
        for player in PlayerId::all() {
            let record = &mut self.players[player];
            if record.play_state == PlayState::Conceded {
                continue;
            }
            record.play_state = match (losers.contains(&player), losers.len()) {
                (true, 1) => PlayState::Lost,
                (true, _) => PlayState::Tied,
                (false, _) => PlayState::Won,
            };
        }
        self.queue.clear();
        self.suspended = None;
        for (_, choice) in self.choices.iter_mut() {
            *choice = None;
        }
        self.step = Step::FinalGameOver;
        info!(
            turn = self.turn,
            p0 = ?self.players[PlayerId::new(0)].play_state,
            p1 = ?self.players[PlayerId::new(1)].play_state,
            "game over"
        );
    }

    /// Concede; the opponent wins.
    pub(crate) fn concede(&mut self, player: PlayerId) {
        self.players[player].play_state = PlayState::Conceded;
        self.end_game(&[player]);
    }
}
