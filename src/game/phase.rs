//! Turn and step state machine.
//!
//! ```text
//! BeginFirst -> BeginShuffle -> BeginDraw -> BeginMulligan
//!   -> MainReady -> MainStartTriggers -> MainResource -> MainDraw -> MainStart
//!   -> MainAction            (decision point)
//!   -> MainEndTriggers -> MainCleanup -> MainNext -> MainReady ...
//! FinalWrapup -> FinalGameOver  (entered from death processing)
//! ```
//!
//! Entering a step runs its work and drains the queue. The machine runs on
//! by itself until it reaches `MainAction`, a pending choice or the end of
//! the game.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EntityKind, GameTag, PlayerId};
use crate::error::{GameError, Result};
use crate::triggers::{GameEvent, TriggerType};
use crate::zones::ZoneType;

use super::choice::{Choice, ChoiceKind};
use super::game::Game;

/// Cards drawn by the first player at game start; the second draws one more.
const OPENING_HAND: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Invalid,
    BeginFirst,
    BeginShuffle,
    BeginDraw,
    BeginMulligan,
    MainReady,
    MainStartTriggers,
    MainResource,
    MainDraw,
    MainStart,
    MainAction,
    MainEndTriggers,
    MainCleanup,
    MainNext,
    FinalWrapup,
    FinalGameOver,
}

impl Step {
    /// The step that follows this one.
    #[must_use]
    pub const fn next(self) -> Step {
        match self {
            Step::Invalid => Step::BeginFirst,
            Step::BeginFirst => Step::BeginShuffle,
            Step::BeginShuffle => Step::BeginDraw,
            Step::BeginDraw => Step::BeginMulligan,
            Step::BeginMulligan => Step::MainReady,
            Step::MainReady => Step::MainStartTriggers,
            Step::MainStartTriggers => Step::MainResource,
            Step::MainResource => Step::MainDraw,
            Step::MainDraw => Step::MainStart,
            Step::MainStart => Step::MainAction,
            Step::MainAction => Step::MainEndTriggers,
            Step::MainEndTriggers => Step::MainCleanup,
            Step::MainCleanup => Step::MainNext,
            Step::MainNext => Step::MainReady,
            Step::FinalWrapup | Step::FinalGameOver => Step::FinalGameOver,
        }
    }

    /// Steps of the opening sequence.
    #[must_use]
    pub const fn is_begin(self) -> bool {
        matches!(
            self,
            Step::BeginFirst | Step::BeginShuffle | Step::BeginDraw | Step::BeginMulligan
        )
    }
}

impl Game {
    /// Run the opening steps, then go on to the first decision point.
    ///
    /// With the mulligan enabled this stops on the two mulligan choices.
    /// With `auto_run` off it stops after `MainReady` of the first turn.
    pub fn start(&mut self) -> Result<()> {
        if self.step != Step::Invalid {
            return Err(GameError::contract("game already started"));
        }
        for step in [Step::BeginFirst, Step::BeginShuffle, Step::BeginDraw, Step::BeginMulligan] {
            self.enter(step)?;
        }
        if !self.has_pending_choice() {
            self.begin_turns()?;
        }
        Ok(())
    }

    /// Leave the opening and enter the first `MainReady`.
    pub(crate) fn begin_turns(&mut self) -> Result<()> {
        self.enter(Step::MainReady)?;
        if self.config.auto_run {
            self.run_to_decision()?;
        }
        Ok(())
    }

    /// Enter the next step. Returns `false` at a decision point, a pending
    /// choice or the end of the game, where nothing advances.
    pub fn advance(&mut self) -> Result<bool> {
        if self.is_over() || self.has_pending_choice() || self.step == Step::MainAction {
            return Ok(false);
        }
        if self.step == Step::Invalid || self.step.is_begin() {
            return Err(GameError::contract("the opening steps run from start()"));
        }
        self.enter(self.step.next())?;
        Ok(true)
    }

    /// Advance until `target` is the current step or nothing can advance.
    pub fn process_until(&mut self, target: Step) -> Result<()> {
        while self.step != target {
            if !self.advance()? {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn run_to_decision(&mut self) -> Result<()> {
        while self.advance()? {}
        Ok(())
    }

    /// Make `step` current, run its work, and drain the queue.
    pub(crate) fn enter(&mut self, step: Step) -> Result<()> {
        self.step = step;
        let player = self.current_player;
        match step {
            Step::MainReady | Step::MainNext | Step::BeginFirst => {
                info!(?step, turn = self.turn, %player, "step");
            }
            _ => debug!(?step, %player, "step"),
        }

        match step {
            Step::Invalid | Step::FinalWrapup | Step::FinalGameOver | Step::MainStart | Step::MainAction => {}

            Step::BeginFirst => self.current_player = self.first_player,

            Step::BeginShuffle => {
                if self.config.shuffle_decks {
                    for p in PlayerId::all() {
                        if let Some(deck) = self.zones.zone_mut(p, ZoneType::Deck) {
                            self.rng.shuffle(deck.entities_mut());
                        }
                        self.renumber(p, ZoneType::Deck);
                    }
                }
            }

            Step::BeginDraw => {
                let first = self.first_player;
                for _ in 0..OPENING_HAND {
                    self.draw_card(first)?;
                }
                for _ in 0..=OPENING_HAND {
                    self.draw_card(first.opponent())?;
                }
                if let Some(coin) = self.config.coin.clone() {
                    self.give_card(first.opponent(), &coin)?;
                }
            }

            Step::BeginMulligan => {
                if !self.config.skip_mulligan {
                    let coin = self.config.coin.as_deref().map(|code| self.card_by_code(code)).transpose()?;
                    for p in PlayerId::all() {
                        let options = self
                            .zones
                            .hand(p)
                            .iter()
                            .copied()
                            .filter(|id| self.entities.get(id).map(|e| e.card) != coin)
                            .collect();
                        self.choices[p] = Some(Choice::new(p, ChoiceKind::Mulligan, options));
                    }
                }
            }

            Step::MainReady => self.ready_turn(player)?,

            Step::MainStartTriggers => self.fire(GameEvent::new(TriggerType::TurnStart, player)),

            Step::MainResource => {
                let cap = self.config.max_mana;
                let tags = &mut self.players[player].tags;
                let total = (tags.get(GameTag::Resources) + 1).min(cap);
                tags.set(GameTag::Resources, total);
                tags.set(GameTag::ResourcesUsed, 0);
                let owed = tags.get(GameTag::OverloadOwed);
                tags.set(GameTag::OverloadLocked, owed);
                tags.set(GameTag::OverloadOwed, 0);
            }

            Step::MainDraw => {
                self.draw_card(player)?;
            }

            Step::MainEndTriggers => self.fire(GameEvent::new(TriggerType::TurnEnd, player)),

            Step::MainCleanup => self.cleanup_turn(player)?,

            Step::MainNext => self.current_player = player.opponent(),
        }

        self.drain()
    }

    /// Refresh the current player's characters and per-turn counters.
    fn ready_turn(&mut self, player: PlayerId) -> Result<()> {
        self.turn += 1;

        let mut ready: Vec<_> = self.zones.field(player).to_vec();
        ready.push(self.players[player].hero);
        ready.push(self.players[player].hero_power);
        for id in ready {
            let entity = self.entity_mut(id)?;
            entity.tags.set(GameTag::Exhausted, 0);
            entity.tags.set(GameTag::NumAttacksThisTurn, 0);
            if entity.kind == EntityKind::Minion {
                entity.tags.add(GameTag::NumTurnsInPlay, 1);
            }
        }

        let tags = &mut self.players[player].tags;
        tags.set(GameTag::NumCardsPlayedThisTurn, 0);
        tags.set(GameTag::NumMinionsPlayedThisTurn, 0);
        Ok(())
    }

    /// End-of-turn bookkeeping. Frozen characters that did not attack this
    /// turn thaw.
    fn cleanup_turn(&mut self, player: PlayerId) -> Result<()> {
        self.expire_enchantments();
        self.players[player].tags.set(GameTag::TempResources, 0);

        let mut characters: Vec<_> = self.zones.field(player).to_vec();
        characters.push(self.players[player].hero);
        for id in characters {
            let entity = self.entity_mut(id)?;
            if entity.tags.has(GameTag::Frozen) && entity.tags.get(GameTag::NumAttacksThisTurn) == 0 {
                entity.tags.set(GameTag::Frozen, 0);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_cycle() {
        let mut step = Step::MainReady;
        let mut seen = vec![step];
        loop {
            step = step.next();
            if step == Step::MainReady {
                break;
            }
            seen.push(step);
        }
        assert_eq!(seen.len(), 9);
        assert!(seen.contains(&Step::MainAction));
        assert!(seen.contains(&Step::MainNext));
    }

    #[test]
    fn test_opening_leads_to_first_turn() {
        assert_eq!(Step::BeginMulligan.next(), Step::MainReady);
        assert!(Step::BeginDraw.is_begin());
        assert!(!Step::MainReady.is_begin());
        assert_eq!(Step::FinalWrapup.next(), Step::FinalGameOver);
    }
}
