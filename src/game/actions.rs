//! Player actions.
//!
//! [`Game::process`] is the one entry point for outside input. It validates
//! the action against the current state, records it, builds the queue
//! items the action stands for and drains them. Validation reads only, so
//! a rejected action leaves the game untouched.
//!
//! ## Queue layout
//!
//! ```text
//! minion  PlayCard, PlayMinion, Summon, battlecry, AfterPlayMinion, AfterSummon
//! spell   PlayCard, CastSpell, effect, to graveyard, AfterCast
//! secret  PlayCard, CastSpell, AfterCast           (the card waits in Secret)
//! weapon  PlayCard, battlecry, EquipWeapon
//! attack  Attack, combat
//! power   effect, Inspire
//! ```
//!
//! Reactions to each item run before the next one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{ActionRecord, EntityId, EntityKind, GameTag, PlayerAction, PlayerId};
use crate::error::{ActionError, GameError, Result};
use crate::rules::{check_attack, check_play};
use crate::stack::Pending;
use crate::tasks::{Execution, Task, TaskContext};
use crate::triggers::{GameEvent, TriggerType};
use crate::zones::{ZonePosition, ZoneType};

use super::choice::ChoiceKind;
use super::game::Game;
use super::phase::Step;

impl Game {
    /// Validate and run a player action to the next decision point.
    ///
    /// Rejections are `GameError::InvalidAction` with the state unchanged.
    /// A contract violation while running aborts the action; effects already
    /// applied stay.
    pub fn process(&mut self, player: PlayerId, action: PlayerAction) -> Result<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if let Err(reason) = self.validate(player, &action) {
            warn!(%player, ?action, %reason, "action rejected");
            return Err(reason.into());
        }

        debug!(%player, ?action, turn = self.turn, "action");
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action.clone(), self.turn, sequence));

        let result = self.dispatch(player, action);
        if result.is_err() {
            self.queue.clear();
        }
        result
    }

    /// Check an action without applying it.
    pub fn validate(&self, player: PlayerId, action: &PlayerAction) -> std::result::Result<(), ActionError> {
        if matches!(action, PlayerAction::Concede) {
            return Ok(());
        }

        if let Some(choice) = &self.choices[player] {
            return match (action, choice.kind) {
                (PlayerAction::Mulligan { replace }, ChoiceKind::Mulligan) => {
                    if replace.iter().all(|&id| choice.contains(id)) {
                        Ok(())
                    } else {
                        Err(ActionError::InvalidChoice)
                    }
                }
                (PlayerAction::Choose { entity }, ChoiceKind::Discover) => {
                    if choice.contains(*entity) {
                        Ok(())
                    } else {
                        Err(ActionError::InvalidChoice)
                    }
                }
                _ => Err(ActionError::ChoicePending),
            };
        }
        if matches!(action, PlayerAction::Mulligan { .. } | PlayerAction::Choose { .. }) {
            return Err(ActionError::NoChoicePending);
        }
        if self.has_pending_choice() {
            return Err(ActionError::ChoicePending);
        }
        if player != self.current_player {
            return Err(ActionError::NotYourTurn);
        }
        if self.step != Step::MainAction {
            return Err(ActionError::WrongStep);
        }

        match action {
            PlayerAction::PlayCard { card, target, .. } => self.validate_play(player, *card, *target),
            PlayerAction::Attack { attacker, defender } => check_attack(self, player, *attacker, *defender),
            PlayerAction::HeroPower { target } => {
                let power = self.players[player].hero_power;
                let entity = self.get_entity(power).ok_or(ActionError::UnknownEntity)?;
                if entity.tags.has(GameTag::Exhausted) {
                    return Err(ActionError::HeroPowerUsed);
                }
                self.check_cost(player, entity.cost())?;
                check_play(self, player, power, *target)
            }
            PlayerAction::EndTurn => Ok(()),
            PlayerAction::Mulligan { .. } | PlayerAction::Choose { .. } | PlayerAction::Concede => Ok(()),
        }
    }

    fn validate_play(
        &self,
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
    ) -> std::result::Result<(), ActionError> {
        let entity = self.get_entity(card).ok_or(ActionError::UnknownEntity)?;
        if entity.owner != player || entity.zone != ZoneType::Hand {
            return Err(ActionError::NotInHand);
        }
        self.check_cost(player, entity.cost())?;

        match entity.kind {
            EntityKind::Minion if self.field_is_full(player) => return Err(ActionError::BoardFull),
            EntityKind::Spell if entity.tags.has(GameTag::Secret) => {
                let secrets = self.zones.entities(player, ZoneType::Secret);
                let duplicate = secrets
                    .iter()
                    .any(|id| self.entities.get(id).is_some_and(|s| s.card == entity.card));
                if duplicate {
                    return Err(ActionError::DuplicateSecret);
                }
                if secrets.len() >= self.config.secret_size {
                    return Err(ActionError::BoardFull);
                }
            }
            _ => {}
        }
        check_play(self, player, card, target)
    }

    fn check_cost(&self, player: PlayerId, cost: i32) -> std::result::Result<(), ActionError> {
        let available = self.players[player].remaining_mana();
        if cost > available {
            return Err(ActionError::NotEnoughMana { cost, available });
        }
        Ok(())
    }

    fn dispatch(&mut self, player: PlayerId, action: PlayerAction) -> Result<()> {
        match action {
            PlayerAction::PlayCard { card, target, position } => self.play_card(player, card, target, position),
            PlayerAction::Attack { attacker, defender } => {
                self.queue.queue_action(Pending::Fire(
                    GameEvent::new(TriggerType::Attack, player)
                        .with_source(attacker)
                        .with_target(defender),
                ));
                let ctx = TaskContext::new(player, attacker).with_target(Some(defender));
                self.queue.queue_action(Pending::Run(Execution::new(vec![Task::Attack], ctx)));
                self.drain()
            }
            PlayerAction::HeroPower { target } => self.use_hero_power(player, target),
            PlayerAction::EndTurn => {
                self.enter(Step::MainEndTriggers)?;
                if self.config.auto_run {
                    self.run_to_decision()?;
                }
                Ok(())
            }
            PlayerAction::Mulligan { replace } => self.mulligan(player, replace),
            PlayerAction::Choose { entity } => self.choose(player, entity),
            PlayerAction::Concede => {
                self.concede(player);
                Ok(())
            }
        }
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<()> {
        let (cost, kind, card_id, overload, secret) = {
            let entity = self.entity(card)?;
            (
                entity.cost(),
                entity.kind,
                entity.card,
                entity.tags.get(GameTag::Overload),
                entity.tags.has(GameTag::Secret),
            )
        };

        let record = &mut self.players[player];
        record.spend_mana(cost);
        if overload > 0 {
            record.tags.add(GameTag::OverloadOwed, overload);
        }
        let combo = record.tags.get(GameTag::NumCardsPlayedThisTurn) > 0;
        record.tags.add(GameTag::NumCardsPlayedThisTurn, 1);

        let cards = Arc::clone(&self.cards);
        let tasks = cards
            .def(card_id)
            .map(|def| {
                if combo && !def.power.combo.is_empty() {
                    def.power.combo.clone()
                } else {
                    def.power.tasks.clone()
                }
            })
            .unwrap_or_default();
        let exec = Execution::new(tasks, TaskContext::new(player, card).with_target(target));
        let event = |trigger_type| {
            GameEvent::new(trigger_type, player)
                .with_source(card)
                .with_target_opt(target)
        };

        debug!(%player, %card, ?kind, cost, combo, "card played");
        let items = match kind {
            EntityKind::Minion => {
                self.players[player].tags.add(GameTag::NumMinionsPlayedThisTurn, 1);
                if !self.place_minion(card, position)? {
                    return Err(GameError::contract(format!("no field slot for {card}")));
                }
                vec![
                    Pending::Fire(event(TriggerType::PlayCard)),
                    Pending::Fire(event(TriggerType::PlayMinion)),
                    Pending::Fire(event(TriggerType::Summon)),
                    Pending::Run(exec),
                    Pending::Fire(event(TriggerType::AfterPlayMinion)),
                    Pending::Fire(event(TriggerType::AfterSummon)),
                ]
            }
            EntityKind::Spell if secret => {
                self.move_entity(card, ZoneType::Secret, ZonePosition::Top)?;
                vec![
                    Pending::Fire(event(TriggerType::PlayCard)),
                    Pending::Fire(event(TriggerType::CastSpell)),
                    Pending::Fire(event(TriggerType::AfterCast)),
                ]
            }
            EntityKind::Spell => {
                self.move_entity(card, ZoneType::SetAside, ZonePosition::Top)?;
                vec![
                    Pending::Fire(event(TriggerType::PlayCard)),
                    Pending::Fire(event(TriggerType::CastSpell)),
                    Pending::Run(exec),
                    Pending::Graveyard(card),
                    Pending::Fire(event(TriggerType::AfterCast)),
                ]
            }
            EntityKind::Weapon => {
                self.equip_weapon(player, card)?;
                vec![
                    Pending::Fire(event(TriggerType::PlayCard)),
                    Pending::Run(exec),
                    Pending::Fire(event(TriggerType::EquipWeapon)),
                ]
            }
            EntityKind::Hero | EntityKind::HeroPower => {
                return Err(GameError::contract(format!("{kind:?} {card} cannot be played from hand")));
            }
        };
        for item in items {
            self.queue.queue_action(item);
        }
        self.drain()
    }

    fn use_hero_power(&mut self, player: PlayerId, target: Option<EntityId>) -> Result<()> {
        let power = self.players[player].hero_power;
        let (cost, card) = {
            let entity = self.entity(power)?;
            (entity.cost(), entity.card)
        };
        self.players[player].spend_mana(cost);
        self.entity_mut(power)?.tags.set(GameTag::Exhausted, 1);

        let tasks = self
            .cards
            .def(card)
            .map(|def| def.power.tasks.clone())
            .unwrap_or_default();
        let ctx = TaskContext::new(player, power).with_target(target);
        debug!(%player, %power, ?target, "hero power");
        self.queue.queue_action(Pending::Run(Execution::new(tasks, ctx)));
        self.queue.queue_action(Pending::Fire(
            GameEvent::new(TriggerType::Inspire, player)
                .with_source(power)
                .with_target_opt(target),
        ));
        self.drain()
    }

    /// Replace opening cards: set them aside, draw as many, then shuffle
    /// them back so they cannot be redrawn.
    fn mulligan(&mut self, player: PlayerId, replace: Vec<EntityId>) -> Result<()> {
        let mut unique: Vec<EntityId> = Vec::with_capacity(replace.len());
        for id in replace {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        for &id in &unique {
            self.move_entity(id, ZoneType::SetAside, ZonePosition::Top)?;
        }
        for _ in &unique {
            self.draw_card(player)?;
        }
        for &id in &unique {
            let index = self.rng.gen_range_usize(0..self.zones.deck(player).len() + 1);
            self.move_entity(id, ZoneType::Deck, ZonePosition::Index(index))?;
        }
        debug!(%player, replaced = unique.len(), "mulligan");

        self.choices[player] = None;
        self.drain()?;
        if !self.has_pending_choice() && self.step == Step::BeginMulligan {
            self.begin_turns()?;
        }
        Ok(())
    }

    /// Take a discover option, resume the parked execution, then let the
    /// step machine run on when the choice came up outside `MainAction`.
    fn choose(&mut self, player: PlayerId, entity: EntityId) -> Result<()> {
        let choice = self.choices[player]
            .take()
            .ok_or_else(|| GameError::contract(format!("{player} has no pending choice")))?;

        for option in choice.options {
            if option == entity {
                if !self.move_entity(option, ZoneType::Hand, ZonePosition::Top)? {
                    self.move_entity(option, ZoneType::Graveyard, ZonePosition::Top)?;
                }
            } else {
                self.move_entity(option, ZoneType::Removed, ZonePosition::Top)?;
            }
        }
        debug!(%player, picked = %entity, "discover resolved");

        if let Some(exec) = self.suspended.take() {
            self.execute(exec)?;
        }
        self.drain()?;
        if self.config.auto_run && self.step != Step::Invalid && !self.step.is_begin() {
            self.run_to_decision()?;
        }
        Ok(())
    }
}
