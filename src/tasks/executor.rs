//! The task interpreter.
//!
//! [`Game::execute`] runs an [`Execution`] one task at a time. Control tasks
//! push nested frames instead of recursing, so a `Discover` deep inside a
//! `Flag` can park the whole execution and pick up at the next task once
//! the player has chosen.
//!
//! After every task the aura pass runs, so the next task reads up-to-date
//! derived stats. Deaths are not processed here; destroyed and zero-health
//! entities stay queryable until the enclosing queue item completes.

use std::sync::Arc;

use tracing::debug;

use crate::cards::{CardClass, CardType, Race};
use crate::core::{EntityId, EntityKind, GameTag, PlayerId};
use crate::error::{GameError, Result};
use crate::game::{Choice, ChoiceKind, Game};
use crate::stack::Pending;
use crate::triggers::{ConditionEvaluator, GameEvent, TriggerType};
use crate::zones::{ZonePosition, ZoneType};

use super::context::Execution;
use super::targeting::EntityType;
use super::task::{SummonSide, Task, TaskStatus};

/// Number of options a discover offers.
const DISCOVER_OPTIONS: usize = 3;

impl Game {
    /// Run an execution until it finishes, stops at top level, or suspends.
    ///
    /// `Stop` ends the innermost list only; the enclosing list continues.
    /// On `Suspended` the execution is stored in the game and resumed by the
    /// player's choice.
    pub fn execute(&mut self, mut exec: Execution) -> Result<TaskStatus> {
        loop {
            if self.is_over() {
                return Ok(TaskStatus::Complete);
            }
            let Some(frame) = exec.frames.last_mut() else {
                return Ok(TaskStatus::Complete);
            };
            let Some(task) = frame.tasks.get(frame.next).cloned() else {
                exec.frames.pop();
                continue;
            };
            frame.next += 1;

            let status = self.run_task(&task, &mut exec)?;
            self.update_auras();

            match status {
                TaskStatus::Complete => {}
                TaskStatus::Stop => {
                    debug!(source = %exec.ctx.source, "task list stopped");
                    exec.frames.pop();
                }
                TaskStatus::Suspended => {
                    self.suspended = Some(exec);
                    return Ok(TaskStatus::Suspended);
                }
            }
        }
    }

    fn run_task(&mut self, task: &Task, exec: &mut Execution) -> Result<TaskStatus> {
        let controller = exec.ctx.controller;
        let source = exec.ctx.source;

        match task {
            // === Control ===
            Task::Condition {
                entity_type,
                condition,
            } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                exec.stack.flag = ConditionEvaluator::new(self, controller, source).check_all(condition, &ids);
            }

            Task::Guard {
                entity_type,
                condition,
            } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                if !ConditionEvaluator::new(self, controller, source).check_all(condition, &ids) {
                    return Ok(TaskStatus::Stop);
                }
            }

            Task::Flag { value, tasks } => {
                if exec.stack.flag == *value {
                    exec.push(tasks.clone());
                }
            }

            Task::Sequence(tasks) => exec.push(tasks.clone()),

            Task::Repeat { times, tasks } => {
                let expanded: Vec<Task> = (0..*times).flat_map(|_| tasks.iter().cloned()).collect();
                exec.push(expanded);
            }

            // === Stack ===
            Task::Include(entity_type) => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                exec.stack.entities = ids.to_vec();
            }

            Task::FilterStack(condition) => {
                let evaluator = ConditionEvaluator::new(self, controller, source);
                let kept: Vec<EntityId> = exec
                    .stack
                    .entities
                    .iter()
                    .copied()
                    .filter(|&id| evaluator.check(condition, id))
                    .collect();
                exec.stack.entities = kept;
            }

            Task::RandomPick(n) => {
                if exec.stack.entities.is_empty() {
                    return Ok(TaskStatus::Stop);
                }
                let picks = self.rng.sample_indices(exec.stack.entities.len(), *n);
                exec.stack.entities = picks.into_iter().map(|i| exec.stack.entities[i]).collect();
            }

            Task::GetGameTag { entity_type, tag } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                let Some(&first) = ids.first() else {
                    return Ok(TaskStatus::Stop);
                };
                exec.stack.number = self.tag_value(first, *tag)?;
            }

            Task::MathAdd(n) => exec.stack.number = exec.stack.number.saturating_add(*n),
            Task::MathMultiply(n) => exec.stack.number = exec.stack.number.saturating_mul(*n),

            // === Damage and health ===
            Task::Damage {
                entity_type,
                amount,
                spell_damage,
            } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                let amount = self.boosted_damage(controller, source, *amount, *spell_damage);
                for id in ids {
                    self.deal_damage(source, id, amount)?;
                }
            }

            Task::DamageNumber {
                entity_type,
                spell_damage,
            } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                let amount = self.boosted_damage(controller, source, exec.stack.number, *spell_damage);
                for id in ids {
                    self.deal_damage(source, id, amount)?;
                }
            }

            Task::Heal { entity_type, amount } => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                for id in ids {
                    self.heal_entity(source, id, *amount)?;
                }
            }

            Task::HealNumber(entity_type) => {
                let ids = self.resolve(*entity_type, &exec.ctx, &exec.stack)?;
                let amount = exec.stack.number;
                for id in ids {
                    self.heal_entity(source, id, amount)?;
                }
            }

            Task::Armor(amount) => {
                let hero = self.players[controller].hero;
                self.entity_mut(hero)?.tags.add(GameTag::Armor, *amount);
            }

            // === Removal and status ===
            Task::Destroy(entity_type) => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.destroy_entity(id)?;
                }
            }

            Task::Freeze(entity_type) => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.freeze(id)?;
                }
            }

            Task::Silence(entity_type) => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.silence(id)?;
                }
            }

            Task::Attack => {
                let defender = exec
                    .ctx
                    .target
                    .ok_or_else(|| GameError::contract(format!("attack by {source} without a defender")))?;
                return self.resolve_attack(source, defender);
            }

            // === Card creation ===
            Task::Draw(count) => {
                for _ in 0..*count {
                    self.draw_card(controller)?;
                }
            }

            Task::AddCard {
                code,
                zone,
                count,
                opposite,
            } => {
                let card = self.card_by_code(code)?;
                let owner = if *opposite { controller.opponent() } else { controller };
                for _ in 0..*count {
                    let id = self.create_entity(owner, card)?;
                    let placed = match zone {
                        ZoneType::Play => self.summon_entity(id, None)?,
                        ZoneType::Deck => {
                            let len = self.zones.deck(owner).len();
                            let index = self.rng.gen_range_usize(0..len + 1);
                            self.move_entity(id, ZoneType::Deck, ZonePosition::Index(index))?
                        }
                        other => self.move_entity(id, *other, ZonePosition::Top)?,
                    };
                    if !placed {
                        self.move_entity(id, ZoneType::Removed, ZonePosition::Top)?;
                    }
                }
            }

            Task::Summon { code, side } => {
                let card = self.card_by_code(code)?;
                if self.field_is_full(controller) {
                    return Ok(TaskStatus::Complete);
                }
                let index = self.summon_index(controller, source, *side);
                let id = self.create_entity(controller, card)?;
                self.summon_entity(id, index)?;
            }

            // === Moves ===
            Task::ReturnHand(entity_type) => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    let entity = self.entity(id)?;
                    if entity.is_dead() || entity.kind != EntityKind::Minion {
                        continue;
                    }
                    if !self.move_entity(id, ZoneType::Hand, ZonePosition::Top)? {
                        self.move_entity(id, ZoneType::Graveyard, ZonePosition::Top)?;
                    }
                }
            }

            Task::MoveTo { entity_type, zone } => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.move_entity(id, *zone, ZonePosition::Top)?;
                }
            }

            Task::Transform { entity_type, code } => {
                let card = self.card_by_code(code)?;
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.transform(id, card)?;
                }
            }

            // === Random generation ===
            Task::RandomCard {
                entity_type,
                card_type,
                card_class,
                race,
                opposite,
            } => {
                let class = match entity_type {
                    EntityType::Hero => self.players[controller].class,
                    EntityType::EnemyHero => self.players[controller.opponent()].class,
                    EntityType::Invalid => *card_class,
                    other => {
                        return Err(GameError::contract(format!("random card cannot take a class from {other:?}")));
                    }
                };
                if class == CardClass::Invalid {
                    return Err(GameError::contract("random card has no class to draw from"));
                }
                let pool = self.random_card_pool(class, *card_type, *race);
                let Some(&card) = self.rng.choose(&pool) else {
                    return Ok(TaskStatus::Stop);
                };
                let owner = if *opposite { controller.opponent() } else { controller };
                let id = self.create_entity(owner, card)?;
                self.move_entity(id, ZoneType::SetAside, ZonePosition::Top)?;
                exec.stack.playables.push(id);
            }

            Task::RandomEntourage { count, exclude_in_play } => {
                let source_card = self.entity(source)?.card;
                let cards = Arc::clone(&self.cards);
                let entourage = cards
                    .get(source_card)
                    .map(|c| c.entourages.as_slice())
                    .unwrap_or_default();

                let mut pool = Vec::new();
                for code in entourage {
                    let card = self.card_by_code(code)?;
                    let on_field = self
                        .zones
                        .field(controller)
                        .iter()
                        .any(|id| self.entities.get(id).is_some_and(|e| e.card == card));
                    if !(*exclude_in_play && on_field) {
                        pool.push(card);
                    }
                }
                if pool.is_empty() {
                    return Ok(TaskStatus::Stop);
                }
                for index in self.rng.sample_indices(pool.len(), *count) {
                    let id = self.create_entity(controller, pool[index])?;
                    self.move_entity(id, ZoneType::SetAside, ZonePosition::Top)?;
                    exec.stack.playables.push(id);
                }
            }

            Task::AddStackTo(entity_type) => {
                let playables = std::mem::take(&mut exec.stack.playables);
                for id in playables {
                    self.add_stack_entity(id, *entity_type, controller)?;
                }
            }

            Task::Discover { card_type, race } => {
                let class = self.players[controller].class;
                let pool = self.class_pool(class, *card_type, *race);
                if pool.is_empty() {
                    return Ok(TaskStatus::Stop);
                }
                let mut options = Vec::with_capacity(DISCOVER_OPTIONS);
                for index in self.rng.sample_indices(pool.len(), DISCOVER_OPTIONS) {
                    let id = self.create_entity(controller, pool[index])?;
                    self.move_entity(id, ZoneType::SetAside, ZonePosition::Top)?;
                    options.push(id);
                }
                debug!(player = %controller, ?options, "discover offered");
                self.choices[controller] = Some(Choice::new(controller, ChoiceKind::Discover, options));
                return Ok(TaskStatus::Suspended);
            }

            // === Equipment and hero ===
            Task::Weapon(code) => {
                let card = self.card_by_code(code)?;
                let id = self.create_entity(controller, card)?;
                self.equip_weapon(controller, id)?;
                self.fire(GameEvent::new(TriggerType::EquipWeapon, controller).with_source(id));
            }

            Task::ReplaceHero { hero, power, weapon } => {
                let hero = self.card_by_code(hero)?;
                let power = self.card_by_code(power)?;
                let weapon = weapon.as_deref().map(|code| self.card_by_code(code)).transpose()?;
                self.replace_hero(controller, hero, power, weapon)?;
                let entity = self.entity(source)?;
                if entity.kind == EntityKind::Minion && entity.in_play() {
                    self.move_entity(source, ZoneType::Removed, ZonePosition::Top)?;
                }
            }

            // === Tags, enchantments, mana ===
            Task::SetGameTag {
                entity_type,
                tag,
                value,
            } => {
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.entity_mut(id)?.tags.set(*tag, *value);
                }
            }

            Task::SetPlayerGameTag { tag, value } => {
                self.players[controller].tags.set(*tag, *value);
            }

            Task::AddEnchantment { code, entity_type } => {
                let card = self.card_by_code(code)?;
                for id in self.resolve(*entity_type, &exec.ctx, &exec.stack)? {
                    self.add_enchantment(id, card, source)?;
                }
            }

            Task::ManaCrystal { amount, fill } => self.gain_mana(controller, *amount, *fill),

            Task::TempMana(amount) => {
                let tags = &mut self.players[controller].tags;
                let cap = self.config.max_mana;
                let temp = (tags.get(GameTag::TempResources) + amount).min(cap);
                tags.set(GameTag::TempResources, temp);
            }
        }

        Ok(TaskStatus::Complete)
    }

    /// Spell damage applies to spells and to hero powers' own bonus tag.
    fn boosted_damage(&self, controller: PlayerId, source: EntityId, amount: i32, spell_damage: bool) -> i32 {
        let kind = self.entities.get(&source).map(|e| e.kind);
        let mut total = amount;
        if spell_damage {
            total += self.spell_damage(controller);
        }
        if kind == Some(EntityKind::HeroPower) {
            total += self.players[controller].tags.get(GameTag::HeroPowerDamage);
        }
        total
    }

    /// Read a tag, using derived values for the stat tags.
    fn tag_value(&self, id: EntityId, tag: GameTag) -> Result<i32> {
        let attack = self.attack_of(id);
        let entity = self.entity(id)?;
        Ok(match tag {
            GameTag::Atk => attack,
            GameTag::Health => entity.health(),
            GameTag::Cost => entity.cost(),
            other => entity.tags.get(other),
        })
    }

    fn summon_index(&self, controller: PlayerId, source: EntityId, side: SummonSide) -> Option<usize> {
        let field = self.zones.field(controller);
        let on_field = field.iter().position(|&id| id == source);
        match side {
            SummonSide::Default => None,
            SummonSide::Right => on_field.map(|pos| pos + 1),
            SummonSide::Left => on_field,
            SummonSide::InPlace => self.entities.get(&source).map(|e| e.last_board_position),
        }
    }

    fn add_stack_entity(&mut self, id: EntityId, entity_type: EntityType, controller: PlayerId) -> Result<()> {
        let placed = match entity_type {
            EntityType::Hand => {
                self.set_owner(id, controller)?;
                self.move_entity(id, ZoneType::Hand, ZonePosition::Top)?
            }
            EntityType::EnemyHand => {
                self.set_owner(id, controller.opponent())?;
                self.move_entity(id, ZoneType::Hand, ZonePosition::Top)?
            }
            EntityType::Deck => {
                self.set_owner(id, controller)?;
                let len = self.zones.deck(controller).len();
                let index = self.rng.gen_range_usize(0..len + 1);
                self.move_entity(id, ZoneType::Deck, ZonePosition::Index(index))?
            }
            EntityType::Minions => {
                self.set_owner(id, controller)?;
                if self.entity(id)?.kind != EntityKind::Minion {
                    return Err(GameError::contract(format!("{id} is not a minion and cannot be summoned")));
                }
                self.summon_entity(id, None)?
            }
            other => {
                return Err(GameError::contract(format!("cannot add stack entities to {other:?}")));
            }
        };
        if !placed {
            self.move_entity(id, ZoneType::Removed, ZonePosition::Top)?;
        }
        Ok(())
    }

    /// Collectible cards of a class plus neutrals in the match format.
    pub(crate) fn class_pool(&self, class: CardClass, card_type: CardType, race: Race) -> Vec<crate::cards::CardId> {
        self.cards
            .pool(self.config.format)
            .filter(|c| c.class == class || c.class == CardClass::Neutral)
            .filter(|c| match card_type {
                CardType::Invalid => matches!(c.card_type, CardType::Minion | CardType::Spell | CardType::Weapon),
                wanted => c.card_type == wanted,
            })
            .filter(|c| race == Race::Invalid || (c.race != Race::Invalid && c.race.matches(race)))
            .map(|c| c.id)
            .collect()
    }

    /// Collectible cards of exactly one class, type and race in the match format.
    fn random_card_pool(&self, class: CardClass, card_type: CardType, race: Race) -> Vec<crate::cards::CardId> {
        self.cards
            .pool(self.config.format)
            .filter(|c| c.class == class)
            .filter(|c| match card_type {
                CardType::Invalid => matches!(c.card_type, CardType::Minion | CardType::Spell | CardType::Weapon),
                wanted => c.card_type == wanted,
            })
            .filter(|c| race == Race::Invalid || c.race == race)
            .map(|c| c.id)
            .collect()
    }

    /// Queue a task list to run after the current queue item.
    pub(crate) fn queue_tasks(&mut self, exec: Execution) {
        self.queue.queue_triggered(Pending::Run(exec));
    }
}
