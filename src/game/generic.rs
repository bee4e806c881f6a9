//! Generic game actions shared by tasks, steps and player actions.
//!
//! Every entity move goes through [`Game::move_entity`], which keeps zone
//! membership, recorded positions and trigger registration in step. Damage,
//! healing, drawing and summoning fire their events here, so a task never
//! has to remember to.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::auras::{clamp_health, Enchantment};
use crate::cards::{CardId, CardType};
use crate::core::{Entity, EntityId, EntityKind, GameTag, PlayerId};
use crate::error::{GameError, Result};
use crate::stack::Pending;
use crate::triggers::{GameEvent, TriggerType};
use crate::zones::{ZonePosition, ZoneType};

use super::game::Game;

impl Game {
    // === Zone moves ===

    /// Move an entity to a zone of its owner.
    ///
    /// Returns `Ok(false)` and leaves the entity where it was when the
    /// destination is full. Triggers are removed when the entity leaves the
    /// zone its trigger lives in and registered when it enters it.
    pub(crate) fn move_entity(&mut self, id: EntityId, to: ZoneType, position: ZonePosition) -> Result<bool> {
        let (owner, from, kind) = {
            let entity = self.entity(id)?;
            (entity.owner, entity.zone, entity.kind)
        };
        let uses_slot = to == ZoneType::Play && kind != EntityKind::Minion;
        if kind == EntityKind::Spell && to == ZoneType::Play {
            return Err(GameError::contract(format!("spell {id} cannot enter play")));
        }
        if !uses_slot && from != to {
            if let Some(zone) = self.zones.zone(owner, to) {
                if zone.is_full() {
                    return Ok(false);
                }
            }
        }

        self.leave_zone(id, to)?;

        if uses_slot {
            let record = &mut self.players[owner];
            match kind {
                EntityKind::Hero => record.hero = id,
                EntityKind::HeroPower => record.hero_power = id,
                EntityKind::Weapon => record.weapon = Some(id),
                EntityKind::Minion | EntityKind::Spell => {}
            }
            let entity = self.entity_mut(id)?;
            entity.zone = ZoneType::Play;
            entity.zone_position = 0;
        } else {
            match self.zones.insert(owner, to, id, position) {
                Some(_) => self.renumber(owner, to),
                None => {
                    let entity = self.entity_mut(id)?;
                    entity.zone = to;
                    entity.zone_position = 0;
                }
            }
        }

        trace!(entity = %id, ?from, ?to, "entity moved");
        self.register_triggers(id, to);
        Ok(true)
    }

    /// Take an entity out of wherever it is, leaving it outside every zone.
    ///
    /// A minion leaving play loses its enchantments and auras; going back to
    /// the hand or deck also resets it to its card.
    fn leave_zone(&mut self, id: EntityId, to: ZoneType) -> Result<()> {
        let (owner, from, kind) = {
            let entity = self.entity(id)?;
            (entity.owner, entity.zone, entity.kind)
        };

        if from == ZoneType::Play && kind != EntityKind::Minion {
            let record = &mut self.players[owner];
            if record.weapon == Some(id) {
                record.weapon = None;
            }
        } else if self.zones.remove(owner, from, id).is_some() {
            self.renumber(owner, from);
        }

        let trigger_zone = self.trigger_zone(id);
        if trigger_zone == Some(from) {
            self.triggers.remove_for_source(id);
        }

        if from == ZoneType::Play {
            for other in self.entities.values_mut() {
                let before = other.enchantments.len();
                other.enchantments.retain(|e| !(e.effect.linked && e.creator == id));
                if other.enchantments.len() != before {
                    trace!(entity = %other.id, creator = %id, "linked enchantments removed");
                }
            }
        }

        let cards = Arc::clone(&self.cards);
        let entity = self.entity_mut(id)?;
        if from == ZoneType::Play {
            entity.enchantments.clear();
            entity.aura = Default::default();
        }
        entity.zone = ZoneType::Invalid;
        entity.zone_position = 0;

        if from == ZoneType::Play && matches!(to, ZoneType::Hand | ZoneType::Deck) {
            if let Some(card) = cards.get(entity.card) {
                let mut fresh = Entity::new(id, entity.owner, card, kind);
                fresh.last_board_position = entity.last_board_position;
                *entity = fresh;
            }
        }
        Ok(())
    }

    /// Hand an entity to another player.
    ///
    /// The entity leaves its current container under the old owner first,
    /// so it is zoneless until the next move.
    pub(crate) fn set_owner(&mut self, id: EntityId, owner: PlayerId) -> Result<()> {
        if self.entity(id)?.owner == owner {
            return Ok(());
        }
        self.leave_zone(id, ZoneType::Invalid)?;
        self.entity_mut(id)?.owner = owner;
        trace!(entity = %id, %owner, "owner changed");
        Ok(())
    }

    /// Rewrite recorded positions of a container after an insert or remove.
    pub(crate) fn renumber(&mut self, owner: PlayerId, kind: ZoneType) {
        let ids = self.zones.entities(owner, kind).to_vec();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.zone = kind;
                entity.zone_position = index;
            }
        }
    }

    fn trigger_zone(&self, id: EntityId) -> Option<ZoneType> {
        let entity = self.entities.get(&id)?;
        self.cards
            .def(entity.card)
            .and_then(|def| def.power.trigger.as_ref())
            .map(|trigger| trigger.zone)
    }

    fn register_triggers(&mut self, id: EntityId, zone: ZoneType) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        if entity.tags.has(GameTag::Silenced) {
            return;
        }
        let owner = entity.owner;
        let Some(def) = self.cards.def(entity.card).and_then(|d| d.power.trigger.clone()) else {
            return;
        };
        if def.zone == zone {
            let trigger = self.triggers.register(id, owner, def);
            trace!(%trigger, entity = %id, "trigger registered");
        }
    }

    // === Events ===

    /// Match an event against the registry and queue every trigger it
    /// fires, in dispatch order.
    pub(crate) fn fire(&mut self, event: GameEvent) {
        let ids = self.triggers.find_triggers(&event, &*self);
        for id in ids {
            trace!(trigger = %id, event = ?event.trigger_type, "trigger queued");
            self.queue.queue_triggered(Pending::Trigger {
                id,
                event: event.clone(),
            });
        }
    }

    // === Damage and healing ===

    /// Deal damage from `source` to `target`. Returns the damage dealt.
    pub(crate) fn deal_damage(&mut self, source: EntityId, target: EntityId, amount: i32) -> Result<i32> {
        if amount <= 0 {
            return Ok(0);
        }
        let (poisonous, lifesteal, freeze, source_owner) = match self.entities.get(&source) {
            Some(s) => (
                s.has(GameTag::Poisonous),
                s.has(GameTag::Lifesteal),
                s.has(GameTag::Freeze),
                Some(s.owner),
            ),
            None => (false, false, false, None),
        };

        let entity = self.entity_mut(target)?;
        if entity.has(GameTag::Immune) {
            return Ok(0);
        }
        if entity.has(GameTag::DivineShield) {
            entity.tags.set(GameTag::DivineShield, 0);
            entity.enchantments.iter_mut().for_each(|e| e.effect.grants.retain(|&t| t != GameTag::DivineShield));
            debug!(entity = %target, "divine shield absorbed damage");
            return Ok(0);
        }

        let mut remaining = amount;
        if entity.kind == EntityKind::Hero {
            let armor = entity.armor();
            let absorbed = armor.min(remaining);
            entity.tags.set(GameTag::Armor, armor - absorbed);
            remaining -= absorbed;
        }
        if remaining > 0 {
            entity.tags.add(GameTag::Damage, remaining);
        }
        if poisonous && entity.kind == EntityKind::Minion && remaining > 0 {
            entity.destroyed = true;
        }
        if freeze {
            entity.tags.set(GameTag::Frozen, 1);
        }
        let target_owner = entity.owner;
        debug!(%source, %target, amount, "damage dealt");

        if lifesteal {
            if let Some(owner) = source_owner {
                let hero = self.players[owner].hero;
                self.heal_entity(source, hero, amount)?;
            }
        }
        if remaining > 0 {
            let player = source_owner.unwrap_or(target_owner);
            self.fire(
                GameEvent::new(TriggerType::TakeDamage, target_owner)
                    .with_source(source)
                    .with_target(target)
                    .with_amount(remaining),
            );
            self.fire(
                GameEvent::new(TriggerType::DealDamage, player)
                    .with_source(source)
                    .with_target(target)
                    .with_amount(remaining),
            );
        }
        Ok(amount)
    }

    /// Restore health, never above the maximum. Returns the amount healed.
    pub(crate) fn heal_entity(&mut self, source: EntityId, target: EntityId, amount: i32) -> Result<i32> {
        let entity = self.entity_mut(target)?;
        let healed = amount.min(entity.damage()).max(0);
        if healed == 0 {
            return Ok(0);
        }
        entity.tags.add(GameTag::Damage, -healed);
        let owner = entity.owner;
        debug!(%source, %target, healed, "healed");
        self.fire(
            GameEvent::new(TriggerType::Heal, owner)
                .with_source(source)
                .with_target(target)
                .with_amount(healed),
        );
        Ok(healed)
    }

    // === Cards ===

    /// Draw the top card of a player's deck.
    ///
    /// An empty deck deals increasing fatigue damage; a full hand burns the
    /// card.
    pub(crate) fn draw_card(&mut self, player: PlayerId) -> Result<Option<EntityId>> {
        let Some(top) = self.zones.deck(player).last().copied() else {
            let fatigue = self.players[player].tags.add(GameTag::Fatigue, 1);
            let hero = self.players[player].hero;
            debug!(%player, fatigue, "fatigue");
            self.deal_damage(hero, hero, fatigue)?;
            return Ok(None);
        };

        if !self.move_entity(top, ZoneType::Hand, ZonePosition::Top)? {
            debug!(%player, card = %top, "hand full, card burned");
            self.move_entity(top, ZoneType::Graveyard, ZonePosition::Top)?;
            return Ok(None);
        }
        self.fire(GameEvent::new(TriggerType::DrawCard, player).with_source(top));
        Ok(Some(top))
    }

    /// Put a minion onto its owner's field without firing summon events.
    ///
    /// `index` is the field slot; `None` is the rightmost.
    pub(crate) fn place_minion(&mut self, id: EntityId, index: Option<usize>) -> Result<bool> {
        let position = index.map_or(ZonePosition::Top, ZonePosition::Index);
        if !self.move_entity(id, ZoneType::Play, position)? {
            return Ok(false);
        }
        let entity = self.entity_mut(id)?;
        entity.tags.set(GameTag::Exhausted, 1);
        entity.tags.set(GameTag::NumAttacksThisTurn, 0);
        entity.tags.set(GameTag::NumTurnsInPlay, 0);
        Ok(true)
    }

    /// Summon a minion and fire `Summon` then `AfterSummon`.
    pub(crate) fn summon_entity(&mut self, id: EntityId, index: Option<usize>) -> Result<bool> {
        if !self.place_minion(id, index)? {
            debug!(entity = %id, "board full, summon skipped");
            return Ok(false);
        }
        let owner = self.entity(id)?.owner;
        debug!(entity = %id, %owner, "summoned");
        self.fire(GameEvent::new(TriggerType::Summon, owner).with_source(id));
        self.queue
            .queue_triggered(Pending::Fire(GameEvent::new(TriggerType::AfterSummon, owner).with_source(id)));
        Ok(true)
    }

    /// Mark an entity for removal at the next death-processing step.
    pub(crate) fn destroy_entity(&mut self, id: EntityId) -> Result<()> {
        self.entity_mut(id)?.destroyed = true;
        Ok(())
    }

    pub(crate) fn freeze(&mut self, id: EntityId) -> Result<()> {
        self.entity_mut(id)?.tags.set(GameTag::Frozen, 1);
        Ok(())
    }

    /// Remove keywords, enchantments and triggers.
    pub(crate) fn silence(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entity_mut(id)?;
        let (old_max, old_health) = (entity.max_health(), entity.health());
        for tag in GameTag::SILENCEABLE {
            entity.tags.set(tag, 0);
        }
        entity.enchantments.clear();
        entity.tags.set(GameTag::Silenced, 1);
        clamp_health(entity, old_max, old_health);
        let removed = self.triggers.remove_for_source(id);
        debug!(entity = %id, triggers = removed, "silenced");
        Ok(())
    }

    /// Equip a weapon; a previous weapon goes to the graveyard.
    pub(crate) fn equip_weapon(&mut self, player: PlayerId, id: EntityId) -> Result<()> {
        if let Some(old) = self.players[player].weapon {
            self.move_entity(old, ZoneType::Graveyard, ZonePosition::Top)?;
            self.fire(GameEvent::new(TriggerType::Death, player).with_source(old));
        }
        self.set_owner(id, player)?;
        self.move_entity(id, ZoneType::Play, ZonePosition::Top)?;
        debug!(weapon = %id, %player, "weapon equipped");
        Ok(())
    }

    /// Attach an enchantment card to an entity.
    pub(crate) fn add_enchantment(&mut self, target: EntityId, card: CardId, creator: EntityId) -> Result<()> {
        let cards = Arc::clone(&self.cards);
        let record = cards
            .get(card)
            .ok_or_else(|| GameError::contract(format!("unknown {card}")))?;
        if record.card_type != CardType::Enchantment {
            return Err(GameError::contract(format!("{} is not an enchantment", record.code)));
        }
        let effect = cards
            .def(card)
            .and_then(|def| def.power.enchant.clone())
            .ok_or_else(|| GameError::contract(format!("enchantment {} has no effect", record.code)))?;

        let entity = self.entity_mut(target)?;
        let (old_max, old_health) = (entity.max_health(), entity.health());
        entity.enchantments.push(Enchantment::new(card, creator, effect));
        clamp_health(entity, old_max, old_health);
        debug!(%target, code = %record.code, "enchantment added");
        Ok(())
    }

    /// Expire this-turn enchantments everywhere.
    pub(crate) fn expire_enchantments(&mut self) {
        for entity in self.entities.values_mut() {
            if entity.enchantments.iter().any(|e| e.effect.one_turn) {
                let (old_max, old_health) = (entity.max_health(), entity.health());
                entity.enchantments.retain(|e| !e.effect.one_turn);
                clamp_health(entity, old_max, old_health);
            }
        }
    }

    /// Replace an entity with another card in place.
    ///
    /// The id, owner, zone and position are kept; tags, enchantments and
    /// triggers come from the new card.
    pub(crate) fn transform(&mut self, id: EntityId, card: CardId) -> Result<()> {
        let cards = Arc::clone(&self.cards);
        let record = cards
            .get(card)
            .ok_or_else(|| GameError::contract(format!("unknown {card}")))?;
        let kind = EntityKind::from_card_type(record.card_type)
            .ok_or_else(|| GameError::contract(format!("cannot transform into {}", record.code)))?;

        let old = self.entity(id)?;
        if old.kind != kind {
            return Err(GameError::contract(format!("cannot transform {:?} {id} into {:?}", old.kind, kind)));
        }
        let mut fresh = Entity::new(id, old.owner, record, kind);
        fresh.zone = old.zone;
        fresh.zone_position = old.zone_position;
        fresh.last_board_position = old.last_board_position;
        fresh.tags.set(GameTag::Exhausted, old.tags.get(GameTag::Exhausted));
        let zone = old.zone;

        self.triggers.remove_for_source(id);
        self.entities.insert(id, fresh);
        self.register_triggers(id, zone);
        debug!(entity = %id, code = %record.code, "transformed");
        Ok(())
    }

    /// Swap a player's hero and hero power, optionally equipping a weapon.
    pub(crate) fn replace_hero(
        &mut self,
        player: PlayerId,
        hero: CardId,
        power: CardId,
        weapon: Option<CardId>,
    ) -> Result<()> {
        let old_hero = self.players[player].hero;
        let old_power = self.players[player].hero_power;

        let new_hero = self.create_entity(player, hero)?;
        self.move_entity(old_hero, ZoneType::Removed, ZonePosition::Top)?;
        self.move_entity(new_hero, ZoneType::Play, ZonePosition::Top)?;

        let new_power = self.create_entity(player, power)?;
        self.move_entity(old_power, ZoneType::Removed, ZonePosition::Top)?;
        self.move_entity(new_power, ZoneType::Play, ZonePosition::Top)?;

        if let Some(card) = self.cards.get(hero) {
            self.players[player].class = card.class;
        }
        if let Some(weapon) = weapon {
            let id = self.create_entity(player, weapon)?;
            self.equip_weapon(player, id)?;
        }
        debug!(%player, hero = %new_hero, power = %new_power, "hero replaced");
        Ok(())
    }

    /// Gain mana crystals, capped at the configured maximum.
    pub(crate) fn gain_mana(&mut self, player: PlayerId, amount: i32, fill: bool) {
        let cap = self.config.max_mana;
        let record = &mut self.players[player];
        let before = record.total_mana();
        let after = (before + amount).clamp(0, cap);
        record.set_total_mana(after);
        if !fill && after > before {
            record.tags.add(GameTag::ResourcesUsed, after - before);
        }
    }
}
