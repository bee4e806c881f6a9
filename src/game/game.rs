//! The match aggregate.
//!
//! `Game` owns everything a match mutates: the entity arena, the zones, the
//! trigger registry, the pending queue, the RNG and the two player records.
//! The card registry is shared read-only behind an `Arc`, so many matches
//! can run side by side from one set of card data.
//!
//! ## Lifecycle
//!
//! ```text
//! Game::new(config, cards)  build heroes and decks
//! game.start()              opening steps, up to the first decision point
//! game.process(player, a)   validate, run to the next decision point
//! ```

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::{info, trace};

use crate::cards::{Card, CardClass, CardId, CardRegistry, CardType};
use crate::core::{
    ActionRecord, Entity, EntityId, EntityKind, GameConfig, GameRng, PlayState, Player, PlayerId, PlayerMap,
    StartPlayer,
};
use crate::error::{GameError, Result};
use crate::stack::TaskQueue;
use crate::tasks::Execution;
use crate::triggers::TriggerRegistry;
use crate::zones::{ZoneManager, ZonePosition, ZoneType};

use super::choice::Choice;
use super::phase::Step;

/// One match.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) cards: Arc<CardRegistry>,
    pub(crate) rng: GameRng,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) entities: FxHashMap<EntityId, Entity>,
    pub(crate) zones: ZoneManager,
    pub(crate) triggers: TriggerRegistry,
    pub(crate) queue: TaskQueue,
    pub(crate) choices: PlayerMap<Option<Choice>>,
    /// Execution parked on a pending choice.
    pub(crate) suspended: Option<Execution>,
    pub(crate) step: Step,
    pub(crate) current_player: PlayerId,
    pub(crate) first_player: PlayerId,
    pub(crate) turn: u32,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) next_entity: u32,
}

impl Game {
    /// Build a match: heroes, hero powers and decks, nothing drawn yet.
    ///
    /// Fails with `GameError::Config` when the config is invalid, a class
    /// has no default hero, or a deck names an unknown card.
    pub fn new(config: GameConfig, cards: Arc<CardRegistry>) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let first_player = match config.start_player {
            StartPlayer::Fixed(player) => player,
            StartPlayer::Random => PlayerId::new(rng.gen_range(0..2) as u8),
        };

        let mut game = Self {
            players: PlayerMap::new(|p| Player::new(p, config.classes[p])),
            zones: ZoneManager::new(&config),
            config,
            cards,
            rng,
            entities: FxHashMap::default(),
            triggers: TriggerRegistry::new(),
            queue: TaskQueue::new(),
            choices: PlayerMap::with_default(),
            suspended: None,
            step: Step::Invalid,
            current_player: first_player,
            first_player,
            turn: 0,
            history: Vector::new(),
            next_entity: EntityId::FIRST_CARD,
        };

        for player in PlayerId::all() {
            game.setup_hero(player)?;
            game.setup_deck(player)?;
        }
        if let Some(coin) = &game.config.coin {
            if game.cards.by_code(coin).is_none() {
                return Err(GameError::Config(format!("unknown coin card {coin}")));
            }
        }

        info!(seed = game.config.seed, first = %first_player, "game created");
        Ok(game)
    }

    fn setup_hero(&mut self, player: PlayerId) -> Result<()> {
        let class = self.players[player].class;
        let hero = self
            .cards
            .default_hero(class)
            .ok_or_else(|| GameError::Config(format!("no default hero for {class:?}")))?;
        let power_code = hero
            .hero_power
            .as_deref()
            .ok_or_else(|| GameError::Config(format!("hero {} has no hero power", hero.code)))?;
        let power = self
            .cards
            .by_code(power_code)
            .ok_or_else(|| GameError::Config(format!("unknown hero power {power_code}")))?;
        let (hero, power) = (hero.id, power.id);

        let hero = self.create_entity(player, hero)?;
        self.move_entity(hero, ZoneType::Play, ZonePosition::Top)?;
        let power = self.create_entity(player, power)?;
        self.move_entity(power, ZoneType::Play, ZonePosition::Top)?;
        Ok(())
    }

    fn setup_deck(&mut self, player: PlayerId) -> Result<()> {
        let codes = self.config.decks[player].clone();
        for code in &codes {
            let card = self
                .cards
                .by_code(code)
                .ok_or_else(|| GameError::Config(format!("unknown card {code} in deck of {player}")))?
                .id;
            let id = self.create_entity(player, card)?;
            self.move_entity(id, ZoneType::Deck, ZonePosition::Top)?;
        }

        if self.config.fill_decks {
            let class = self.players[player].class;
            let pool = self.class_pool(class, CardType::Invalid, crate::cards::Race::Invalid);
            if pool.is_empty() && codes.len() < self.config.deck_size {
                return Err(GameError::Config(format!("no cards to fill the deck of {player}")));
            }
            while self.zones.deck(player).len() < self.config.deck_size {
                let card = pool[self.rng.gen_range_usize(0..pool.len())];
                let id = self.create_entity(player, card)?;
                self.move_entity(id, ZoneType::Deck, ZonePosition::Top)?;
            }
        }
        Ok(())
    }

    // === Entities ===

    /// Allocate an entity for a card, outside every zone.
    pub(crate) fn create_entity(&mut self, owner: PlayerId, card: CardId) -> Result<EntityId> {
        let cards = Arc::clone(&self.cards);
        let card = cards
            .get(card)
            .ok_or_else(|| GameError::contract(format!("unknown {card}")))?;
        let kind = EntityKind::from_card_type(card.card_type)
            .ok_or_else(|| GameError::contract(format!("{} cannot be instantiated", card.code)))?;

        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(id, Entity::new(id, owner, card, kind));
        trace!(entity = %id, code = %card.code, %owner, "entity created");
        Ok(id)
    }

    /// Look up an entity; unknown ids are a contract violation.
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities
            .get(&id)
            .ok_or_else(|| GameError::contract(format!("unknown {id}")))
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .get_mut(&id)
            .ok_or_else(|| GameError::contract(format!("unknown {id}")))
    }

    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// The card record behind an entity.
    #[must_use]
    pub fn card_of(&self, id: EntityId) -> Option<&Card> {
        self.entities.get(&id).and_then(|e| self.cards.get(e.card))
    }

    pub(crate) fn card_by_code(&self, code: &str) -> Result<CardId> {
        self.cards
            .by_code(code)
            .map(|c| c.id)
            .ok_or_else(|| GameError::contract(format!("unknown card code {code}")))
    }

    /// Attack of a character; a hero adds its equipped weapon.
    #[must_use]
    pub fn attack_of(&self, id: EntityId) -> i32 {
        let Some(entity) = self.entities.get(&id) else {
            return 0;
        };
        let weapon = match entity.kind {
            EntityKind::Hero => self.players[entity.owner]
                .weapon
                .and_then(|w| self.entities.get(&w))
                .map_or(0, Entity::attack),
            _ => 0,
        };
        entity.attack() + weapon
    }

    /// Current health, 0 for unknown entities.
    #[must_use]
    pub fn health_of(&self, id: EntityId) -> i32 {
        self.entities.get(&id).map_or(0, Entity::health)
    }

    // === Players and zones ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn hero(&self, player: PlayerId) -> EntityId {
        self.players[player].hero
    }

    #[must_use]
    pub fn hero_power(&self, player: PlayerId) -> EntityId {
        self.players[player].hero_power
    }

    #[must_use]
    pub fn weapon(&self, player: PlayerId) -> Option<EntityId> {
        self.players[player].weapon
    }

    #[must_use]
    pub fn field(&self, player: PlayerId) -> &[EntityId] {
        self.zones.field(player)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[EntityId] {
        self.zones.hand(player)
    }

    #[must_use]
    pub fn deck(&self, player: PlayerId) -> &[EntityId] {
        self.zones.deck(player)
    }

    #[must_use]
    pub fn graveyard(&self, player: PlayerId) -> &[EntityId] {
        self.zones.entities(player, ZoneType::Graveyard)
    }

    #[must_use]
    pub fn secrets(&self, player: PlayerId) -> &[EntityId] {
        self.zones.entities(player, ZoneType::Secret)
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    pub(crate) fn field_is_full(&self, player: PlayerId) -> bool {
        self.zones
            .zone(player, ZoneType::Play)
            .is_some_and(|zone| zone.is_full())
    }

    /// Total spell damage on the player's side.
    #[must_use]
    pub fn spell_damage(&self, player: PlayerId) -> i32 {
        self.zones
            .field(player)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .map(|e| e.tags.get(crate::core::GameTag::SpellPower))
            .sum()
    }

    // === Match state ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn play_state(&self, player: PlayerId) -> PlayState {
        self.players[player].play_state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.step == Step::FinalGameOver
    }

    /// The choice a player must answer, if any.
    #[must_use]
    pub fn pending_choice(&self, player: PlayerId) -> Option<&Choice> {
        self.choices[player].as_ref()
    }

    #[must_use]
    pub fn has_pending_choice(&self) -> bool {
        self.choices.iter().any(|(_, c)| c.is_some())
    }

    /// Entities in the arena, in id order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // === Harness helpers ===

    /// Put a new copy of a card into a player's hand.
    pub fn give_card(&mut self, player: PlayerId, code: &str) -> Result<EntityId> {
        let card = self.card_by_code(code)?;
        let id = self.create_entity(player, card)?;
        if !self.move_entity(id, ZoneType::Hand, ZonePosition::Top)? {
            self.move_entity(id, ZoneType::Graveyard, ZonePosition::Top)?;
        }
        Ok(id)
    }

    /// Set a player's mana crystals and refill them.
    pub fn set_mana(&mut self, player: PlayerId, total: i32) {
        let record = &mut self.players[player];
        record.set_total_mana(total);
        record.set_used_mana(0);
        record.tags.set(crate::core::GameTag::OverloadLocked, 0);
    }

    /// The hero card a class starts with.
    #[must_use]
    pub fn default_hero_card(&self, class: CardClass) -> Option<&Card> {
        self.cards.default_hero(class)
    }

    /// Verify every entity's zone and position against the containers.
    pub fn check_zone_consistency(&self) -> Result<()> {
        for player in PlayerId::all() {
            for kind in ZoneManager::CONTAINERS {
                for (index, &id) in self.zones.entities(player, kind).iter().enumerate() {
                    let entity = self.entity(id)?;
                    if entity.zone != kind || entity.zone_position != index || entity.owner != player {
                        return Err(GameError::contract(format!(
                            "{id} is at {kind:?}[{index}] of {player} but records {:?}[{}] of {}",
                            entity.zone, entity.zone_position, entity.owner
                        )));
                    }
                }
            }

            let record = &self.players[player];
            let slots = [Some(record.hero), Some(record.hero_power), record.weapon];
            for id in slots.into_iter().flatten() {
                let entity = self.entity(id)?;
                if entity.zone != ZoneType::Play || entity.owner != player {
                    return Err(GameError::contract(format!("{id} fills a slot of {player} outside play")));
                }
            }
        }

        for entity in self.entities.values() {
            let held = match entity.zone {
                ZoneType::Invalid | ZoneType::Removed => true,
                ZoneType::Play if entity.kind != EntityKind::Minion => {
                    let record = &self.players[entity.owner];
                    entity.id == record.hero || entity.id == record.hero_power || record.weapon == Some(entity.id)
                }
                kind => self
                    .zones
                    .zone(entity.owner, kind)
                    .is_some_and(|zone| zone.get(entity.zone_position) == Some(entity.id)),
            };
            if !held {
                return Err(GameError::contract(format!(
                    "{} records {:?} but no container holds it",
                    entity.id, entity.zone
                )));
            }
        }
        Ok(())
    }
}
