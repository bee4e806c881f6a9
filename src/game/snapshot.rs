//! Observable state capture.
//!
//! A `GameSnapshot` is a plain serde record of everything a player could
//! see on the table plus the RNG position: entity stats and tags per zone,
//! player resources, pending choices. Two games that reached the same state
//! by the same actions produce byte-identical snapshots, which is what the
//! determinism checks compare.

use serde::{Deserialize, Serialize};

use crate::cards::CardClass;
use crate::core::{EntityId, EntityKind, GameRngState, GameTag, PlayState, PlayerId};
use crate::error::{GameError, Result};
use crate::zones::ZoneType;

use super::choice::Choice;
use super::game::Game;
use super::phase::Step;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub owner: PlayerId,
    pub code: String,
    pub kind: EntityKind,
    pub zone: ZoneType,
    pub zone_position: usize,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub cost: i32,
    /// Raw tags in tag order.
    pub tags: Vec<(GameTag, i32)>,
    /// Codes of attached enchantments, oldest first.
    pub enchantments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub class: CardClass,
    pub play_state: PlayState,
    pub hero: EntityId,
    pub hero_power: EntityId,
    pub weapon: Option<EntityId>,
    pub remaining_mana: i32,
    pub tags: Vec<(GameTag, i32)>,
    pub hand: Vec<EntityId>,
    pub deck: Vec<EntityId>,
    pub field: Vec<EntityId>,
    pub graveyard: Vec<EntityId>,
    pub secrets: Vec<EntityId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub step: Step,
    pub current_player: PlayerId,
    pub rng: GameRngState,
    pub players: Vec<PlayerSnapshot>,
    /// Every entity in id order.
    pub entities: Vec<EntitySnapshot>,
    pub choices: Vec<Choice>,
    pub actions: usize,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.id == id)
    }
}

impl Game {
    /// Capture the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let players = PlayerId::all()
            .map(|p| {
                let record = &self.players[p];
                PlayerSnapshot {
                    id: p,
                    class: record.class,
                    play_state: record.play_state,
                    hero: record.hero,
                    hero_power: record.hero_power,
                    weapon: record.weapon,
                    remaining_mana: record.remaining_mana(),
                    tags: record.tags.sorted(),
                    hand: self.zones.hand(p).to_vec(),
                    deck: self.zones.deck(p).to_vec(),
                    field: self.zones.field(p).to_vec(),
                    graveyard: self.graveyard(p).to_vec(),
                    secrets: self.secrets(p).to_vec(),
                }
            })
            .collect();

        let entities = self
            .entity_ids()
            .into_iter()
            .filter_map(|id| self.entities.get(&id))
            .map(|e| EntitySnapshot {
                id: e.id,
                owner: e.owner,
                code: self.cards.get(e.card).map(|c| c.code.clone()).unwrap_or_default(),
                kind: e.kind,
                zone: e.zone,
                zone_position: e.zone_position,
                attack: self.attack_of(e.id),
                health: e.health(),
                max_health: e.max_health(),
                cost: e.cost(),
                tags: e.tags.sorted(),
                enchantments: e
                    .enchantments
                    .iter()
                    .filter_map(|ench| self.cards.get(ench.card).map(|c| c.code.clone()))
                    .collect(),
            })
            .collect();

        GameSnapshot {
            turn: self.turn,
            step: self.step,
            current_player: self.current_player,
            rng: self.rng.state(),
            players,
            entities,
            choices: self.choices.iter().filter_map(|(_, c)| c.clone()).collect(),
            actions: self.history.len(),
        }
    }
}
