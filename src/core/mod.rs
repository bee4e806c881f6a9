//! Core engine types: entities, tags, players, actions, RNG, configuration.

pub mod entity;
pub mod tags;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;

pub use entity::{Entity, EntityId, EntityKind};
pub use tags::{GameTag, Tags};
pub use player::{PlayState, Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, StartPlayer};
pub use action::{ActionRecord, PlayerAction};
