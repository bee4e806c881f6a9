//! # hearth-engine
//!
//! A rules engine for a two-player collectible card game with heroes, mana,
//! minions, spells, weapons and secrets.
//!
//! ## Design Principles
//!
//! 1. **Cards are data**: a card's behavior is a task list in its
//!    [`CardDef`](cards::CardDef). The engine runs whatever list it is
//!    handed and knows nothing about individual cards.
//!
//! 2. **One match, one owner**: a [`Game`] owns its entity arena, zones,
//!    triggers, queue and RNG. Only the card registry is shared, read-only,
//!    behind an `Arc`.
//!
//! 3. **Deterministic**: every random draw goes through the match RNG, so a
//!    seed and an action list reproduce a match exactly.
//!
//! ## Architecture
//!
//! - **Entity arena**: entities are referred to by [`EntityId`]; owners are
//!   ids too, never references.
//!
//! - **Pending queue**: an action is split into agenda items; reactions
//!   (triggers, deathrattles) queue ahead of the remaining agenda. Deaths
//!   are processed and auras recalculated between items.
//!
//! - **Suspension**: a task that needs a player decision (discover) parks
//!   its execution on the game; the answer resumes it in place.
//!
//! ## Modules
//!
//! - `core`: entity ids, tags, players, actions, RNG, configuration
//! - `cards`: card records, definitions, the registry
//! - `zones`: ordered zone containers
//! - `auras`: enchantments and the aura recalculation pass
//! - `triggers`: events, trigger registry, entity conditions
//! - `tasks`: the task set, selectors and the interpreter
//! - `stack`: the pending queue
//! - `rules`: play requirements, attack legality, the `RulesEngine` trait
//! - `game`: the match aggregate and its state machine
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hearth_engine::cards::{Card, CardClass, CardDef, CardId, CardRegistry, CardType};
//! use hearth_engine::core::{GameConfig, PlayerId};
//! use hearth_engine::game::{Game, Step};
//!
//! let mut registry = CardRegistry::new();
//! registry
//!     .register(Card::hero(CardId::new(1), "HERO_08", "Jaina", CardClass::Mage, 30, "CS2_034"), CardDef::new())
//!     .unwrap();
//! registry
//!     .register(Card::hero_power(CardId::new(2), "CS2_034", "Fireblast", 2), CardDef::new())
//!     .unwrap();
//! registry.set_default_hero("HERO_08").unwrap();
//!
//! let config = GameConfig::new(CardClass::Mage, CardClass::Mage);
//! let mut game = Game::new(config, Arc::new(registry)).unwrap();
//! game.start().unwrap();
//!
//! assert_eq!(game.step(), Step::MainAction);
//! assert_eq!(game.current_player(), PlayerId::new(0));
//! ```

pub mod auras;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod rules;
pub mod stack;
pub mod tasks;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, Entity, EntityId, EntityKind, GameConfig, GameRng, GameRngState, GameTag, PlayState, Player,
    PlayerAction, PlayerId, PlayerMap, StartPlayer, Tags,
};

pub use crate::cards::{Card, CardClass, CardDef, CardId, CardRegistry, CardType, FormatType, PlayReq, Race};

pub use crate::zones::{ZoneManager, ZonePosition, ZoneType};

pub use crate::auras::{Aura, AuraScope, Enchant};

pub use crate::triggers::{GameEvent, SelfCondition, TriggerDef, TriggerSource, TriggerType};

pub use crate::tasks::{EntityType, SummonSide, Task, TaskStatus};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::game::{Choice, ChoiceKind, Game, GameSnapshot, Step};

pub use crate::error::{ActionError, GameError, Result};
