//! Action legality.
//!
//! - `requirements`: play requirements and spell/battlecry targeting
//! - `combat`: who may attack what
//! - `engine`: the `RulesEngine` trait a driver plays a match through
//!
//! These are read-only queries over a [`Game`](crate::game::Game); the game
//! calls them from `validate` before any state changes.

pub mod combat;
pub mod engine;
pub mod requirements;

pub use combat::{attack_targets, can_attack, check_attack};
pub use engine::{GameResult, RulesEngine};
pub use requirements::{check_play, requirements, valid_targets};
