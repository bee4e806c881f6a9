//! The match.
//!
//! - [`Game`]: the aggregate, with its methods split by concern
//! - `generic`: zone moves, damage, healing, drawing, summoning
//! - `resolve` / `deaths`: draining the queue, death processing, game end
//! - `phase`: the step state machine
//! - `actions`: validating and running player actions
//! - `combat`: attack resolution
//! - `snapshot`: serializable observable state

mod actions;
mod choice;
mod combat;
mod deaths;
#[allow(clippy::module_inception)]
mod game;
mod generic;
mod phase;
mod resolve;
mod snapshot;

pub use choice::{Choice, ChoiceKind};
pub use game::Game;
pub use phase::Step;
pub use snapshot::{EntitySnapshot, GameSnapshot, PlayerSnapshot};
