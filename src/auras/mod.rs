//! Aura and enchantment recalculation.
//!
//! - [`Enchantment`]: a modifier attached to one entity, kept until silence,
//!   expiry, or the entity leaving play
//! - [`Aura`]: a continuous effect of an entity in play, recomputed from
//!   scratch on every pass by [`Game::update_auras`](crate::game::Game::update_auras)

mod aura;
mod enchantment;
mod recalc;

pub use aura::{Aura, AuraBuffer, AuraScope};
pub use enchantment::{Enchant, Enchantment};
pub(crate) use recalc::clamp_health;
