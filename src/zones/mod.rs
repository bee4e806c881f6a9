//! Zone system for entity locations.
//!
//! ## Key Types
//!
//! - `ZoneType`: where an entity is (play, deck, hand, graveyard, ...)
//! - `Zone`: an ordered container with optional capacity
//! - `ZoneManager`: both players' containers
//! - `ZonePosition`: position specifier for inserts

pub mod manager;
pub mod zone;

pub use manager::{PlayerZones, ZoneManager};
pub use zone::{Zone, ZonePosition, ZoneType};
