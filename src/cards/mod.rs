//! Card records, definitions and the registry.
//!
//! - [`Card`]: static metadata from the card loader
//! - [`CardDef`]: behavior (tasks, trigger, aura) and extra requirements
//! - [`CardRegistry`]: lookup by id and code, format pools

pub mod card;
pub mod definition;
pub mod registry;

pub use card::{Card, CardClass, CardId, CardSet, CardType, FormatType, PlayReq, Race, Rarity};
pub use definition::{CardDef, Power, Property};
pub use registry::CardRegistry;
