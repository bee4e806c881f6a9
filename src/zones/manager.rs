//! Zone manager: every player's zone containers.
//!
//! The manager only tracks membership and order. Entities carry their own
//! zone and position; [`Game`](crate::game::Game) keeps the two in step by
//! renumbering a zone after every insert and remove.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameConfig, PlayerId, PlayerMap};

use super::zone::{Zone, ZonePosition, ZoneType};

/// One player's containers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: Zone,
    pub hand: Zone,
    pub field: Zone,
    pub graveyard: Zone,
    pub secrets: Zone,
    pub set_aside: Zone,
}

impl PlayerZones {
    fn new(owner: PlayerId, config: &GameConfig) -> Self {
        Self {
            deck: Zone::new(ZoneType::Deck, owner, None),
            hand: Zone::new(ZoneType::Hand, owner, Some(config.hand_size)),
            field: Zone::new(ZoneType::Play, owner, Some(config.field_size)),
            graveyard: Zone::new(ZoneType::Graveyard, owner, None),
            secrets: Zone::new(ZoneType::Secret, owner, Some(config.secret_size)),
            set_aside: Zone::new(ZoneType::SetAside, owner, None),
        }
    }
}

/// Zone containers for both players.
///
/// `ZoneType::Play` maps to the field; heroes, hero powers and weapons sit
/// in player slots instead and have no container here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    zones: PlayerMap<PlayerZones>,
}

impl ZoneManager {
    /// Create empty zones sized from the config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            zones: PlayerMap::new(|p| PlayerZones::new(p, config)),
        }
    }

    /// The container for a zone type, if it has one.
    #[must_use]
    pub fn zone(&self, player: PlayerId, kind: ZoneType) -> Option<&Zone> {
        let zones = &self.zones[player];
        match kind {
            ZoneType::Play => Some(&zones.field),
            ZoneType::Deck => Some(&zones.deck),
            ZoneType::Hand => Some(&zones.hand),
            ZoneType::Graveyard => Some(&zones.graveyard),
            ZoneType::Secret => Some(&zones.secrets),
            ZoneType::SetAside => Some(&zones.set_aside),
            ZoneType::Invalid | ZoneType::Removed => None,
        }
    }

    pub fn zone_mut(&mut self, player: PlayerId, kind: ZoneType) -> Option<&mut Zone> {
        let zones = &mut self.zones[player];
        match kind {
            ZoneType::Play => Some(&mut zones.field),
            ZoneType::Deck => Some(&mut zones.deck),
            ZoneType::Hand => Some(&mut zones.hand),
            ZoneType::Graveyard => Some(&mut zones.graveyard),
            ZoneType::Secret => Some(&mut zones.secrets),
            ZoneType::SetAside => Some(&mut zones.set_aside),
            ZoneType::Invalid | ZoneType::Removed => None,
        }
    }

    /// Entities of a zone in order; empty for zones without a container.
    #[must_use]
    pub fn entities(&self, player: PlayerId, kind: ZoneType) -> &[EntityId] {
        match self.zone(player, kind) {
            Some(zone) => zone.entities(),
            None => &[],
        }
    }

    #[must_use]
    pub fn field(&self, player: PlayerId) -> &[EntityId] {
        self.zones[player].field.entities()
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[EntityId] {
        self.zones[player].hand.entities()
    }

    #[must_use]
    pub fn deck(&self, player: PlayerId) -> &[EntityId] {
        self.zones[player].deck.entities()
    }

    #[must_use]
    pub fn player_zones(&self, player: PlayerId) -> &PlayerZones {
        &self.zones[player]
    }

    /// Insert into a container. Returns the index used, or `None` if the
    /// zone has no container or is full.
    pub fn insert(&mut self, player: PlayerId, kind: ZoneType, id: EntityId, position: ZonePosition) -> Option<usize> {
        self.zone_mut(player, kind)?.insert(id, position)
    }

    /// Remove from a container, returning the index it held.
    pub fn remove(&mut self, player: PlayerId, kind: ZoneType, id: EntityId) -> Option<usize> {
        self.zone_mut(player, kind)?.remove(id)
    }

    /// Zone types that have containers, in snapshot order.
    pub const CONTAINERS: [ZoneType; 6] = [
        ZoneType::Deck,
        ZoneType::Hand,
        ZoneType::Play,
        ZoneType::Graveyard,
        ZoneType::Secret,
        ZoneType::SetAside,
    ];
}
