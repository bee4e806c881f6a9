//! A single ordered zone.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

/// Where an entity lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneType {
    /// Created but not yet placed.
    #[default]
    Invalid,
    /// The field for minions; the player slots for hero, hero power, weapon.
    Play,
    Deck,
    Hand,
    Graveyard,
    Secret,
    SetAside,
    /// Gone from the match for good.
    Removed,
}

/// Position for inserting an entity into a zone.
///
/// The end of the sequence is the top of the deck and the rightmost field
/// slot; index 0 is the bottom of the deck and the leftmost slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    Top,
    Bottom,
    Index(usize),
}

/// An ordered sequence of entity handles with an optional capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    kind: ZoneType,
    owner: PlayerId,
    capacity: Option<usize>,
    entities: Vec<EntityId>,
}

impl Zone {
    #[must_use]
    pub fn new(kind: ZoneType, owner: PlayerId, capacity: Option<usize>) -> Self {
        Self {
            kind,
            owner,
            capacity,
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ZoneType {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.entities.len() >= cap)
    }

    /// Free slots left; unbounded zones report `usize::MAX`.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.capacity
            .map_or(usize::MAX, |cap| cap.saturating_sub(self.entities.len()))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|&e| e == id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.entities.get(index).copied()
    }

    /// Entity at the top (end) of the zone.
    #[must_use]
    pub fn top(&self) -> Option<EntityId> {
        self.entities.last().copied()
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Insert and return the index used, or `None` if the zone is full.
    pub fn insert(&mut self, id: EntityId, position: ZonePosition) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = match position {
            ZonePosition::Top => self.entities.len(),
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) => i.min(self.entities.len()),
        };
        self.entities.insert(index, id);
        Some(index)
    }

    /// Remove and return the index the entity held.
    pub fn remove(&mut self, id: EntityId) -> Option<usize> {
        let index = self.position_of(id)?;
        self.entities.remove(index);
        Some(index)
    }

    /// Reorder in place; used for shuffles.
    pub fn entities_mut(&mut self) -> &mut [EntityId] {
        &mut self.entities
    }
}
