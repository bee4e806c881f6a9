//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. A match always has two players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Player
//!
//! The player record: chosen class, resource tags, and the handles of the
//! hero, hero power and weapon slots. Zone contents live in the
//! [`ZoneManager`](crate::zones::ZoneManager).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::CardClass;

use super::entity::EntityId;
use super::tags::{GameTag, Tags};

/// Number of players in a match.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use hearth_engine::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::new(|_| 30);
/// life[PlayerId::new(1)] -= 2;
/// assert_eq!(life[PlayerId::new(0)], 30);
/// assert_eq!(life[PlayerId::new(1)], 28);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Outcome state of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Playing,
    Won,
    Lost,
    Tied,
    Conceded,
}

/// Per-player record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub class: CardClass,
    pub tags: Tags,
    pub hero: EntityId,
    pub hero_power: EntityId,
    pub weapon: Option<EntityId>,
    pub play_state: PlayState,
}

impl Player {
    /// Create a player with empty slots. Hero and hero power are assigned
    /// when the game builds its opening state.
    #[must_use]
    pub fn new(id: PlayerId, class: CardClass) -> Self {
        Self {
            id,
            class,
            tags: Tags::new(),
            hero: EntityId::player(id),
            hero_power: EntityId::player(id),
            weapon: None,
            play_state: PlayState::Playing,
        }
    }

    /// Mana crystals owned this turn.
    #[must_use]
    pub fn total_mana(&self) -> i32 {
        self.tags.get(GameTag::Resources)
    }

    /// Mana still spendable this turn.
    #[must_use]
    pub fn remaining_mana(&self) -> i32 {
        let t = &self.tags;
        (t.get(GameTag::Resources) + t.get(GameTag::TempResources)
            - t.get(GameTag::ResourcesUsed)
            - t.get(GameTag::OverloadLocked))
        .max(0)
    }

    /// Spend mana, consuming temporary mana first.
    pub fn spend_mana(&mut self, amount: i32) {
        let temp = self.tags.get(GameTag::TempResources);
        let from_temp = temp.min(amount);
        self.tags.set(GameTag::TempResources, temp - from_temp);
        self.tags.add(GameTag::ResourcesUsed, amount - from_temp);
    }

    /// Set the crystal count directly.
    pub fn set_total_mana(&mut self, amount: i32) {
        self.tags.set(GameTag::Resources, amount);
    }

    pub fn set_used_mana(&mut self, amount: i32) {
        self.tags.set(GameTag::ResourcesUsed, amount);
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }
}
