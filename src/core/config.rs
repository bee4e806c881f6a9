//! Match configuration.
//!
//! A `GameConfig` fully determines the opening state of a match together
//! with the card registry: classes, decks, who starts, the RNG seed and the
//! zone capacities. It is plain serde data so harnesses can load it from
//! JSON.

use serde::{Deserialize, Serialize};

use crate::cards::{CardClass, FormatType};
use crate::error::{GameError, Result};

use super::player::{PlayerId, PlayerMap};

/// Who takes the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartPlayer {
    /// Decided by the match RNG.
    #[default]
    Random,
    Fixed(PlayerId),
}

/// Configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Which card sets random generation and deck filling may draw from.
    pub format: FormatType,

    pub classes: PlayerMap<CardClass>,

    /// Explicit deck lists as card codes, drawn from the top (last element).
    pub decks: PlayerMap<Vec<String>>,

    /// Top decks up to `deck_size` with random collectible cards.
    pub fill_decks: bool,

    pub start_player: StartPlayer,

    pub seed: u64,

    /// Skip the mulligan choice and go straight to the first turn.
    pub skip_mulligan: bool,

    /// Run the state machine forward to the next decision point after every
    /// action. When off, the caller drives steps with `process_until`.
    pub auto_run: bool,

    /// Shuffle decks at game start.
    pub shuffle_decks: bool,

    pub deck_size: usize,
    pub hand_size: usize,
    pub field_size: usize,
    pub secret_size: usize,
    pub max_mana: i32,

    /// Card given to the second player after the opening draw.
    pub coin: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            format: FormatType::Standard,
            classes: PlayerMap::with_value(CardClass::Mage),
            decks: PlayerMap::with_default(),
            fill_decks: false,
            start_player: StartPlayer::Fixed(PlayerId::new(0)),
            seed: 0,
            skip_mulligan: true,
            auto_run: true,
            shuffle_decks: true,
            deck_size: 30,
            hand_size: 10,
            field_size: 7,
            secret_size: 5,
            max_mana: 10,
            coin: None,
        }
    }
}

impl GameConfig {
    /// Create a config for two classes with defaults elsewhere.
    #[must_use]
    pub fn new(player1: CardClass, player2: CardClass) -> Self {
        let mut config = Self::default();
        config.classes[PlayerId::new(0)] = player1;
        config.classes[PlayerId::new(1)] = player2;
        config
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatType) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_start_player(mut self, start: StartPlayer) -> Self {
        self.start_player = start;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, player: PlayerId, deck: Vec<String>) -> Self {
        self.decks[player] = deck;
        self
    }

    #[must_use]
    pub fn with_fill_decks(mut self, fill: bool) -> Self {
        self.fill_decks = fill;
        self
    }

    #[must_use]
    pub fn with_mulligan(mut self, mulligan: bool) -> Self {
        self.skip_mulligan = !mulligan;
        self
    }

    #[must_use]
    pub fn with_auto_run(mut self, auto_run: bool) -> Self {
        self.auto_run = auto_run;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_decks = shuffle;
        self
    }

    #[must_use]
    pub fn with_coin(mut self, coin: impl Into<String>) -> Self {
        self.coin = Some(coin.into());
        self
    }

    /// Reject settings no match can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 || self.field_size == 0 {
            return Err(GameError::Config("zone capacities must be positive".into()));
        }
        if self.max_mana <= 0 {
            return Err(GameError::Config("max mana must be positive".into()));
        }
        for (player, class) in self.classes.iter() {
            if !class.is_playable() {
                return Err(GameError::Config(format!("{player} has no playable class ({class:?})")));
            }
        }
        for (player, deck) in self.decks.iter() {
            if deck.len() > self.deck_size && self.fill_decks {
                return Err(GameError::Config(format!(
                    "{player} deck has {} cards, above deck size {}",
                    deck.len(),
                    self.deck_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = GameConfig::new(CardClass::Hunter, CardClass::Warlock)
            .with_seed(7)
            .with_mulligan(true)
            .with_auto_run(false);

        assert_eq!(config.classes[PlayerId::new(0)], CardClass::Hunter);
        assert_eq!(config.classes[PlayerId::new(1)], CardClass::Warlock);
        assert_eq!(config.seed, 7);
        assert!(!config.skip_mulligan);
        assert!(!config.auto_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_neutral_class() {
        let config = GameConfig::new(CardClass::Neutral, CardClass::Mage);
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_field() {
        let mut config = GameConfig::default();
        config.field_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::new(CardClass::Druid, CardClass::Shaman)
            .with_deck(PlayerId::new(0), vec!["CS2_009".into()])
            .with_coin("GAME_005");
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
