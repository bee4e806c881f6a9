//! Player actions and action history.
//!
//! A `PlayerAction` is one request from outside the engine. The
//! [`Game`](crate::game::Game) validates it, records it as an
//! [`ActionRecord`], and runs it to the next decision point.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// A request made by a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Play a card from hand. `position` is the field index for minions;
    /// `None` appends to the right.
    PlayCard {
        card: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    },

    /// Attack with a friendly character.
    Attack { attacker: EntityId, defender: EntityId },

    /// Use the hero power.
    HeroPower { target: Option<EntityId> },

    EndTurn,

    /// Answer the opening mulligan by naming the hand cards to replace.
    Mulligan { replace: Vec<EntityId> },

    /// Pick one option of a pending choice.
    Choose { entity: EntityId },

    Concede,
}

impl PlayerAction {
    /// Play a card with no target at the default position.
    #[must_use]
    pub fn play(card: EntityId) -> Self {
        Self::PlayCard { card, target: None, position: None }
    }

    /// Play a card aimed at a target.
    #[must_use]
    pub fn play_target(card: EntityId, target: EntityId) -> Self {
        Self::PlayCard { card, target: Some(target), position: None }
    }

    /// Play a minion at a field index.
    #[must_use]
    pub fn play_at(card: EntityId, position: usize) -> Self {
        Self::PlayCard { card, target: None, position: Some(position) }
    }

    #[must_use]
    pub fn attack(attacker: EntityId, defender: EntityId) -> Self {
        Self::Attack { attacker, defender }
    }

    #[must_use]
    pub fn hero_power(target: Option<EntityId>) -> Self {
        Self::HeroPower { target }
    }
}

/// A record of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: PlayerAction,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number across the whole match.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: PlayerAction, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let card = EntityId::new(5);
        assert_eq!(
            PlayerAction::play(card),
            PlayerAction::PlayCard { card, target: None, position: None }
        );
        assert_eq!(
            PlayerAction::play_at(card, 2),
            PlayerAction::PlayCard { card, target: None, position: Some(2) }
        );
    }

    #[test]
    fn test_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            PlayerAction::attack(EntityId::new(4), EntityId::new(2)),
            3,
            9,
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
