//! Error types for the engine.
//!
//! Two kinds of failure exist. A rejected action (`GameError::InvalidAction`)
//! is reported before any state changes. A contract violation means a card
//! definition or task graph asked for something the current state cannot
//! answer; it aborts the enclosing action and leaves already-applied effects
//! in place.
//!
//! Ordinary gameplay dead ends (no target, empty card pool) are not errors.
//! They surface as [`TaskStatus::Stop`](crate::tasks::TaskStatus::Stop).

use thiserror::Error;

use crate::cards::PlayReq;

/// Why a requested player action was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("action not allowed during the current step")]
    WrongStep,

    #[error("card is not in the player's hand")]
    NotInHand,

    #[error("not enough mana: cost {cost}, available {available}")]
    NotEnoughMana { cost: i32, available: i32 },

    #[error("invalid target")]
    InvalidTarget,

    #[error("a target is required")]
    TargetRequired,

    #[error("the board is full")]
    BoardFull,

    #[error("play requirement not met: {0:?}")]
    RequirementFailed(PlayReq),

    #[error("this character cannot attack")]
    CannotAttack,

    #[error("hero power already used this turn")]
    HeroPowerUsed,

    #[error("a choice is pending")]
    ChoicePending,

    #[error("no choice is pending")]
    NoChoicePending,

    #[error("option is not part of the pending choice")]
    InvalidChoice,

    #[error("that secret is already active")]
    DuplicateSecret,

    #[error("unknown entity")]
    UnknownEntity,
}

/// Engine error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] ActionError),

    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("the game is over")]
    GameOver,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl GameError {
    /// Build a contract violation from anything printable.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Check whether this error is a rejected action.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidAction(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_converts() {
        let err: GameError = ActionError::NotYourTurn.into();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "invalid action: it is not this player's turn");
    }

    #[test]
    fn test_contract_is_not_rejection() {
        let err = GameError::contract("bad selector");
        assert!(!err.is_rejection());
        assert!(err.to_string().contains("bad selector"));
    }
}
