//! The rules engine trait.
//!
//! `RulesEngine` is the surface a driver (a test harness, a bot, a
//! benchmark) needs to play a match without knowing its internals:
//! - what actions are legal now
//! - how to apply one
//! - whether the match is over

use crate::core::{PlayState, PlayerAction, PlayerId};
use crate::error::Result;
use crate::game::{ChoiceKind, Game, Step};

use super::combat::{attack_targets, can_attack};
use super::requirements::{requirements, takes_target, valid_targets};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
    /// Both heroes died in the same pass.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when the player cannot act; `Concede` is always
///   accepted but never listed
/// - `apply_action`: deterministic under a fixed seed
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Enumerate every action the player may take now.
    fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction>;

    /// Apply an action, running the game to the next decision point.
    fn apply_action(&mut self, player: PlayerId, action: &PlayerAction) -> Result<()>;

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check whether an action is among the legal ones.
    fn is_legal(&self, player: PlayerId, action: &PlayerAction) -> bool {
        self.legal_actions(player).contains(action)
    }
}

impl RulesEngine for Game {
    fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction> {
        if self.is_over() {
            return Vec::new();
        }
        if let Some(choice) = self.pending_choice(player) {
            return match choice.kind {
                ChoiceKind::Mulligan => vec![
                    PlayerAction::Mulligan { replace: Vec::new() },
                    PlayerAction::Mulligan {
                        replace: choice.options.clone(),
                    },
                ],
                ChoiceKind::Discover => choice
                    .options
                    .iter()
                    .map(|&entity| PlayerAction::Choose { entity })
                    .collect(),
            };
        }
        if self.has_pending_choice() || player != self.current_player() || self.step() != Step::MainAction {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for &card in self.hand(player) {
            if takes_target(&requirements(self, card)) {
                let targets = valid_targets(self, player, card);
                if targets.is_empty() {
                    candidates.push(PlayerAction::play(card));
                }
                candidates.extend(targets.into_iter().map(|t| PlayerAction::play_target(card, t)));
            } else {
                candidates.push(PlayerAction::play(card));
            }
        }

        let power = self.hero_power(player);
        if takes_target(&requirements(self, power)) {
            candidates.extend(
                valid_targets(self, player, power)
                    .into_iter()
                    .map(|t| PlayerAction::hero_power(Some(t))),
            );
        } else {
            candidates.push(PlayerAction::hero_power(None));
        }

        let mut actions: Vec<PlayerAction> = candidates
            .into_iter()
            .filter(|action| self.validate(player, action).is_ok())
            .collect();

        let attackers = std::iter::once(self.hero(player)).chain(self.field(player).iter().copied());
        for attacker in attackers {
            if can_attack(self, attacker) {
                actions.extend(
                    attack_targets(self, attacker)
                        .into_iter()
                        .map(|defender| PlayerAction::attack(attacker, defender)),
                );
            }
        }

        actions.push(PlayerAction::EndTurn);
        actions
    }

    fn apply_action(&mut self, player: PlayerId, action: &PlayerAction) -> Result<()> {
        self.process(player, action.clone())
    }

    fn is_terminal(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        PlayerId::all()
            .find(|&p| self.play_state(p) == PlayState::Won)
            .map_or(Some(GameResult::Draw), |winner| Some(GameResult::Winner(winner)))
    }
}
