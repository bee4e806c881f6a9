//! Attack legality.

use crate::core::{EntityId, EntityKind, GameTag, PlayerId};
use crate::error::ActionError;
use crate::game::Game;

/// Whether a character of the current player may attack now.
#[must_use]
pub fn can_attack(game: &Game, attacker: EntityId) -> bool {
    let Some(entity) = game.get_entity(attacker) else {
        return false;
    };
    if !entity.in_play() || !entity.is_character() || entity.is_dead() {
        return false;
    }
    if entity.owner != game.current_player() || game.attack_of(attacker) <= 0 {
        return false;
    }
    if entity.has(GameTag::Frozen) {
        return false;
    }
    let fresh = entity.tags.has(GameTag::Exhausted);
    if fresh && !(entity.has(GameTag::Charge) || entity.has(GameTag::Rush)) {
        return false;
    }
    let allowed = if entity.has(GameTag::Windfury) { 2 } else { 1 };
    entity.tags.get(GameTag::NumAttacksThisTurn) < allowed
}

/// Enemy characters `attacker` may attack, hero first.
///
/// Stealthed and immune characters are never attackable. A side with a
/// visible taunt minion must be attacked through it. A rush minion on its
/// first turn cannot attack heroes.
#[must_use]
pub fn attack_targets(game: &Game, attacker: EntityId) -> Vec<EntityId> {
    let Some(entity) = game.get_entity(attacker) else {
        return Vec::new();
    };
    let enemy = entity.owner.opponent();
    let rushing =
        entity.tags.has(GameTag::Exhausted) && entity.has(GameTag::Rush) && !entity.has(GameTag::Charge);

    let visible = |id: &EntityId| {
        game.get_entity(*id).is_some_and(|e| {
            e.in_play() && !e.is_dead() && !e.has(GameTag::Stealth) && !e.has(GameTag::Immune)
        })
    };
    let mut targets: Vec<EntityId> = std::iter::once(game.hero(enemy))
        .chain(game.field(enemy).iter().copied())
        .filter(visible)
        .collect();

    let taunts: Vec<EntityId> = targets
        .iter()
        .copied()
        .filter(|&id| game.get_entity(id).is_some_and(|e| e.kind == EntityKind::Minion && e.has(GameTag::Taunt)))
        .collect();
    if !taunts.is_empty() {
        targets = taunts;
    }
    if rushing {
        targets.retain(|&id| game.get_entity(id).is_some_and(|e| e.kind != EntityKind::Hero));
    }
    targets
}

/// Validate an attack request.
pub fn check_attack(
    game: &Game,
    player: PlayerId,
    attacker: EntityId,
    defender: EntityId,
) -> std::result::Result<(), ActionError> {
    let entity = game.get_entity(attacker).ok_or(ActionError::UnknownEntity)?;
    if entity.owner != player || !can_attack(game, attacker) {
        return Err(ActionError::CannotAttack);
    }
    if game.get_entity(defender).is_none() {
        return Err(ActionError::UnknownEntity);
    }
    if !attack_targets(game, attacker).contains(&defender) {
        return Err(ActionError::InvalidTarget);
    }
    Ok(())
}
