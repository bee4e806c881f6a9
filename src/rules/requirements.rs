//! Play requirements and targeting.
//!
//! A card's requirements are the union of its record's `play_requirements`
//! and its definition's `Property`. Target filters (`PlayReq::is_target_filter`)
//! narrow the characters a play may aim at; the rest gate the play itself.

use rustc_hash::FxHashMap;

use crate::cards::{PlayReq, Race};
use crate::core::{EntityId, EntityKind, GameTag, PlayerId};
use crate::error::ActionError;
use crate::game::Game;

/// Merged play requirements of the card behind an entity.
#[must_use]
pub fn requirements(game: &Game, source: EntityId) -> FxHashMap<PlayReq, i32> {
    let mut reqs = FxHashMap::default();
    let Some(entity) = game.get_entity(source) else {
        return reqs;
    };
    if let Some(card) = game.cards().get(entity.card) {
        reqs.extend(card.play_requirements.iter().map(|(&k, &v)| (k, v)));
    }
    if let Some(def) = game.cards().def(entity.card) {
        reqs.extend(def.property.play_requirements.iter().map(|(&k, &v)| (k, v)));
    }
    reqs
}

/// Whether playing `source` takes a target at all.
#[must_use]
pub fn takes_target(reqs: &FxHashMap<PlayReq, i32>) -> bool {
    reqs.contains_key(&PlayReq::TargetToPlay) || reqs.contains_key(&PlayReq::TargetIfAvailable)
}

/// Characters `source` may target when played by `player`.
///
/// Order is the player's hero, the player's minions, the enemy hero, the
/// enemy minions. Empty when the card takes no target.
#[must_use]
pub fn valid_targets(game: &Game, player: PlayerId, source: EntityId) -> Vec<EntityId> {
    let reqs = requirements(game, source);
    if !takes_target(&reqs) {
        return Vec::new();
    }
    characters(game, player)
        .into_iter()
        .filter(|&target| target_allowed(game, player, source, &reqs, target))
        .collect()
}

/// Check a card play or hero power against its requirements.
pub fn check_play(
    game: &Game,
    player: PlayerId,
    source: EntityId,
    target: Option<EntityId>,
) -> std::result::Result<(), ActionError> {
    let reqs = requirements(game, source);

    if takes_target(&reqs) {
        let targets = valid_targets(game, player, source);
        let required = reqs.contains_key(&PlayReq::TargetToPlay) || !targets.is_empty();
        match target {
            Some(target) if !targets.contains(&target) => return Err(ActionError::InvalidTarget),
            None if required => return Err(ActionError::TargetRequired),
            _ => {}
        }
    } else if target.is_some() {
        return Err(ActionError::InvalidTarget);
    }

    let mut gates: Vec<_> = reqs.iter().filter(|(req, _)| !req.is_target_filter()).collect();
    gates.sort_unstable();
    for (&req, &value) in gates {
        if !gate_holds(game, player, source, req, value) {
            return Err(ActionError::RequirementFailed(req));
        }
    }
    Ok(())
}

/// Heroes and field minions of both sides, own side first.
fn characters(game: &Game, player: PlayerId) -> Vec<EntityId> {
    let mut out = Vec::new();
    for side in [player, player.opponent()] {
        out.push(game.hero(side));
        out.extend_from_slice(game.field(side));
    }
    out
}

fn target_allowed(
    game: &Game,
    player: PlayerId,
    source: EntityId,
    reqs: &FxHashMap<PlayReq, i32>,
    target: EntityId,
) -> bool {
    let Some(entity) = game.get_entity(target) else {
        return false;
    };
    if !entity.in_play() || !entity.is_character() {
        return false;
    }
    let enemy = entity.owner != player;
    if enemy && (entity.has(GameTag::Stealth) || entity.has(GameTag::Immune)) {
        return false;
    }
    let source_kind = game.get_entity(source).map(|e| e.kind);
    if matches!(source_kind, Some(EntityKind::Spell | EntityKind::HeroPower))
        && entity.has(GameTag::CantBeTargetedBySpells)
    {
        return false;
    }

    reqs.iter().all(|(&req, &value)| match req {
        PlayReq::MinionTarget => entity.kind == EntityKind::Minion,
        PlayReq::HeroTarget => entity.kind == EntityKind::Hero,
        PlayReq::FriendlyTarget => !enemy,
        PlayReq::EnemyTarget => enemy,
        PlayReq::DamagedTarget => entity.is_damaged(),
        PlayReq::UndamagedTarget => !entity.is_damaged(),
        PlayReq::FrozenTarget => entity.has(GameTag::Frozen),
        PlayReq::NonSelfTarget => target != source,
        PlayReq::TargetMaxAttack => game.attack_of(target) <= value,
        PlayReq::TargetMinAttack => game.attack_of(target) >= value,
        PlayReq::TargetWithRace => game
            .card_of(target)
            .is_some_and(|card| card.race != Race::Invalid && card.race.matches(race_from(value))),
        _ => true,
    })
}

fn gate_holds(game: &Game, player: PlayerId, source: EntityId, req: PlayReq, value: i32) -> bool {
    let own = game.field(player).len() as i32;
    let enemy = game.field(player.opponent()).len() as i32;
    match req {
        PlayReq::MinimumEnemyMinions => enemy >= value,
        PlayReq::MinimumTotalMinions => own + enemy >= value,
        PlayReq::NumMinionSlots => (game.config().field_size as i32 - own) >= value,
        PlayReq::WeaponEquipped => game.weapon(player).is_some(),
        PlayReq::EntireEntourageNotInPlay => {
            let Some(card) = game.card_of(source) else {
                return true;
            };
            card.entourages.iter().any(|code| {
                !game
                    .field(player)
                    .iter()
                    .any(|&id| game.card_of(id).is_some_and(|c| &c.code == code))
            })
        }
        _ => true,
    }
}

/// Races are carried in requirement values by their position in the enum.
fn race_from(value: i32) -> Race {
    match value {
        1 => Race::Beast,
        2 => Race::Demon,
        3 => Race::Dragon,
        4 => Race::Elemental,
        5 => Race::Mech,
        6 => Race::Murloc,
        7 => Race::Pirate,
        8 => Race::Totem,
        9 => Race::All,
        _ => Race::Invalid,
    }
}
