//! Card task integration tests.
//!
//! Each test plays real fixture cards through `Game::process` and checks
//! the board afterwards.

mod common;

use common::*;
use hearth_engine::cards::CardClass;
use hearth_engine::core::{GameTag, PlayerAction};
use hearth_engine::error::{ActionError, GameError};
use hearth_engine::game::ChoiceKind;
use hearth_engine::zones::ZoneType;

// =============================================================================
// Damage and Healing
// =============================================================================

/// Test that healing restores lost health and never exceeds the maximum.
#[test]
fn test_heal_capped_at_max_health() {
    let mut game = new_game(CardClass::Priest, CardClass::Hunter);
    end_turn(&mut game);

    use_power(&mut game, P1, None);
    assert_eq!(hero_health(&game, P0), 28);
    end_turn(&mut game);

    let hero = game.hero(P0);
    use_power(&mut game, P0, Some(hero));
    assert_eq!(hero_health(&game, P0), 30);

    pass_round(&mut game);
    use_power(&mut game, P0, Some(hero));
    assert_eq!(hero_health(&game, P0), 30);
}

/// Test that spell power adds to spell damage.
#[test]
fn test_spell_power_boosts_fireball() {
    let mut game = new_game(CardClass::Mage, CardClass::Mage);
    play(&mut game, P0, "CS2_142");
    assert_eq!(game.spell_damage(P0), 1);

    let enemy = game.hero(P1);
    play_at(&mut game, P0, "CS2_029", enemy);
    assert_eq!(hero_health(&game, P1), 23);
}

/// Test that a hero power does not gain spell damage.
#[test]
fn test_hero_power_ignores_spell_power() {
    let mut game = new_game(CardClass::Mage, CardClass::Mage);
    play(&mut game, P0, "CS2_142");

    let enemy = game.hero(P1);
    use_power(&mut game, P0, Some(enemy));
    assert_eq!(hero_health(&game, P1), 29);
}

/// Test that armor absorbs damage before health.
#[test]
fn test_armor_absorbs_damage() {
    let mut game = new_game(CardClass::Warrior, CardClass::Hunter);
    use_power(&mut game, P0, None);
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 2);
    end_turn(&mut game);

    use_power(&mut game, P1, None);
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 0);
    assert_eq!(hero_health(&game, P0), 30);
}

// =============================================================================
// Conditions and Nesting
// =============================================================================

/// Test that a conditional draw happens only when the hand is empty.
#[test]
fn test_conditional_draw_on_empty_hand() {
    let mut game = new_game(CardClass::Hunter, CardClass::Mage);
    for id in game.hand(P0).to_vec() {
        game.process(P0, PlayerAction::play(id)).unwrap();
    }
    assert!(game.hand(P0).is_empty());

    let enemy = game.hero(P1);
    play_at(&mut game, P0, "BRM_013", enemy);
    assert_eq!(hero_health(&game, P1), 27);
    assert_eq!(game.hand(P0).len(), 1);
}

/// Test that the conditional draw is skipped when cards remain in hand.
#[test]
fn test_conditional_draw_skipped_with_cards_in_hand() {
    let mut game = new_game(CardClass::Hunter, CardClass::Mage);
    let before = game.hand(P0).len();

    let enemy = game.hero(P1);
    play_at(&mut game, P0, "BRM_013", enemy);
    assert_eq!(hero_health(&game, P1), 27);
    assert_eq!(game.hand(P0).len(), before);
}

/// Test that an empty random pick stops only its own nested list.
#[test]
fn test_nested_stop_continues_outer_list() {
    let mut game = new_game(CardClass::Warrior, CardClass::Mage);
    play(&mut game, P0, "TB_NESTED");
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 3);
}

/// Test that the nested list hits an enemy minion when one exists.
#[test]
fn test_nested_list_hits_enemy_minion() {
    let mut game = new_game(CardClass::Warrior, CardClass::Mage);
    end_turn(&mut game);
    let yeti = play(&mut game, P1, "CS2_182");
    end_turn(&mut game);

    play(&mut game, P0, "TB_NESTED");
    assert_eq!(game.health_of(yeti), 3);
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 3);
}

/// Test that a broken selector aborts the action but keeps earlier effects.
#[test]
fn test_contract_violation_keeps_applied_effects() {
    let mut game = new_game(CardClass::Warrior, CardClass::Mage);
    let golem = give(&mut game, P0, "TB_MISFIRE");
    game.set_mana(P0, 10);

    let err = game.process(P0, PlayerAction::play(golem)).unwrap_err();
    assert!(matches!(err, GameError::ContractViolation(_)));
    assert!(!err.is_rejection());
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 1);
    assert_eq!(game.field(P0), &[golem]);

    game.check_zone_consistency().unwrap();
    end_turn(&mut game);
    assert_eq!(game.current_player(), P1);
}

/// Test that stack arithmetic saturates instead of overflowing.
#[test]
fn test_stack_math_saturates() {
    let mut game = new_game(CardClass::Mage, CardClass::Warrior);
    play(&mut game, P0, "TB_RUNAWAY");
    assert_eq!(hero_health(&game, P1), 27);
    assert!(!game.is_over());
}

// =============================================================================
// Choices
// =============================================================================

/// Test that discover offers distinct options and blocks other actions.
#[test]
fn test_discover_suspends_until_chosen() {
    let mut game = new_game(CardClass::Mage, CardClass::Warrior);
    let glyph = play(&mut game, P0, "UNG_941");

    let choice = game.pending_choice(P0).cloned().expect("discover pending");
    assert_eq!(choice.kind, ChoiceKind::Discover);
    assert_eq!(choice.options.len(), 3);
    let mut codes: Vec<String> = choice.options.iter().map(|&id| code(&game, id)).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 3);
    for &option in &choice.options {
        assert_eq!(game.card_of(option).unwrap().class, CardClass::Mage);
    }

    assert_eq!(game.validate(P0, &PlayerAction::EndTurn), Err(ActionError::ChoicePending));
    assert_eq!(game.validate(P1, &PlayerAction::EndTurn), Err(ActionError::ChoicePending));
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 0);

    let picked = choice.options[1];
    game.process(P0, PlayerAction::Choose { entity: picked }).unwrap();

    assert!(!game.has_pending_choice());
    assert!(game.hand(P0).contains(&picked));
    for &other in choice.options.iter().filter(|&&id| id != picked) {
        assert_eq!(game.entity(other).unwrap().zone, ZoneType::Removed);
    }
    assert_eq!(game.entity(game.hero(P0)).unwrap().armor(), 1);
    assert_eq!(game.entity(glyph).unwrap().zone, ZoneType::Graveyard);
    game.check_zone_consistency().unwrap();
}

/// Test that choosing something outside the options is rejected.
#[test]
fn test_discover_rejects_foreign_option() {
    let mut game = new_game(CardClass::Mage, CardClass::Warrior);
    play(&mut game, P0, "UNG_941");

    let outsider = game.hand(P0)[0];
    assert_eq!(
        game.validate(P0, &PlayerAction::Choose { entity: outsider }),
        Err(ActionError::InvalidChoice)
    );
}

// =============================================================================
// Generated and Replaced Cards
// =============================================================================

/// Test that a random card comes from exactly the opponent's class.
#[test]
fn test_random_card_from_enemy_class() {
    for seed in 1..=8 {
        let mut game = start(config(CardClass::Rogue, CardClass::Mage).with_seed(seed));
        let before = game.hand(P0).len();
        play(&mut game, P0, "KAR_069");

        assert_eq!(game.hand(P0).len(), before + 1);
        let added = *game.hand(P0).last().unwrap();
        let card = game.card_of(added).unwrap();
        assert!(card.collectible);
        assert_eq!(card.class, CardClass::Mage);
    }
}

/// Test that a random card for the enemy hand is owned by the enemy.
#[test]
fn test_random_card_to_enemy_hand_changes_owner() {
    let mut game = new_game(CardClass::Warrior, CardClass::Hunter);
    let mine = game.hand(P0).len();
    let theirs = game.hand(P1).len();
    play(&mut game, P0, "TB_SLINGER");

    assert_eq!(game.hand(P0).len(), mine + 1);
    assert_eq!(game.hand(P1).len(), theirs + 1);
    let gift = *game.hand(P1).last().unwrap();
    assert_eq!(game.entity(gift).unwrap().owner, P1);
    assert_eq!(game.card_of(gift).unwrap().class, CardClass::Mage);
    let kept = *game.hand(P0).last().unwrap();
    assert_eq!(game.card_of(kept).unwrap().class, CardClass::Mage);
    assert!(game.zones().entities(P0, ZoneType::SetAside).is_empty());
    game.check_zone_consistency().unwrap();
}

/// Test that an opposite random card is created for the opponent from the
/// caster's class.
#[test]
fn test_random_card_created_for_opponent() {
    let mut game = new_game(CardClass::Mage, CardClass::Warrior);
    let theirs = game.hand(P1).len();
    play(&mut game, P0, "TB_GIFT");

    assert_eq!(game.hand(P1).len(), theirs + 1);
    let gift = *game.hand(P1).last().unwrap();
    assert_eq!(game.entity(gift).unwrap().owner, P1);
    assert_eq!(game.card_of(gift).unwrap().class, CardClass::Mage);
    assert!(game.zones().entities(P1, ZoneType::SetAside).is_empty());
    game.check_zone_consistency().unwrap();
}

/// Test that a hero replacement swaps hero, power and weapon.
#[test]
fn test_replace_hero() {
    let mut game = new_game(CardClass::Warlock, CardClass::Hunter);
    let old_hero = game.hero(P0);
    let old_power = game.hero_power(P0);
    let jaraxxus = play(&mut game, P0, "EX1_323");

    let hero = game.hero(P0);
    assert_ne!(hero, old_hero);
    assert_eq!(code(&game, hero), "EX1_323h");
    assert_eq!(hero_health(&game, P0), 15);
    assert_eq!(game.entity(old_hero).unwrap().zone, ZoneType::Removed);
    assert_eq!(game.entity(old_power).unwrap().zone, ZoneType::Removed);
    assert_eq!(game.entity(jaraxxus).unwrap().zone, ZoneType::Removed);
    assert!(game.field(P0).is_empty());

    let weapon = game.weapon(P0).expect("weapon equipped");
    assert_eq!(code(&game, weapon), "EX1_323w");
    assert_eq!(game.entity(weapon).unwrap().attack(), 3);
    assert_eq!(game.entity(weapon).unwrap().durability(), 8);
    assert_eq!(game.attack_of(hero), 3);

    // Enemy selectors name the new hero.
    end_turn(&mut game);
    use_power(&mut game, P1, None);
    assert_eq!(hero_health(&game, P0), 13);

    end_turn(&mut game);
    use_power(&mut game, P0, None);
    assert_eq!(field_codes(&game, P0), vec!["EX1_tk34"]);
    let infernal = game.field(P0)[0];
    assert_eq!(game.attack_of(infernal), 6);
    assert_eq!(game.health_of(infernal), 6);
    game.check_zone_consistency().unwrap();
}

/// Test that a deathrattle summon takes the dead minion's slot.
#[test]
fn test_deathrattle_summons_in_place() {
    let mut game = new_game(CardClass::Mage, CardClass::Mage);
    play(&mut game, P0, "CS2_231");
    let golem = play(&mut game, P0, "EX1_556");
    play(&mut game, P0, "CS2_231");

    play_at(&mut game, P0, "CS2_029", golem);
    assert_eq!(game.entity(golem).unwrap().zone, ZoneType::Graveyard);
    assert_eq!(field_codes(&game, P0), vec!["CS2_231", "skele21", "CS2_231"]);
    game.check_zone_consistency().unwrap();
}

/// Test that the entourage power refuses once every totem is out.
#[test]
fn test_entourage_exhausts_pool() {
    let mut game = new_game(CardClass::Shaman, CardClass::Mage);
    for _ in 0..4 {
        use_power(&mut game, P0, None);
        pass_round(&mut game);
    }

    let mut codes = field_codes(&game, P0);
    codes.sort();
    assert_eq!(codes, vec!["CS2_050", "CS2_051", "CS2_052", "NEW1_009"]);

    game.set_mana(P0, 10);
    assert_eq!(
        game.validate(P0, &PlayerAction::hero_power(None)),
        Err(ActionError::RequirementFailed(hearth_engine::cards::PlayReq::EntireEntourageNotInPlay))
    );
}

// =============================================================================
// Enchantments
// =============================================================================

/// Test that a this-turn buff expires when the turn ends.
#[test]
fn test_one_turn_buff_expires() {
    let mut game = new_game(CardClass::Warrior, CardClass::Mage);
    let wisp = play(&mut game, P0, "CS2_231");
    play(&mut game, P0, "CS2_011");

    assert_eq!(game.attack_of(wisp), 3);
    assert_eq!(game.attack_of(game.hero(P0)), 2);

    end_turn(&mut game);
    assert_eq!(game.attack_of(wisp), 1);
    assert_eq!(game.attack_of(game.hero(P0)), 0);
}

/// Test that a minion-only buff rejects heroes and grants taunt.
#[test]
fn test_minion_buff_target_rules() {
    let mut game = new_game(CardClass::Warrior, CardClass::Mage);
    let wisp = play(&mut game, P0, "CS2_231");
    let mark = give(&mut game, P0, "CS2_009");
    game.set_mana(P0, 10);

    let enemy = game.hero(P1);
    let err = game.process(P0, PlayerAction::play_target(mark, enemy)).unwrap_err();
    assert_eq!(err, GameError::InvalidAction(ActionError::InvalidTarget));
    assert_eq!(game.entity(mark).unwrap().zone, ZoneType::Hand);

    game.process(P0, PlayerAction::play_target(mark, wisp)).unwrap();
    assert_eq!(game.attack_of(wisp), 3);
    assert_eq!(game.health_of(wisp), 3);
    assert!(game.entity(wisp).unwrap().has(GameTag::Taunt));
}

// =============================================================================
// Resources
// =============================================================================

/// Test that drawing from an empty deck deals growing fatigue damage.
#[test]
fn test_fatigue_damage_grows() {
    let mut game = start(
        config(CardClass::Mage, CardClass::Mage)
            .with_deck(P0, Vec::new())
            .with_deck(P1, Vec::new()),
    );
    // 1 + 2 + 3 opening, 4 on the first turn; the second player draws 1..4.
    assert_eq!(hero_health(&game, P0), 20);
    assert_eq!(hero_health(&game, P1), 20);

    end_turn(&mut game);
    assert_eq!(hero_health(&game, P1), 15);
}

/// Test that a weapon power equips and loses durability on attack.
#[test]
fn test_weapon_power_and_durability() {
    let mut game = new_game(CardClass::Rogue, CardClass::Mage);
    use_power(&mut game, P0, None);

    let hero = game.hero(P0);
    let weapon = game.weapon(P0).expect("dagger equipped");
    assert_eq!(code(&game, weapon), "CS2_082");
    assert_eq!(game.attack_of(hero), 1);

    let enemy = game.hero(P1);
    game.process(P0, PlayerAction::attack(hero, enemy)).unwrap();
    assert_eq!(hero_health(&game, P1), 29);
    assert_eq!(game.entity(weapon).unwrap().durability(), 1);
}

/// Test that overload locks crystals on the next turn.
#[test]
fn test_overload_locks_next_turn() {
    let mut game = new_game(CardClass::Shaman, CardClass::Mage);
    let bolt = give(&mut game, P0, "EX1_238");
    let enemy = game.hero(P1);
    game.process(P0, PlayerAction::play_target(bolt, enemy)).unwrap();

    assert_eq!(hero_health(&game, P1), 27);
    assert_eq!(game.player(P0).tags.get(GameTag::OverloadOwed), 1);

    pass_round(&mut game);
    assert_eq!(game.player(P0).total_mana(), 2);
    assert_eq!(game.player(P0).tags.get(GameTag::OverloadLocked), 1);
    assert_eq!(game.player(P0).remaining_mana(), 1);
}

/// Test that combo tasks replace the normal ones after another card.
#[test]
fn test_combo_after_another_card() {
    let mut plain = new_game(CardClass::Rogue, CardClass::Mage);
    let enemy = plain.hero(P1);
    play_at(&mut plain, P0, "EX1_124", enemy);
    assert_eq!(hero_health(&plain, P1), 28);

    let mut combo = new_game(CardClass::Rogue, CardClass::Mage);
    play(&mut combo, P0, "CS2_231");
    let enemy = combo.hero(P1);
    play_at(&mut combo, P0, "EX1_124", enemy);
    assert_eq!(hero_health(&combo, P1), 26);
}

/// Test that the coin grants one temporary crystal.
#[test]
fn test_coin_temp_mana() {
    let mut game = new_game(CardClass::Mage, CardClass::Mage);
    let coin = give(&mut game, P0, "GAME_005");
    assert_eq!(game.player(P0).remaining_mana(), 1);

    game.process(P0, PlayerAction::play(coin)).unwrap();
    assert_eq!(game.player(P0).remaining_mana(), 2);
    assert_eq!(game.entity(coin).unwrap().zone, ZoneType::Graveyard);

    end_turn(&mut game);
    assert_eq!(game.player(P0).tags.get(GameTag::TempResources), 0);
}
