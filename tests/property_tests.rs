//! Property tests over randomly played matches.
//!
//! A match is a seed plus a list of picks; each pick indexes into the legal
//! actions of whoever has to act.

mod common;

use common::registry;
use hearth_engine::cards::CardClass;
use hearth_engine::core::{GameConfig, PlayerId};
use hearth_engine::game::Game;
use hearth_engine::rules::RulesEngine;
use proptest::prelude::*;

fn new_match(seed: u64) -> Game {
    let config = GameConfig::new(CardClass::Mage, CardClass::Warrior)
        .with_seed(seed)
        .with_fill_decks(true)
        .with_mulligan(true)
        .with_coin("GAME_005");
    let mut game = Game::new(config, registry()).expect("match builds");
    game.start().expect("match starts");
    game
}

/// The player the engine is waiting on.
fn actor(game: &Game) -> PlayerId {
    PlayerId::all()
        .find(|&p| game.pending_choice(p).is_some())
        .unwrap_or_else(|| game.current_player())
}

/// Play picks until they run out or the match ends, checking `check`
/// after every action.
fn play_out(seed: u64, picks: &[usize], mut check: impl FnMut(&Game)) -> Game {
    let mut game = new_match(seed);
    for &pick in picks {
        if game.is_over() {
            break;
        }
        let player = actor(&game);
        let actions = game.legal_actions(player);
        assert!(!actions.is_empty(), "{player} has nothing to do");
        let action = &actions[pick % actions.len()];
        game.apply_action(player, action)
            .unwrap_or_else(|e| panic!("{action:?} by {player} failed: {e}"));
        check(&game);
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Test that every entity stays where its zone says it is.
    #[test]
    fn test_zones_stay_consistent(seed in any::<u64>(), picks in prop::collection::vec(any::<usize>(), 0..200)) {
        play_out(seed, &picks, |game| {
            if let Err(e) = game.check_zone_consistency() {
                panic!("zone mismatch: {e}");
            }
        });
    }

    /// Test that an extra aura pass never changes the observable state.
    #[test]
    fn test_aura_pass_is_stable(seed in any::<u64>(), picks in prop::collection::vec(any::<usize>(), 0..120)) {
        play_out(seed, &picks, |game| {
            let mut copy = game.clone();
            copy.update_auras();
            assert_eq!(copy.snapshot(), game.snapshot());
        });
    }

    /// Test that the same seed and picks give byte-identical snapshots.
    #[test]
    fn test_replay_is_deterministic(seed in any::<u64>(), picks in prop::collection::vec(any::<usize>(), 0..200)) {
        let first = play_out(seed, &picks, |_| {}).snapshot().to_bytes().unwrap();
        let second = play_out(seed, &picks, |_| {}).snapshot().to_bytes().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Test that mana never goes negative and never exceeds the cap.
    #[test]
    fn test_mana_bounds(seed in any::<u64>(), picks in prop::collection::vec(any::<usize>(), 0..150)) {
        play_out(seed, &picks, |game| {
            for p in PlayerId::all() {
                let record = game.player(p);
                assert!(record.remaining_mana() >= 0);
                assert!(record.total_mana() <= game.config().max_mana);
            }
        });
    }
}
