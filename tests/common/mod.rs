//! Shared fixtures: a small card pool and match helpers.

#![allow(dead_code)]

use std::sync::Arc;

use hearth_engine::auras::{Aura, AuraScope, Enchant};
use hearth_engine::cards::{Card, CardClass, CardDef, CardId, CardRegistry, CardType, PlayReq, Race};
use hearth_engine::core::{EntityId, GameConfig, GameTag, PlayerAction, PlayerId, StartPlayer};
use hearth_engine::game::{Game, Step};
use hearth_engine::tasks::{EntityType, SummonSide, Task};
use hearth_engine::triggers::{SelfCondition, TriggerDef, TriggerSource, TriggerType};
use hearth_engine::zones::ZoneType;

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

struct Pool {
    registry: CardRegistry,
    next: u32,
}

impl Pool {
    fn add(&mut self, card: impl FnOnce(CardId) -> Card, def: CardDef) {
        let id = CardId::new(self.next);
        self.next += 1;
        self.registry.register(card(id), def).expect("fixture card registers");
    }

    fn plain(&mut self, card: impl FnOnce(CardId) -> Card) {
        self.add(card, CardDef::new());
    }
}

/// The fixture card pool.
pub fn registry() -> Arc<CardRegistry> {
    let mut pool = Pool {
        registry: CardRegistry::new(),
        next: 1,
    };
    heroes(&mut pool);
    minions(&mut pool);
    spells(&mut pool);
    weapons(&mut pool);
    enchantments(&mut pool);

    for hero in ["HERO_01", "HERO_02", "HERO_03", "HERO_05", "HERO_07", "HERO_08", "HERO_09"] {
        pool.registry.set_default_hero(hero).expect("fixture hero");
    }
    Arc::new(pool.registry)
}

fn heroes(pool: &mut Pool) {
    pool.plain(|id| Card::hero(id, "HERO_01", "Garrosh Hellscream", CardClass::Warrior, 30, "CS2_102"));
    pool.add(
        |id| Card::hero_power(id, "CS2_102", "Armor Up!", 2),
        CardDef::new().with_task(Task::Armor(2)),
    );

    pool.plain(|id| Card::hero(id, "HERO_02", "Thrall", CardClass::Shaman, 30, "CS2_049"));
    pool.add(
        |id| {
            Card::hero_power(id, "CS2_049", "Totemic Call", 2)
                .with_entourage(["CS2_050", "CS2_051", "NEW1_009", "CS2_052"])
                .with_requirement(PlayReq::EntireEntourageNotInPlay, 0)
                .with_requirement(PlayReq::NumMinionSlots, 1)
        },
        CardDef::new().with_tasks([
            Task::RandomEntourage {
                count: 1,
                exclude_in_play: true,
            },
            Task::AddStackTo(EntityType::Minions),
        ]),
    );

    pool.plain(|id| Card::hero(id, "HERO_03", "Valeera Sanguinar", CardClass::Rogue, 30, "CS2_083b"));
    pool.add(
        |id| Card::hero_power(id, "CS2_083b", "Dagger Mastery", 2),
        CardDef::new().with_task(Task::Weapon("CS2_082".into())),
    );

    pool.plain(|id| Card::hero(id, "HERO_05", "Rexxar", CardClass::Hunter, 30, "DS1h_292"));
    pool.add(
        |id| Card::hero_power(id, "DS1h_292", "Steady Shot", 2),
        CardDef::new().with_task(Task::damage(EntityType::EnemyHero, 2, false)),
    );

    pool.plain(|id| Card::hero(id, "HERO_07", "Gul'dan", CardClass::Warlock, 30, "CS2_056"));
    pool.add(
        |id| Card::hero_power(id, "CS2_056", "Life Tap", 2),
        CardDef::new().with_tasks([Task::Draw(1), Task::damage(EntityType::Hero, 2, false)]),
    );

    pool.plain(|id| Card::hero(id, "HERO_08", "Jaina Proudmoore", CardClass::Mage, 30, "CS2_034"));
    pool.add(
        |id| Card::hero_power(id, "CS2_034", "Fireblast", 2).with_requirement(PlayReq::TargetToPlay, 0),
        CardDef::new().with_task(Task::damage(EntityType::Target, 1, false)),
    );

    pool.plain(|id| Card::hero(id, "HERO_09", "Anduin Wrynn", CardClass::Priest, 30, "CS1h_001"));
    pool.add(
        |id| Card::hero_power(id, "CS1h_001", "Lesser Heal", 2).with_requirement(PlayReq::TargetToPlay, 0),
        CardDef::new().with_task(Task::heal(EntityType::Target, 2)),
    );

    // Jaraxxus' replacement kit.
    pool.plain(|id| Card::hero(id, "EX1_323h", "Lord Jaraxxus", CardClass::Warlock, 15, "EX1_tk33"));
    pool.add(
        |id| Card::hero_power(id, "EX1_tk33", "INFERNO!", 2),
        CardDef::new().with_task(Task::summon("EX1_tk34")),
    );
}

fn minions(pool: &mut Pool) {
    pool.plain(|id| Card::minion(id, "CS2_231", "Wisp", 0, 1, 1).collectible());
    pool.plain(|id| Card::minion(id, "CS2_182", "Chillwind Yeti", 4, 4, 5).collectible());
    pool.plain(|id| {
        Card::minion(id, "CS2_179", "Sen'jin Shieldmasta", 4, 3, 5)
            .with_tag(GameTag::Taunt, 1)
            .collectible()
    });
    pool.plain(|id| {
        Card::minion(id, "EX1_008", "Argent Squire", 1, 1, 1)
            .with_tag(GameTag::DivineShield, 1)
            .collectible()
    });
    pool.plain(|id| {
        Card::minion(id, "CS2_124", "Wolfrider", 3, 3, 1)
            .with_tag(GameTag::Charge, 1)
            .collectible()
    });
    pool.plain(|id| {
        Card::minion(id, "CS2_142", "Kobold Geomancer", 2, 2, 2)
            .with_spell_power(1)
            .collectible()
    });

    pool.add(
        |id| Card::minion(id, "CS2_122", "Raid Leader", 3, 2, 2).collectible(),
        CardDef::new().with_aura(Aura::new(AuraScope::FieldExceptSource, Enchant::stats(1, 0))),
    );
    pool.add(
        |id| Card::minion(id, "TB_BANNER", "Banner Bearer", 4, 2, 2),
        CardDef::new().with_aura(Aura::new(AuraScope::FieldExceptSource, Enchant::stats(2, 2))),
    );

    pool.add(
        |id| {
            Card::minion(id, "BRM_006", "Imp Gang Boss", 3, 2, 4)
                .with_class(CardClass::Warlock)
                .with_race(Race::Demon)
                .collectible()
        },
        CardDef::new().with_trigger(
            TriggerDef::new(TriggerType::TakeDamage, TriggerSource::SelfEntity)
                .with_task(Task::summon_side("BRM_006t", SummonSide::Right)),
        ),
    );
    pool.plain(|id| Card::minion(id, "BRM_006t", "Imp", 1, 1, 1).with_race(Race::Demon));
    pool.add(
        |id| Card::minion(id, "TB_SCHOLAR", "Arcane Scholar", 2, 2, 3).with_class(CardClass::Mage),
        CardDef::new().with_trigger(
            TriggerDef::new(TriggerType::TurnStart, TriggerSource::Friendly).with_task(Task::Discover {
                card_type: CardType::Spell,
                race: Race::Invalid,
            }),
        ),
    );
    pool.add(
        |id| Card::minion(id, "TB_SLINGER", "Spellslinger", 3, 3, 4).with_class(CardClass::Mage),
        CardDef::new().with_tasks([
            Task::RandomCard {
                entity_type: EntityType::Invalid,
                card_type: CardType::Spell,
                card_class: CardClass::Mage,
                race: Race::Invalid,
                opposite: false,
            },
            Task::AddStackTo(EntityType::Hand),
            Task::RandomCard {
                entity_type: EntityType::Invalid,
                card_type: CardType::Spell,
                card_class: CardClass::Mage,
                race: Race::Invalid,
                opposite: false,
            },
            Task::AddStackTo(EntityType::EnemyHand),
        ]),
    );

    pool.add(
        |id| {
            Card::minion(id, "EX1_556", "Harvest Golem", 3, 2, 3)
                .with_race(Race::Mech)
                .collectible()
        },
        CardDef::new().with_deathrattle(Task::summon_side("skele21", SummonSide::InPlace)),
    );
    pool.plain(|id| Card::minion(id, "skele21", "Damaged Golem", 1, 2, 1).with_race(Race::Mech));

    pool.add(
        |id| Card::minion(id, "EX1_029", "Leper Gnome", 1, 1, 1).collectible(),
        CardDef::new().with_deathrattle(Task::damage(EntityType::EnemyHero, 2, false)),
    );

    pool.add(
        |id| {
            Card::minion(id, "CS2_189", "Elven Archer", 1, 1, 1)
                .with_requirement(PlayReq::TargetIfAvailable, 0)
                .collectible()
        },
        CardDef::new().with_task(Task::damage(EntityType::Target, 1, false)),
    );

    pool.add(
        |id| Card::minion(id, "EX1_015", "Novice Engineer", 2, 1, 1).collectible(),
        CardDef::new().with_task(Task::Draw(1)),
    );

    pool.add(
        |id| {
            Card::minion(id, "KAR_069", "Swashburglar", 1, 1, 1)
                .with_class(CardClass::Rogue)
                .with_race(Race::Pirate)
                .collectible()
        },
        CardDef::new().with_tasks([
            Task::RandomCard {
                entity_type: EntityType::EnemyHero,
                card_type: CardType::Invalid,
                card_class: CardClass::Invalid,
                race: Race::Invalid,
                opposite: false,
            },
            Task::AddStackTo(EntityType::Hand),
        ]),
    );

    pool.add(
        |id| {
            Card::minion(id, "EX1_323", "Lord Jaraxxus", 9, 3, 15)
                .with_class(CardClass::Warlock)
                .with_race(Race::Demon)
                .collectible()
        },
        CardDef::new().with_task(Task::ReplaceHero {
            hero: "EX1_323h".into(),
            power: "EX1_tk33".into(),
            weapon: Some("EX1_323w".into()),
        }),
    );
    pool.plain(|id| Card::minion(id, "EX1_tk34", "Infernal", 6, 6, 6).with_race(Race::Demon));

    pool.add(
        |id| Card::minion(id, "TB_MISFIRE", "Misfire Golem", 1, 1, 1),
        CardDef::new().with_tasks([Task::Armor(1), Task::Include(EntityType::Invalid), Task::Armor(5)]),
    );

    // Totems for Totemic Call.
    pool.plain(|id| Card::minion(id, "CS2_050", "Searing Totem", 1, 1, 1).with_race(Race::Totem));
    pool.plain(|id| {
        Card::minion(id, "CS2_051", "Stoneclaw Totem", 1, 0, 2)
            .with_race(Race::Totem)
            .with_tag(GameTag::Taunt, 1)
    });
    pool.plain(|id| Card::minion(id, "NEW1_009", "Healing Totem", 1, 0, 2).with_race(Race::Totem));
    pool.plain(|id| {
        Card::minion(id, "CS2_052", "Wrath of Air Totem", 1, 0, 2)
            .with_race(Race::Totem)
            .with_spell_power(1)
    });
}

fn spells(pool: &mut Pool) {
    let target = |card: Card| card.with_requirement(PlayReq::TargetToPlay, 0);

    pool.add(
        |id| target(Card::spell(id, "CS2_029", "Fireball", 4).with_class(CardClass::Mage).collectible()),
        CardDef::new().with_task(Task::damage(EntityType::Target, 6, true)),
    );
    pool.add(
        |id| target(Card::spell(id, "CS2_024", "Frostbolt", 2).with_class(CardClass::Mage).collectible()),
        CardDef::new().with_tasks([
            Task::damage(EntityType::Target, 3, true),
            Task::Freeze(EntityType::Target),
        ]),
    );
    pool.add(
        |id| Card::spell(id, "CS2_023", "Arcane Intellect", 3).with_class(CardClass::Mage).collectible(),
        CardDef::new().with_task(Task::Draw(2)),
    );
    pool.add(
        |id| Card::spell(id, "UNG_941", "Primordial Glyph", 2).with_class(CardClass::Mage).collectible(),
        CardDef::new().with_tasks([
            Task::Discover {
                card_type: CardType::Spell,
                race: Race::Invalid,
            },
            Task::Armor(1),
        ]),
    );

    pool.add(
        |id| target(Card::spell(id, "BRM_013", "Quick Shot", 2).with_class(CardClass::Hunter).collectible()),
        CardDef::new().with_tasks([
            Task::damage(EntityType::Target, 3, true),
            Task::condition(EntityType::Hero, SelfCondition::IsHandEmpty),
            Task::flag(true, [Task::Draw(1)]),
        ]),
    );
    pool.add(
        |id| {
            Card::spell(id, "EX1_611", "Freezing Trap", 2)
                .with_class(CardClass::Hunter)
                .with_tag(GameTag::Secret, 1)
                .collectible()
        },
        CardDef::new().with_trigger(
            TriggerDef::new(TriggerType::Attack, TriggerSource::EnemyMinions)
                .with_tasks([
                    Task::ReturnHand(EntityType::EventSource),
                    Task::enchant("EX1_611e", EntityType::EventSource),
                ])
                .once()
                .active_in(ZoneType::Secret),
        ),
    );

    pool.add(
        |id| Card::spell(id, "EX1_400", "Whirlwind", 1).with_class(CardClass::Warrior).collectible(),
        CardDef::new().with_task(Task::damage(EntityType::AllMinions, 1, true)),
    );

    pool.add(
        |id| Card::spell(id, "CS2_062", "Hellfire", 4).with_class(CardClass::Warlock).collectible(),
        CardDef::new().with_task(Task::damage(EntityType::All, 3, true)),
    );

    pool.add(
        |id| Card::spell(id, "CS2_011", "Savage Roar", 3).with_class(CardClass::Druid).collectible(),
        CardDef::new().with_task(Task::enchant("CS2_011o", EntityType::Friends)),
    );
    pool.add(
        |id| {
            target(Card::spell(id, "CS2_009", "Mark of the Wild", 2).with_class(CardClass::Druid).collectible())
                .with_requirement(PlayReq::MinionTarget, 0)
        },
        CardDef::new().with_task(Task::enchant("CS2_009e", EntityType::Target)),
    );

    pool.add(
        |id| {
            target(Card::spell(id, "EX1_238", "Lightning Bolt", 1).with_class(CardClass::Shaman).collectible())
                .with_tag(GameTag::Overload, 1)
        },
        CardDef::new().with_task(Task::damage(EntityType::Target, 3, true)),
    );

    pool.add(
        |id| target(Card::spell(id, "EX1_124", "Eviscerate", 2).with_class(CardClass::Rogue).collectible()),
        CardDef::new()
            .with_task(Task::damage(EntityType::Target, 2, true))
            .with_combo([Task::damage(EntityType::Target, 4, true)]),
    );

    // Hits a random enemy minion if there is one; the armor comes regardless.
    pool.add(
        |id| Card::spell(id, "TB_NESTED", "Scattershot", 1),
        CardDef::new().with_tasks([
            Task::Sequence(vec![
                Task::Include(EntityType::EnemyMinions),
                Task::RandomPick(1),
                Task::damage(EntityType::Stack, 2, false),
            ]),
            Task::Armor(3),
        ]),
    );

    pool.add(
        |id| target(Card::spell(id, "TB_DOUBLE", "Double Strike", 0)),
        CardDef::new().with_tasks([
            Task::damage(EntityType::Target, 1, true),
            Task::damage(EntityType::Target, 1, true),
        ]),
    );
    pool.add(
        |id| Card::spell(id, "TB_GIFT", "Mysterious Gift", 0),
        CardDef::new().with_tasks([
            Task::RandomCard {
                entity_type: EntityType::Hero,
                card_type: CardType::Invalid,
                card_class: CardClass::Invalid,
                race: Race::Invalid,
                opposite: true,
            },
            Task::AddStackTo(EntityType::EnemyHand),
        ]),
    );
    pool.add(
        |id| Card::spell(id, "TB_RUNAWAY", "Runaway Sum", 0),
        CardDef::new().with_tasks([
            Task::GetGameTag {
                entity_type: EntityType::Hero,
                tag: GameTag::Health,
            },
            Task::MathMultiply(i32::MAX),
            Task::MathAdd(1),
            Task::MathAdd(3 - i32::MAX),
            Task::DamageNumber {
                entity_type: EntityType::EnemyHero,
                spell_damage: false,
            },
        ]),
    );

    pool.add(
        |id| Card::spell(id, "GAME_005", "The Coin", 0),
        CardDef::new().with_task(Task::TempMana(1)),
    );
}

fn weapons(pool: &mut Pool) {
    pool.plain(|id| Card::weapon(id, "CS2_106", "Fiery War Axe", 3, 3, 2).with_class(CardClass::Warrior).collectible());
    pool.plain(|id| Card::weapon(id, "CS2_082", "Wicked Knife", 1, 1, 2).with_class(CardClass::Rogue));
    pool.plain(|id| Card::weapon(id, "EX1_323w", "Blood Fury", 3, 3, 8).with_class(CardClass::Warlock));
}

fn enchantments(pool: &mut Pool) {
    pool.add(
        |id| Card::enchantment(id, "CS2_011o", "Savage Roar"),
        CardDef::new().with_enchant(Enchant::stats(2, 0).this_turn()),
    );
    pool.add(
        |id| Card::enchantment(id, "CS2_009e", "Mark of the Wild"),
        CardDef::new().with_enchant(Enchant::stats(2, 2).with_grant(GameTag::Taunt)),
    );
    pool.add(
        |id| Card::enchantment(id, "EX1_611e", "Trapped"),
        CardDef::new().with_enchant(Enchant::default().with_cost(2)),
    );
}

// === Match helpers ===

/// Thirty wisps per side, no shuffle, no mulligan, player 0 first.
pub fn config(p0: CardClass, p1: CardClass) -> GameConfig {
    let deck = vec!["CS2_231".to_string(); 30];
    GameConfig::new(p0, p1)
        .with_seed(7)
        .with_shuffle(false)
        .with_start_player(StartPlayer::Fixed(P0))
        .with_deck(P0, deck.clone())
        .with_deck(P1, deck)
}

/// A started match waiting on player 0's first action.
pub fn new_game(p0: CardClass, p1: CardClass) -> Game {
    start(config(p0, p1))
}

pub fn start(config: GameConfig) -> Game {
    let mut game = Game::new(config, registry()).expect("fixture game builds");
    game.start().expect("fixture game starts");
    game
}

/// Put a card into a player's hand.
pub fn give(game: &mut Game, player: PlayerId, code: &str) -> EntityId {
    game.give_card(player, code).expect("card exists")
}

/// Give a card, refill mana and play it without a target.
pub fn play(game: &mut Game, player: PlayerId, code: &str) -> EntityId {
    let id = give(game, player, code);
    game.set_mana(player, 10);
    game.process(player, PlayerAction::play(id)).expect("play accepted");
    id
}

/// Give a card, refill mana and play it at a target.
pub fn play_at(game: &mut Game, player: PlayerId, code: &str, target: EntityId) -> EntityId {
    let id = give(game, player, code);
    game.set_mana(player, 10);
    game.process(player, PlayerAction::play_target(id, target)).expect("play accepted");
    id
}

/// End the current player's turn.
pub fn end_turn(game: &mut Game) {
    let player = game.current_player();
    game.process(player, PlayerAction::EndTurn).expect("end turn accepted");
    assert_eq!(game.step(), Step::MainAction);
}

/// End two turns so the current player's minions are ready.
pub fn pass_round(game: &mut Game) {
    end_turn(game);
    end_turn(game);
}

pub fn hero_health(game: &Game, player: PlayerId) -> i32 {
    game.health_of(game.hero(player))
}

/// Refill mana and use the hero power.
pub fn use_power(game: &mut Game, player: PlayerId, target: Option<EntityId>) {
    game.set_mana(player, 10);
    game.process(player, PlayerAction::hero_power(target)).expect("hero power accepted");
}

/// Card code of an entity.
pub fn code(game: &Game, id: EntityId) -> String {
    game.card_of(id).map(|c| c.code.clone()).unwrap_or_default()
}

/// Card codes on a player's field, left to right.
pub fn field_codes(game: &Game, player: PlayerId) -> Vec<String> {
    game.field(player).iter().map(|&id| code(game, id)).collect()
}
