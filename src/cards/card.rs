//! Card records: the static metadata of a card.
//!
//! A `Card` is what the card loader hands the engine: id, code, class,
//! type, race, base stats, mechanic tags, play requirements and entourage.
//! The engine treats it as a read-only template. Per-match state lives on
//! [`Entity`](crate::core::Entity).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameTag, Tags};

/// Unique identifier for a card record.
///
/// This identifies the "type" of card (e.g., "Fireball"), not a specific
/// copy in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardClass {
    #[default]
    Invalid,
    Neutral,
    Druid,
    Hunter,
    Mage,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
}

impl CardClass {
    /// Classes a player can pick.
    pub const PLAYABLE: [CardClass; 9] = [
        CardClass::Druid,
        CardClass::Hunter,
        CardClass::Mage,
        CardClass::Paladin,
        CardClass::Priest,
        CardClass::Rogue,
        CardClass::Shaman,
        CardClass::Warlock,
        CardClass::Warrior,
    ];

    #[must_use]
    pub fn is_playable(self) -> bool {
        !matches!(self, Self::Invalid | Self::Neutral)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Invalid,
    Hero,
    HeroPower,
    Minion,
    Spell,
    Weapon,
    Enchantment,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    #[default]
    Invalid,
    Beast,
    Demon,
    Dragon,
    Elemental,
    Mech,
    Murloc,
    Pirate,
    Totem,
    All,
}

impl Race {
    /// `All` matches every race filter.
    #[must_use]
    pub fn matches(self, filter: Race) -> bool {
        filter == Race::Invalid || self == filter || self == Race::All
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSet {
    #[default]
    Core,
    Expert1,
    Naxx,
    Gvg,
    Brm,
    Tgt,
    Loe,
    Og,
    Kara,
    Gangs,
    Ungoro,
    HallOfFame,
    /// Cards built by tests and harnesses.
    Test,
}

/// Which sets random generation may draw from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatType {
    #[default]
    Standard,
    Wild,
}

impl FormatType {
    #[must_use]
    pub fn includes(self, set: CardSet) -> bool {
        match self {
            FormatType::Wild => true,
            FormatType::Standard => matches!(
                set,
                CardSet::Core
                    | CardSet::Expert1
                    | CardSet::Og
                    | CardSet::Kara
                    | CardSet::Gangs
                    | CardSet::Ungoro
                    | CardSet::Test
            ),
        }
    }
}

/// Requirement a play or hero power must satisfy before it is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayReq {
    TargetToPlay,
    TargetIfAvailable,
    MinionTarget,
    HeroTarget,
    FriendlyTarget,
    EnemyTarget,
    DamagedTarget,
    UndamagedTarget,
    FrozenTarget,
    NonSelfTarget,
    /// Target attack must be at most the requirement value.
    TargetMaxAttack,
    /// Target attack must be at least the requirement value.
    TargetMinAttack,
    /// Target race must equal the race whose discriminant is the value.
    TargetWithRace,
    MinimumEnemyMinions,
    MinimumTotalMinions,
    /// The board needs at least this many free slots.
    NumMinionSlots,
    WeaponEquipped,
    EntireEntourageNotInPlay,
}

impl PlayReq {
    /// Requirements that constrain the chosen target.
    #[must_use]
    pub fn is_target_filter(self) -> bool {
        matches!(
            self,
            PlayReq::MinionTarget
                | PlayReq::HeroTarget
                | PlayReq::FriendlyTarget
                | PlayReq::EnemyTarget
                | PlayReq::DamagedTarget
                | PlayReq::UndamagedTarget
                | PlayReq::FrozenTarget
                | PlayReq::NonSelfTarget
                | PlayReq::TargetMaxAttack
                | PlayReq::TargetMinAttack
                | PlayReq::TargetWithRace
        )
    }
}

/// Static card record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Stable string code, e.g. `"CS2_029"`.
    pub code: String,
    pub name: String,
    pub class: CardClass,
    pub card_type: CardType,
    pub race: Race,
    pub rarity: Rarity,
    pub set: CardSet,
    pub collectible: bool,
    pub cost: i32,
    pub attack: i32,
    pub health: Option<i32>,
    pub durability: Option<i32>,
    pub spell_power: Option<i32>,
    /// Mechanics, seeded onto each instance.
    pub game_tags: Tags,
    pub play_requirements: FxHashMap<PlayReq, i32>,
    /// Codes of the cards this card can create as a family.
    pub entourages: Vec<String>,
    /// Hero power code, for hero cards.
    pub hero_power: Option<String>,
}

impl Card {
    /// Create a card of the given type with everything else empty.
    pub fn new(id: CardId, code: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            class: CardClass::Neutral,
            card_type,
            race: Race::Invalid,
            rarity: Rarity::Free,
            set: CardSet::Test,
            collectible: false,
            cost: 0,
            attack: 0,
            health: None,
            durability: None,
            spell_power: None,
            game_tags: Tags::new(),
            play_requirements: FxHashMap::default(),
            entourages: Vec::new(),
            hero_power: None,
        }
    }

    pub fn minion(id: CardId, code: impl Into<String>, name: impl Into<String>, cost: i32, attack: i32, health: i32) -> Self {
        let mut card = Self::new(id, code, name, CardType::Minion);
        card.cost = cost;
        card.attack = attack;
        card.health = Some(health);
        card
    }

    pub fn spell(id: CardId, code: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        let mut card = Self::new(id, code, name, CardType::Spell);
        card.cost = cost;
        card
    }

    pub fn weapon(id: CardId, code: impl Into<String>, name: impl Into<String>, cost: i32, attack: i32, durability: i32) -> Self {
        let mut card = Self::new(id, code, name, CardType::Weapon);
        card.cost = cost;
        card.attack = attack;
        card.durability = Some(durability);
        card
    }

    pub fn hero(id: CardId, code: impl Into<String>, name: impl Into<String>, class: CardClass, health: i32, hero_power: impl Into<String>) -> Self {
        let mut card = Self::new(id, code, name, CardType::Hero);
        card.class = class;
        card.health = Some(health);
        card.hero_power = Some(hero_power.into());
        card
    }

    pub fn hero_power(id: CardId, code: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        let mut card = Self::new(id, code, name, CardType::HeroPower);
        card.cost = cost;
        card
    }

    pub fn enchantment(id: CardId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, code, name, CardType::Enchantment)
    }

    // === Builders ===

    #[must_use]
    pub fn with_class(mut self, class: CardClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn with_race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_set(mut self, set: CardSet) -> Self {
        self.set = set;
        self
    }

    #[must_use]
    pub fn collectible(mut self) -> Self {
        self.collectible = true;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: GameTag, value: i32) -> Self {
        self.game_tags.set(tag, value);
        self
    }

    #[must_use]
    pub fn with_spell_power(mut self, amount: i32) -> Self {
        self.spell_power = Some(amount);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, req: PlayReq, value: i32) -> Self {
        self.play_requirements.insert(req, value);
        self
    }

    #[must_use]
    pub fn with_entourage<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entourages.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Check a mechanic on the template.
    #[must_use]
    pub fn has_tag(&self, tag: GameTag) -> bool {
        self.game_tags.has(tag)
    }
}
