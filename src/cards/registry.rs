//! Card registry for record and definition lookup.
//!
//! The `CardRegistry` is built once and shared between matches behind an
//! `Arc`. It is read-only while games run.

use rustc_hash::FxHashMap;

use crate::error::{GameError, Result};

use super::card::{Card, CardClass, CardId, CardType, FormatType};
use super::definition::CardDef;

/// Registry of card records and definitions.
///
/// ## Example
///
/// ```
/// use hearth_engine::cards::{Card, CardDef, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// let wisp = Card::minion(CardId::new(1), "CS2_231", "Wisp", 0, 1, 1);
/// registry.register(wisp, CardDef::new()).unwrap();
///
/// assert_eq!(registry.by_code("CS2_231").unwrap().name, "Wisp");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    defs: FxHashMap<CardId, CardDef>,
    by_code: FxHashMap<String, CardId>,
    /// Registration order; pools are built in this order.
    order: Vec<CardId>,
    default_heroes: FxHashMap<CardClass, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card with its definition.
    pub fn register(&mut self, card: Card, def: CardDef) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(GameError::Config(format!("{} already registered", card.id)));
        }
        if self.by_code.contains_key(&card.code) {
            return Err(GameError::Config(format!("card code {} already registered", card.code)));
        }
        let id = card.id;
        self.by_code.insert(card.code.clone(), id);
        self.cards.insert(id, card);
        self.defs.insert(id, def);
        self.order.push(id);
        Ok(())
    }

    /// Next free id above every registered one.
    #[must_use]
    pub fn next_id(&self) -> CardId {
        CardId::new(self.cards.keys().map(|id| id.0 + 1).max().unwrap_or(1))
    }

    /// Make a registered hero card the starting hero for its class.
    pub fn set_default_hero(&mut self, code: &str) -> Result<()> {
        let card = self
            .by_code(code)
            .ok_or_else(|| GameError::Config(format!("unknown hero {code}")))?;
        if card.card_type != CardType::Hero {
            return Err(GameError::Config(format!("{code} is not a hero card")));
        }
        let (class, id) = (card.class, card.id);
        self.default_heroes.insert(class, id);
        Ok(())
    }

    #[must_use]
    pub fn default_hero(&self, class: CardClass) -> Option<&Card> {
        self.default_heroes.get(&class).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Card> {
        self.by_code.get(code).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Card> {
        self.iter().find(|card| card.name == name)
    }

    #[must_use]
    pub fn def(&self, id: CardId) -> Option<&CardDef> {
        self.defs.get(&id)
    }

    /// Collectible cards legal in a format, in registration order.
    pub fn pool(&self, format: FormatType) -> impl Iterator<Item = &Card> {
        self.iter()
            .filter(move |card| card.collectible && format.includes(card.set))
    }

    /// Iterate cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardSet;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry
            .register(Card::minion(CardId::new(1), "A", "Alpha", 1, 1, 1).collectible(), CardDef::new())
            .unwrap();
        registry
            .register(
                Card::minion(CardId::new(2), "B", "Beta", 2, 2, 2).collectible().with_set(CardSet::Naxx),
                CardDef::new(),
            )
            .unwrap();
        registry
            .register(Card::minion(CardId::new(3), "C", "Token", 1, 1, 1), CardDef::new())
            .unwrap();
        registry
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.by_code("B").map(|c| c.id), Some(CardId::new(2)));
        assert_eq!(registry.by_name("Alpha").map(|c| c.id), Some(CardId::new(1)));
        assert!(registry.def(CardId::new(3)).is_some());
        assert_eq!(registry.next_id(), CardId::new(4));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = registry();
        let dup = Card::minion(CardId::new(1), "Z", "Z", 1, 1, 1);
        assert!(registry.register(dup, CardDef::new()).is_err());
        let dup_code = Card::minion(CardId::new(9), "A", "Z", 1, 1, 1);
        assert!(registry.register(dup_code, CardDef::new()).is_err());
    }

    #[test]
    fn test_pool_by_format() {
        let registry = registry();
        let standard: Vec<_> = registry.pool(FormatType::Standard).map(|c| c.code.as_str()).collect();
        let wild: Vec<_> = registry.pool(FormatType::Wild).map(|c| c.code.as_str()).collect();
        assert_eq!(standard, vec!["A"]);
        assert_eq!(wild, vec!["A", "B"]);
    }

    #[test]
    fn test_default_hero() {
        let mut registry = registry();
        registry
            .register(
                Card::hero(CardId::new(10), "HERO_08", "Jaina", CardClass::Mage, 30, "CS2_034"),
                CardDef::new(),
            )
            .unwrap();
        assert!(registry.set_default_hero("A").is_err());
        registry.set_default_hero("HERO_08").unwrap();
        assert_eq!(registry.default_hero(CardClass::Mage).map(|c| c.id), Some(CardId::new(10)));
        assert!(registry.default_hero(CardClass::Rogue).is_none());
    }
}
