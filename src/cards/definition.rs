//! Card definitions: the behavior attached to a card.
//!
//! A `CardDef` pairs a [`Power`] (what the card does) with a [`Property`]
//! (extra play requirements). Definitions are shared templates; every play
//! clones the task lists it needs, so running a card never changes its
//! definition.
//!
//! ## Example
//!
//! ```
//! use hearth_engine::cards::{CardDef, PlayReq};
//! use hearth_engine::tasks::{EntityType, Task};
//!
//! // Deal 6 damage.
//! let fireball = CardDef::new()
//!     .with_task(Task::damage(EntityType::Target, 6, true))
//!     .with_requirement(PlayReq::TargetToPlay, 0);
//!
//! assert_eq!(fireball.power.tasks.len(), 1);
//! ```

use rustc_hash::FxHashMap;

use crate::auras::{Aura, Enchant};
use crate::tasks::Task;
use crate::triggers::TriggerDef;

use super::card::PlayReq;

/// What a card does.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Power {
    /// Battlecry, spell effect, hero power effect.
    pub tasks: Vec<Task>,
    /// Replaces `tasks` when another card was played earlier this turn.
    pub combo: Vec<Task>,
    pub deathrattle: Vec<Task>,
    pub trigger: Option<TriggerDef>,
    pub aura: Option<Aura>,
    /// For enchantment cards: the modifier they apply.
    pub enchant: Option<Enchant>,
}

/// Extra play requirements on top of the card record's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    pub play_requirements: FxHashMap<PlayReq, i32>,
}

/// Behavior template for one card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardDef {
    pub power: Power,
    pub property: Property,
}

impl CardDef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.power.tasks.push(task);
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.power.tasks.extend(tasks);
        self
    }

    #[must_use]
    pub fn with_combo(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.power.combo.extend(tasks);
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, task: Task) -> Self {
        self.power.deathrattle.push(task);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerDef) -> Self {
        self.power.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: Aura) -> Self {
        self.power.aura = Some(aura);
        self
    }

    #[must_use]
    pub fn with_enchant(mut self, enchant: Enchant) -> Self {
        self.power.enchant = Some(enchant);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, req: PlayReq, value: i32) -> Self {
        self.property.play_requirements.insert(req, value);
        self
    }
}
