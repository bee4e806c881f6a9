//! Trigger registry.
//!
//! A trigger is registered when its owning entity enters the zone named by
//! its definition (the field, unless stated otherwise) and removed when the
//! entity leaves it. Each trigger moves through
//! `Unregistered -> Active -> Removed` exactly once; removed ids are never
//! reused, so an event already queued for a removed trigger is dropped when
//! it reaches the front of the queue.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, EntityKind, PlayerId};
use crate::tasks::Task;
use crate::zones::ZoneType;

use super::condition::SelfCondition;
use super::event::{GameEvent, TriggerType};

/// Unique identifier for a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
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

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// Which event subjects a trigger reacts to, relative to its owner.
///
/// For turn events the filter applies to the player whose turn it is:
/// the friendly variants match the owner's turns, the enemy variants the
/// opponent's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerSource {
    /// The owning entity itself.
    SelfEntity,
    Friendly,
    Enemy,
    All,
    Hero,
    EnemyHero,
    FriendlyMinions,
    MinionsExceptSelf,
    EnemyMinions,
    AllMinions,
}

/// Trigger template stored on a card definition.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerDef {
    pub trigger_type: TriggerType,
    pub source: TriggerSource,
    pub tasks: Vec<Task>,
    /// Extra filter on the event subject.
    pub condition: Option<SelfCondition>,
    /// Fire once, then unregister.
    pub remove_after_triggered: bool,
    /// Zone in which the trigger is live.
    pub zone: ZoneType,
}

impl TriggerDef {
    #[must_use]
    pub fn new(trigger_type: TriggerType, source: TriggerSource) -> Self {
        Self {
            trigger_type,
            source,
            tasks: Vec::new(),
            condition: None,
            remove_after_triggered: false,
            zone: ZoneType::Play,
        }
    }

    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: SelfCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn once(mut self) -> Self {
        self.remove_after_triggered = true;
        self
    }

    /// Live in another zone, e.g. `Secret` or `Hand`.
    #[must_use]
    pub fn active_in(mut self, zone: ZoneType) -> Self {
        self.zone = zone;
        self
    }
}

/// Lifecycle state of a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerState {
    Unregistered,
    Active,
    Removed,
}

/// A live trigger bound to its owning entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger {
    pub id: TriggerId,
    pub owner: EntityId,
    pub controller: PlayerId,
    pub def: TriggerDef,
}

/// What the registry needs to know about the game to match and order
/// triggers.
pub trait TriggerContext {
    fn current_player(&self) -> PlayerId;

    fn owner_of(&self, entity: EntityId) -> Option<PlayerId>;

    fn kind_of(&self, entity: EntityId) -> Option<EntityKind>;

    fn hero_of(&self, player: PlayerId) -> EntityId;

    /// Left-to-right rank of an entity among its owner's trigger sources.
    fn board_order(&self, entity: EntityId) -> usize;

    /// Evaluate a trigger's subject condition.
    fn condition_holds(&self, trigger: &Trigger, condition: &SelfCondition, subject: EntityId) -> bool;
}

/// Registry for triggers.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    /// All active triggers.
    triggers: FxHashMap<TriggerId, Trigger>,

    /// Index by trigger type for fast lookup.
    by_type: FxHashMap<TriggerType, Vec<TriggerId>>,

    /// Next trigger ID to allocate.
    next_id: u32,
}

impl TriggerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a trigger for an owner, returns its ID.
    pub fn register(&mut self, owner: EntityId, controller: PlayerId, def: TriggerDef) -> TriggerId {
        let id = TriggerId::new(self.next_id);
        self.next_id += 1;

        self.by_type.entry(def.trigger_type).or_default().push(id);
        self.triggers.insert(
            id,
            Trigger {
                id,
                owner,
                controller,
                def,
            },
        );
        id
    }

    /// Remove a trigger. It can never become active again.
    pub fn unregister(&mut self, id: TriggerId) -> Option<Trigger> {
        let trigger = self.triggers.remove(&id)?;
        if let Some(list) = self.by_type.get_mut(&trigger.def.trigger_type) {
            list.retain(|&tid| tid != id);
            if list.is_empty() {
                self.by_type.remove(&trigger.def.trigger_type);
            }
        }
        Some(trigger)
    }

    #[must_use]
    pub fn state(&self, id: TriggerId) -> TriggerState {
        if self.triggers.contains_key(&id) {
            TriggerState::Active
        } else if id.0 < self.next_id {
            TriggerState::Removed
        } else {
            TriggerState::Unregistered
        }
    }

    #[must_use]
    pub fn is_active(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(&id)
    }

    /// Get a trigger by ID.
    #[must_use]
    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(&id)
    }

    /// Find all triggers that should fire for an event.
    ///
    /// Ordered with the current player's triggers first, then by the
    /// owner's board position left to right, then by registration order.
    pub fn find_triggers(&self, event: &GameEvent, ctx: &impl TriggerContext) -> Vec<TriggerId> {
        let Some(ids) = self.by_type.get(&event.trigger_type) else {
            return Vec::new();
        };
        let current = ctx.current_player();

        let mut matched: Vec<(bool, usize, TriggerId)> = ids
            .iter()
            .filter_map(|id| self.triggers.get(id))
            .filter(|trigger| Self::matches(trigger, event, ctx))
            .map(|trigger| {
                (
                    trigger.controller != current,
                    ctx.board_order(trigger.owner),
                    trigger.id,
                )
            })
            .collect();

        matched.sort_unstable();
        matched.into_iter().map(|(_, _, id)| id).collect()
    }

    fn matches(trigger: &Trigger, event: &GameEvent, ctx: &impl TriggerContext) -> bool {
        let controller = trigger.controller;
        if trigger.def.zone == ZoneType::Secret && ctx.current_player() == controller {
            return false;
        }

        let source_ok = match event.subject() {
            None => match trigger.def.source {
                TriggerSource::All => true,
                TriggerSource::Enemy | TriggerSource::EnemyHero | TriggerSource::EnemyMinions => {
                    event.player != controller
                }
                _ => event.player == controller,
            },
            Some(subject) => {
                let owner = ctx.owner_of(subject);
                let friendly = owner == Some(controller);
                let minion = ctx.kind_of(subject) == Some(EntityKind::Minion);
                match trigger.def.source {
                    TriggerSource::SelfEntity => subject == trigger.owner,
                    TriggerSource::Friendly => friendly,
                    TriggerSource::Enemy => owner.is_some() && !friendly,
                    TriggerSource::All => true,
                    TriggerSource::Hero => subject == ctx.hero_of(controller),
                    TriggerSource::EnemyHero => subject == ctx.hero_of(controller.opponent()),
                    TriggerSource::FriendlyMinions => friendly && minion,
                    TriggerSource::MinionsExceptSelf => friendly && minion && subject != trigger.owner,
                    TriggerSource::EnemyMinions => owner.is_some() && !friendly && minion,
                    TriggerSource::AllMinions => minion,
                }
            }
        };
        if !source_ok {
            return false;
        }

        match &trigger.def.condition {
            None => true,
            Some(condition) => {
                let subject = event.subject().unwrap_or(trigger.owner);
                ctx.condition_holds(trigger, condition, subject)
            }
        }
    }

    /// Find triggers owned by an entity.
    pub fn triggers_for_source(&self, owner: EntityId) -> Vec<&Trigger> {
        let mut found: Vec<_> = self.triggers.values().filter(|t| t.owner == owner).collect();
        found.sort_by_key(|t| t.id);
        found
    }

    /// Remove all triggers owned by an entity. Returns how many were removed.
    pub fn remove_for_source(&mut self, owner: EntityId) -> usize {
        let mut to_remove: Vec<_> = self
            .triggers
            .iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(&id, _)| id)
            .collect();
        to_remove.sort_unstable();

        for &id in &to_remove {
            self.unregister(id);
        }
        to_remove.len()
    }

    /// Get active trigger count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate active triggers.
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.values()
    }
}
