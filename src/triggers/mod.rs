//! Event-driven trigger system.
//!
//! - [`GameEvent`] / [`TriggerType`]: what happened
//! - [`TriggerDef`]: an event kind, a source filter and a task list, stored
//!   on a card definition
//! - [`TriggerRegistry`]: the live triggers, matched and ordered per event
//! - [`SelfCondition`] / [`ConditionEvaluator`]: entity predicates shared
//!   with tasks and auras

pub mod condition;
pub mod event;
pub mod registry;

pub use condition::{ConditionEvaluator, SelfCondition};
pub use event::{GameEvent, TriggerType};
pub use registry::{
    Trigger, TriggerContext, TriggerDef, TriggerId, TriggerRegistry, TriggerSource, TriggerState,
};
