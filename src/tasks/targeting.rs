//! Entity selectors.
//!
//! An [`EntityType`] names a set of entities relative to the running task's
//! context. It is resolved when the task runs, never when the task list is
//! built, so `EnemyHero` after a hero replacement names the new hero.
//!
//! `All` and the other mixed selectors list the controller's side first:
//! hero, then field minions left to right, then the opponent's hero and
//! minions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::error::{GameError, Result};
use crate::game::Game;

use super::context::{TaskContext, TaskStack};

/// Resolved selection, in selector order.
pub type Targets = SmallVec<[EntityId; 8]>;

/// Symbolic target selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// The entity the task belongs to.
    Source,
    /// The chosen target of the play, or the event target for triggers.
    Target,
    Hero,
    EnemyHero,
    /// Both heroes and every minion.
    All,
    AllMinions,
    AllMinionsNoSource,
    /// Friendly minions.
    Minions,
    MinionsNoSource,
    EnemyMinions,
    /// The enemy hero and enemy minions.
    Enemies,
    /// The friendly hero and friendly minions.
    Friends,
    Weapon,
    EnemyWeapon,
    Hand,
    EnemyHand,
    Deck,
    /// The stack entities.
    Stack,
    EventSource,
    EventTarget,
    HeroPower,
    /// No selection. Resolving it is a contract violation.
    Invalid,
}

impl Game {
    /// Resolve a selector against a task context.
    pub(crate) fn resolve(&self, entity_type: EntityType, ctx: &TaskContext, stack: &TaskStack) -> Result<Targets> {
        let me = ctx.controller;
        let them = me.opponent();
        let mut out = Targets::new();

        match entity_type {
            EntityType::Source => out.push(ctx.source),
            EntityType::Target => out.extend(ctx.target),
            EntityType::Hero => out.push(self.players[me].hero),
            EntityType::EnemyHero => out.push(self.players[them].hero),
            EntityType::All => {
                self.push_side(&mut out, me);
                self.push_side(&mut out, them);
            }
            EntityType::AllMinions => {
                out.extend_from_slice(self.zones.field(me));
                out.extend_from_slice(self.zones.field(them));
            }
            EntityType::AllMinionsNoSource => {
                out.extend(
                    self.zones
                        .field(me)
                        .iter()
                        .chain(self.zones.field(them))
                        .copied()
                        .filter(|&id| id != ctx.source),
                );
            }
            EntityType::Minions => out.extend_from_slice(self.zones.field(me)),
            EntityType::MinionsNoSource => {
                out.extend(self.zones.field(me).iter().copied().filter(|&id| id != ctx.source));
            }
            EntityType::EnemyMinions => out.extend_from_slice(self.zones.field(them)),
            EntityType::Enemies => self.push_side(&mut out, them),
            EntityType::Friends => self.push_side(&mut out, me),
            EntityType::Weapon => out.extend(self.players[me].weapon),
            EntityType::EnemyWeapon => out.extend(self.players[them].weapon),
            EntityType::Hand => out.extend_from_slice(self.zones.hand(me)),
            EntityType::EnemyHand => out.extend_from_slice(self.zones.hand(them)),
            EntityType::Deck => out.extend_from_slice(self.zones.deck(me)),
            EntityType::Stack => out.extend_from_slice(&stack.entities),
            EntityType::EventSource => out.extend(ctx.event.as_ref().and_then(|e| e.source)),
            EntityType::EventTarget => out.extend(ctx.event.as_ref().and_then(|e| e.target)),
            EntityType::HeroPower => out.push(self.players[me].hero_power),
            EntityType::Invalid => {
                return Err(GameError::contract(format!(
                    "selector Invalid resolved for {} of {}",
                    ctx.source, me
                )));
            }
        }

        out.retain(|id| self.entities.contains_key(id));
        Ok(out)
    }

    fn push_side(&self, out: &mut Targets, player: PlayerId) {
        out.push(self.players[player].hero);
        out.extend_from_slice(self.zones.field(player));
    }
}
