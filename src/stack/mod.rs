//! Pending-execution queue.
//!
//! Effects resolve immediately in this game: there is no response window
//! and no priority passing. What still needs ordering is the work an action
//! schedules and the reactions it provokes:
//!
//! - the **agenda**: the phases an action was split into (fire `PlayCard`,
//!   run the battlecry, fire `AfterSummon`, ...)
//! - the **triggered** queue: trigger firings and deathrattles provoked
//!   while an agenda item ran
//!
//! Triggered items always drain before the next agenda item, each in
//! enqueue order, so every reaction to a phase completes before the next
//! phase starts.

mod queue;

pub use queue::{Pending, TaskQueue};
