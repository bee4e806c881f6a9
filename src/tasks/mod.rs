//! Task interpreter.
//!
//! - [`Task`]: the closed set of task kinds
//! - [`EntityType`]: selectors resolved at execution time
//! - [`Execution`] / [`TaskContext`] / [`TaskStack`]: a running list
//! - [`Game::execute`](crate::game::Game::execute): the interpreter loop

pub mod context;
pub mod executor;
pub mod targeting;
pub mod task;

pub use context::{Execution, TaskContext, TaskStack};
pub use targeting::{EntityType, Targets};
pub use task::{SummonSide, Task, TaskStatus};
