//! Event plumbing shared by UI-thread components.
//!
//! Two primitives live here:
//!
//! - [`EventHooks`]: a registry of observers for events that are delivered
//!   outside any single component's own input handling (pointer motion over
//!   the whole window, for instance). Observers stay registered for as long as
//!   their [`HookRegistration`] is alive.
//! - [`TurnQueue`]: work deferred to the next turn of the UI event loop.
//!
//! Both are single-threaded by construction. The UI thread owns them and every
//! callback runs synchronously on it.

mod hooks;
mod turn;

pub use hooks::{
  EventHooks,
  HookRegistration,
  Observer,
  ObserverId,
};
pub use turn::{
  Job,
  Turn,
  TurnQueue,
};
