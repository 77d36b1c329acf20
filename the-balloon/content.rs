//! What the balloon is currently showing.

use crate::{
  config::BalloonConfig,
  host::Popup,
  translation::Translation,
};

/// Content of the balloon. Exactly one is visible at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
  /// A query is in flight.
  Processing,
  Result(Translation),
  /// The query failed; the message is shown verbatim.
  Error(String),
}

impl DisplayState {
  pub fn kind(&self) -> DisplayKind {
    match self {
      DisplayState::Processing => DisplayKind::Processing,
      DisplayState::Result(_) => DisplayKind::Result,
      DisplayState::Error(_) => DisplayKind::Error,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
  Processing,
  Result,
  Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
  Active,
  Disposed,
}

impl Lifecycle {
  pub fn is_disposed(self) -> bool {
    self == Lifecycle::Disposed
  }
}

/// Whether a content swap should re-layout the balloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidate {
  /// First paint: the popup is laid out when it is shown.
  No,
  Yes,
}

/// Geometry passes owed after a content swap.
///
/// Content that reflows (rich text) only reports its final size after the
/// host has laid it out once, so a single pass right after the swap is not
/// enough. The second pass must run on the next UI turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
  pub immediate: bool,
  pub deferred:  bool,
}

impl LayoutPlan {
  pub const NONE: Self = Self {
    immediate: false,
    deferred:  false,
  };
  pub const TWO_PHASE: Self = Self {
    immediate: true,
    deferred:  true,
  };
}

pub struct ContentStateMachine {
  state:     DisplayState,
  /// Whether `state` has been pushed to the popup yet.
  presented: bool,
}

impl Default for ContentStateMachine {
  fn default() -> Self {
    Self::new()
  }
}

impl ContentStateMachine {
  pub fn new() -> Self {
    Self {
      state:     DisplayState::Processing,
      presented: false,
    }
  }

  pub fn state(&self) -> &DisplayState {
    &self.state
  }

  pub fn kind(&self) -> DisplayKind {
    self.state.kind()
  }

  /// Make `next` the visible content and report which layout passes the
  /// caller owes.
  ///
  /// Does nothing once the balloon is disposed, and does nothing when asked
  /// to show `Processing` while `Processing` is already on screen.
  pub fn transition(
    &mut self,
    lifecycle: Lifecycle,
    next: DisplayState,
    revalidate: Revalidate,
    popup: &mut dyn Popup,
    config: &BalloonConfig,
  ) -> LayoutPlan {
    if lifecycle.is_disposed() {
      tracing::debug!(next = ?next.kind(), "ignoring content change on disposed balloon");
      return LayoutPlan::NONE;
    }
    if self.presented
      && self.state == DisplayState::Processing
      && next == DisplayState::Processing
    {
      return LayoutPlan::NONE;
    }

    tracing::trace!(from = ?self.state.kind(), to = ?next.kind(), "balloon content change");
    self.state = next;
    self.presented = true;
    popup.show_content(&self.state, config);

    match revalidate {
      Revalidate::No => LayoutPlan::NONE,
      Revalidate::Yes => LayoutPlan::TWO_PHASE,
    }
  }
}
