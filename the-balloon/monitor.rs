//! Pointer tracking outside the balloon's own input handling.
//!
//! The pin button should only be visible while the pointer hovers the
//! balloon. The balloon cannot see pointer events that land elsewhere, so it
//! observes every pointer event on the UI thread through the window-wide
//! [`PointerHooks`] registry and hit-tests them itself. Dismissing the balloon
//! on outside clicks is left to the popup.

use std::{
  cell::Cell,
  rc::Rc,
};

use the_translate_event::{
  EventHooks,
  HookRegistration,
};

use crate::{
  geometry::ScreenPoint,
  host::{
    ComponentId,
    Toolkit,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
  Moved,
  Dragged,
  Pressed,
  Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
  pub kind:      PointerEventKind,
  /// Deepest component under the pointer.
  pub component: ComponentId,
  pub screen:    ScreenPoint,
}

impl PointerEvent {
  pub fn moved(component: ComponentId, screen: ScreenPoint) -> Self {
    Self {
      kind: PointerEventKind::Moved,
      component,
      screen,
    }
  }
}

pub type PointerHooks = EventHooks<PointerEvent>;

thread_local! {
  static POINTER_HOOKS: PointerHooks = PointerHooks::new();
}

/// The pointer hook registry of the current UI thread.
pub fn pointer_hooks() -> PointerHooks {
  POINTER_HOOKS.with(Clone::clone)
}

/// Components of one balloon that take part in hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTargets {
  pub content_root: ComponentId,
  pub pin_button:   ComponentId,
}

/// Whether `event` happened over the balloon.
pub fn is_inside(toolkit: &dyn Toolkit, targets: HitTargets, event: &PointerEvent) -> bool {
  let component = event.component;
  let content = targets.content_root;

  if component == targets.pin_button {
    true
  } else if !toolkit.is_showing(component) {
    // Torn down under the pointer; never hide the pin because of it.
    true
  } else if toolkit.is_menu_element(component) {
    false
  } else if toolkit.is_descendant(component, content) {
    true
  } else if !toolkit.is_showing(content) {
    false
  } else {
    let local = toolkit.screen_to_local(event.screen, content);
    toolkit.contains(content, local)
  }
}

struct MonitorState {
  toolkit:     Rc<dyn Toolkit>,
  targets:     HitTargets,
  last_inside: Cell<bool>,
  active:      Cell<bool>,
}

impl MonitorState {
  fn on_pointer(&self, event: &PointerEvent) {
    if !self.active.get() || event.kind != PointerEventKind::Moved {
      return;
    }

    let inside = is_inside(&*self.toolkit, self.targets, event);
    if inside != self.last_inside.get() {
      self.last_inside.set(inside);
      self
        .toolkit
        .set_visible(self.targets.pin_button, inside);
    }
  }
}

/// Keeps the pin button visible only while the pointer is over the balloon.
///
/// Registered on creation; removed by [`OutsideInteractionMonitor::uninstall`]
/// or on drop.
pub struct OutsideInteractionMonitor {
  state:        Rc<MonitorState>,
  registration: Option<HookRegistration<PointerEvent>>,
}

impl OutsideInteractionMonitor {
  pub fn install(hooks: &PointerHooks, toolkit: Rc<dyn Toolkit>, targets: HitTargets) -> Self {
    let state = Rc::new(MonitorState {
      toolkit,
      targets,
      last_inside: Cell::new(false),
      active: Cell::new(true),
    });
    let registration = hooks.register({
      let state = state.clone();
      move |event: &PointerEvent| state.on_pointer(event)
    });

    Self {
      state,
      registration: Some(registration),
    }
  }

  /// Whether the last pointer move was over the balloon, i.e. whether the pin
  /// button is showing.
  pub fn pin_visible(&self) -> bool {
    self.state.last_inside.get()
  }

  /// Stop observing. Returns `false` if already uninstalled.
  pub fn uninstall(&mut self) -> bool {
    self.state.active.set(false);
    match self.registration.take() {
      Some(registration) => {
        registration.unregister();
        true
      },
      None => false,
    }
  }
}

impl Drop for OutsideInteractionMonitor {
  fn drop(&mut self) {
    self.uninstall();
  }
}
