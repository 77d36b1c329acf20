use std::{
  cell::RefCell,
  fmt,
  rc::{
    Rc,
    Weak,
  },
};

use slotmap::SlotMap;
use smallvec::SmallVec;

slotmap::new_key_type! {
    pub struct ObserverId;
}

/// Callback invoked for every event dispatched through an [`EventHooks`].
pub type Observer<E> = Rc<dyn Fn(&E)>;

type Observers<E> = RefCell<SlotMap<ObserverId, Observer<E>>>;

/// Registry of observers for one kind of event.
///
/// Cloning an `EventHooks` yields another handle to the same registry.
pub struct EventHooks<E: 'static> {
  observers: Rc<Observers<E>>,
}

impl<E: 'static> Clone for EventHooks<E> {
  fn clone(&self) -> Self {
    Self {
      observers: self.observers.clone(),
    }
  }
}

impl<E: 'static> Default for EventHooks<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: 'static> fmt::Debug for EventHooks<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EventHooks")
      .field("observers", &self.len())
      .finish()
  }
}

impl<E: 'static> EventHooks<E> {
  pub fn new() -> Self {
    Self {
      observers: Rc::new(RefCell::new(SlotMap::with_key())),
    }
  }

  /// Register `observer`. It receives every dispatched event until the
  /// returned registration is dropped or [`HookRegistration::unregister`]ed.
  pub fn register(&self, observer: impl Fn(&E) + 'static) -> HookRegistration<E> {
    let id = self.observers.borrow_mut().insert(Rc::new(observer));
    log::trace!("registered event observer {id:?}");
    HookRegistration {
      id,
      observers: Rc::downgrade(&self.observers),
    }
  }

  pub fn len(&self) -> usize {
    self.observers.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains(&self, id: ObserverId) -> bool {
    self.observers.borrow().contains_key(id)
  }

  /// Deliver `event` to every registered observer and return how many were
  /// called.
  ///
  /// The observer list is snapshotted before the first call, so observers may
  /// register or unregister (themselves or others) while handling the event.
  /// An observer removed mid-dispatch can still see the event in flight.
  pub fn dispatch(&self, event: &E) -> usize {
    let snapshot: SmallVec<[Observer<E>; 4]> =
      self.observers.borrow().values().cloned().collect();
    for observer in &snapshot {
      observer(event);
    }
    snapshot.len()
  }
}

/// Keeps an observer registered in an [`EventHooks`].
///
/// Dropping the registration removes the observer. The registration holds the
/// registry weakly, so it never keeps the registry alive.
#[must_use = "dropping the registration removes the observer immediately"]
pub struct HookRegistration<E: 'static> {
  id:        ObserverId,
  observers: Weak<Observers<E>>,
}

impl<E: 'static> fmt::Debug for HookRegistration<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HookRegistration")
      .field("id", &self.id)
      .finish()
  }
}

impl<E: 'static> HookRegistration<E> {
  pub fn id(&self) -> ObserverId {
    self.id
  }

  /// Remove the observer now. Equivalent to dropping the registration.
  pub fn unregister(self) {}
}

impl<E: 'static> Drop for HookRegistration<E> {
  fn drop(&mut self) {
    let Some(observers) = self.observers.upgrade() else {
      return;
    };
    if observers.borrow_mut().remove(self.id).is_none() {
      log::warn!("event observer {:?} was already removed", self.id);
    } else {
      log::trace!("unregistered event observer {:?}", self.id);
    }
  }
}
