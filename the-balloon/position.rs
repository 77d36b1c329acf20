//! Balloon placement.
//!
//! Placement is biased towards stability: once the balloon has a location it
//! only moves when the new location is known to be good. Jitter while the user
//! types or scrolls is worse than a balloon that lags slightly behind its
//! anchor.
//!
//! Only the vertical axis is protected against clipping, and only for the
//! case where the balloon grows downwards past the bottom of the viewport.
//! A balloon near the right edge may still be clipped horizontally.

use crate::{
  anchor::AnchorTracker,
  geometry::{
    ScreenPoint,
    Size,
  },
  host::RangeMarker,
};

pub struct PositionResolver {
  tracker:  AnchorTracker,
  /// Last accepted location, reused whenever a fresh one is unavailable.
  location: Option<ScreenPoint>,
}

impl PositionResolver {
  pub fn new(tracker: AnchorTracker) -> Self {
    Self {
      tracker,
      location: None,
    }
  }

  pub fn location(&self) -> Option<ScreenPoint> {
    self.location
  }

  /// Screen location for a balloon of size `overlay` attached to `anchor`.
  pub fn resolve_location(&mut self, anchor: &dyn RangeMarker, overlay: Size) -> ScreenPoint {
    let editor = self.tracker.editor();

    if let Some(previous) = self.location
      && !editor.is_best_popup_location_visible()
    {
      return previous;
    }

    let target = match self.tracker.resolve_anchor_point(anchor) {
      Ok(target) => target,
      Err(err) => {
        if let Some(previous) = self.location {
          tracing::debug!(%err, "keeping previous balloon location");
          return previous;
        }
        tracing::debug!(%err, "placing balloon at the editor's default location");
        editor.best_popup_location()
      },
    };

    let visible = editor.visible_area();
    let origin = editor.local_to_screen(visible.origin());
    let offset = target.y - origin.y;
    if let Some(previous) = self.location
      && offset + overlay.height > visible.height
    {
      // Would hang off the bottom of the viewport.
      return previous;
    }

    self.location = Some(target);
    target
  }
}
