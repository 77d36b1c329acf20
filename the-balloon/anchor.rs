use std::rc::Rc;

use crate::{
  error::{
    BalloonError,
    Result,
  },
  geometry::{
    ScreenPoint,
    VisualPosition,
  },
  host::{
    Editor,
    RangeMarker,
  },
};

/// Midpoint of `start..end`, rounding half up.
pub fn midpoint_offset(start: usize, end: usize) -> usize {
  start / 2 + end / 2 + (start % 2 + end % 2 + 1) / 2
}

/// Maps the balloon's anchor range to a point on screen.
pub struct AnchorTracker {
  editor: Rc<dyn Editor>,
}

impl AnchorTracker {
  pub fn new(editor: Rc<dyn Editor>) -> Self {
    Self { editor }
  }

  pub fn editor(&self) -> &dyn Editor {
    &*self.editor
  }

  /// Record the middle of `anchor` as the editor's preferred popup anchor.
  pub fn record_anchor(&self, anchor: &dyn RangeMarker) -> Result<VisualPosition> {
    if !anchor.is_valid() {
      return Err(BalloonError::AnchorInvalidated);
    }

    let offset = midpoint_offset(anchor.start_offset(), anchor.end_offset());
    let position = self.editor.offset_to_visual_position(offset);
    self.editor.set_popup_anchor(position);
    Ok(position)
  }

  /// Current screen point of `anchor`, taking scrolling into account.
  pub fn resolve_anchor_point(&self, anchor: &dyn RangeMarker) -> Result<ScreenPoint> {
    self.record_anchor(anchor)?;
    Ok(self.editor.best_popup_location())
  }
}
