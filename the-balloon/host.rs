//! Interfaces the balloon consumes from its host.
//!
//! Everything the controller needs from the editor, the popup window, the UI
//! component tree and the long-lived services is expressed as a trait here.
//! Shared collaborators take `&self` and are expected to use interior
//! mutability the way UI toolkits do; the popup is owned by a single balloon
//! and takes `&mut self`.

use std::rc::Rc;

use crate::{
  config::BalloonConfig,
  content::DisplayState,
  geometry::{
    Point,
    Rect,
    ScreenPoint,
    Size,
    VisualPosition,
  },
  translation::Lang,
};

/// Opaque handle to a component in the host UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

/// A range in the document that follows edits.
///
/// Dropping the marker releases it.
pub trait RangeMarker {
  /// `false` once the marked text has been deleted.
  fn is_valid(&self) -> bool;
  fn start_offset(&self) -> usize;
  fn end_offset(&self) -> usize;
}

/// The editor the balloon is anchored in.
pub trait Editor {
  /// Visible part of the document in editor-local coordinates.
  fn visible_area(&self) -> Rect;
  fn local_to_screen(&self, point: Point) -> ScreenPoint;
  fn offset_to_visual_position(&self, offset: usize) -> VisualPosition;
  /// Record where popups should preferably point. Consulted by
  /// [`Editor::best_popup_location`].
  fn set_popup_anchor(&self, position: VisualPosition);
  /// The editor's own guess for where a popup should appear, in screen space.
  fn best_popup_location(&self) -> ScreenPoint;
  /// Whether the location returned by [`Editor::best_popup_location`] is
  /// currently scrolled into view.
  fn is_best_popup_location_visible(&self) -> bool;
  /// Scroll just enough to make the caret visible.
  fn scroll_to_caret(&self);
}

/// The floating window that hosts the balloon content.
pub trait Popup {
  /// Root of the content tree, used for hit-testing.
  fn content_root(&self) -> ComponentId;
  /// The "keep open" button that reopens the query in a dialog.
  fn pin_button(&self) -> ComponentId;
  fn preferred_size(&self) -> Size;
  /// Swap the visible content. `config` is the settings snapshot for the
  /// renderer.
  fn show_content(&mut self, state: &DisplayState, config: &BalloonConfig);
  /// Show the popup pointing at `location`, laid out below it.
  fn show_at(&mut self, location: ScreenPoint);
  fn move_to(&mut self, location: ScreenPoint);
  fn hide(&mut self);
}

/// Queries against the host UI component tree.
pub trait Toolkit {
  fn is_showing(&self, component: ComponentId) -> bool;
  /// Menus and menu items.
  fn is_menu_element(&self, component: ComponentId) -> bool;
  fn is_descendant(&self, component: ComponentId, ancestor: ComponentId) -> bool;
  fn screen_to_local(&self, point: ScreenPoint, component: ComponentId) -> Point;
  /// Whether `point`, in `component`'s local space, lies within its bounds.
  fn contains(&self, component: ComponentId, point: Point) -> bool;
  fn set_visible(&self, component: ComponentId, visible: bool);
}

/// A persistent translation window.
pub trait TranslationDialog {
  fn query(&self, text: &str);
}

/// Owner of the persistent translation window.
pub trait DialogManager {
  /// Show the dialog, creating it if needed.
  fn show_dialog(&self) -> Rc<dyn TranslationDialog>;
}

/// A running text-to-speech playback. Dropping it stops playback.
pub trait SpeechSession {}

pub trait TextToSpeech {
  fn speak(&self, text: &str, lang: Lang) -> Box<dyn SpeechSession>;
}

pub trait SettingsOpener {
  fn open_settings(&self);
}
