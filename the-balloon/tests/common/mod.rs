//! In-memory host for driving a balloon in tests.

#![allow(dead_code)]

use std::{
  cell::{
    Cell,
    RefCell,
  },
  collections::{
    HashMap,
    HashSet,
  },
  rc::Rc,
};

use the_balloon::{
  Balloon,
  BalloonConfig,
  BalloonHost,
  DisplayKind,
  DisplayState,
  geometry::{
    Point,
    Rect,
    ScreenPoint,
    Size,
    VisualPosition,
  },
  host::{
    ComponentId,
    DialogManager,
    Editor,
    Popup,
    RangeMarker,
    SettingsOpener,
    SpeechSession,
    TextToSpeech,
    Toolkit,
    TranslationDialog,
  },
  monitor::{
    PointerEvent,
    PointerHooks,
  },
  translation::{
    Lang,
    Query,
    QueryReply,
    Translation,
    Translator,
  },
};

pub const LINE_HEIGHT: i32 = 20;
pub const CHAR_WIDTH: i32 = 8;

pub const CONTENT: ComponentId = ComponentId(1);
pub const PIN: ComponentId = ComponentId(2);
pub const LABEL: ComponentId = ComponentId(3);
pub const EDITOR_COMPONENT: ComponentId = ComponentId(10);

/// Editor with 80-column lines whose component sits at `(100, 50)` on screen.
pub struct FakeEditor {
  pub scroll_y:       Cell<i32>,
  pub height:         Cell<i32>,
  pub anchor:         Cell<VisualPosition>,
  pub anchor_visible: Cell<bool>,
  pub scrolls:        Cell<usize>,
}

impl Default for FakeEditor {
  fn default() -> Self {
    Self {
      scroll_y:       Cell::new(0),
      height:         Cell::new(600),
      anchor:         Cell::new(VisualPosition::default()),
      anchor_visible: Cell::new(true),
      scrolls:        Cell::new(0),
    }
  }
}

impl Editor for FakeEditor {
  fn visible_area(&self) -> Rect {
    Rect::new(0, self.scroll_y.get(), 640, self.height.get())
  }

  fn local_to_screen(&self, point: Point) -> ScreenPoint {
    ScreenPoint::new(point.x + 100, point.y - self.scroll_y.get() + 50)
  }

  fn offset_to_visual_position(&self, offset: usize) -> VisualPosition {
    VisualPosition::new(offset / 80, offset % 80)
  }

  fn set_popup_anchor(&self, position: VisualPosition) {
    self.anchor.set(position);
  }

  fn best_popup_location(&self) -> ScreenPoint {
    let anchor = self.anchor.get();
    self.local_to_screen(Point::new(
      anchor.col as i32 * CHAR_WIDTH,
      (anchor.row as i32 + 1) * LINE_HEIGHT,
    ))
  }

  fn is_best_popup_location_visible(&self) -> bool {
    self.anchor_visible.get()
  }

  fn scroll_to_caret(&self) {
    self.scrolls.set(self.scrolls.get() + 1);
  }
}

#[derive(Default)]
pub struct MarkerProbe {
  pub invalid:  Cell<bool>,
  pub releases: Cell<usize>,
}

pub struct FakeMarker {
  probe: Rc<MarkerProbe>,
  start: usize,
  end:   usize,
}

impl RangeMarker for FakeMarker {
  fn is_valid(&self) -> bool {
    !self.probe.invalid.get()
  }

  fn start_offset(&self) -> usize {
    self.start
  }

  fn end_offset(&self) -> usize {
    self.end
  }
}

impl Drop for FakeMarker {
  fn drop(&mut self) {
    self.probe.releases.set(self.probe.releases.get() + 1);
  }
}

pub struct PopupLog {
  pub contents: Vec<DisplayState>,
  pub shown_at: Vec<ScreenPoint>,
  pub moves:    Vec<ScreenPoint>,
  pub hides:    usize,
  pub size:     Size,
}

impl Default for PopupLog {
  fn default() -> Self {
    Self {
      contents: Vec::new(),
      shown_at: Vec::new(),
      moves:    Vec::new(),
      hides:    0,
      size:     Size::new(320, 120),
    }
  }
}

impl PopupLog {
  pub fn kinds(&self) -> Vec<DisplayKind> {
    self.contents.iter().map(DisplayState::kind).collect()
  }
}

pub struct FakePopup {
  log: Rc<RefCell<PopupLog>>,
}

impl Popup for FakePopup {
  fn content_root(&self) -> ComponentId {
    CONTENT
  }

  fn pin_button(&self) -> ComponentId {
    PIN
  }

  fn preferred_size(&self) -> Size {
    self.log.borrow().size
  }

  fn show_content(&mut self, state: &DisplayState, _config: &BalloonConfig) {
    self.log.borrow_mut().contents.push(state.clone());
  }

  fn show_at(&mut self, location: ScreenPoint) {
    self.log.borrow_mut().shown_at.push(location);
  }

  fn move_to(&mut self, location: ScreenPoint) {
    self.log.borrow_mut().moves.push(location);
  }

  fn hide(&mut self) {
    self.log.borrow_mut().hides += 1;
  }
}

/// Content root at screen `(200, 100)`, 300x150, with `LABEL` and `PIN`
/// inside it.
#[derive(Default)]
pub struct FakeToolkit {
  pub hidden:  RefCell<HashSet<ComponentId>>,
  pub visible: RefCell<HashMap<ComponentId, bool>>,
  pub toggles: Cell<usize>,
}

impl Toolkit for FakeToolkit {
  fn is_showing(&self, component: ComponentId) -> bool {
    !self.hidden.borrow().contains(&component)
  }

  fn is_menu_element(&self, _component: ComponentId) -> bool {
    false
  }

  fn is_descendant(&self, component: ComponentId, ancestor: ComponentId) -> bool {
    ancestor == CONTENT && matches!(component, CONTENT | PIN | LABEL)
  }

  fn screen_to_local(&self, point: ScreenPoint, _component: ComponentId) -> Point {
    Point::new(point.x - 200, point.y - 100)
  }

  fn contains(&self, _component: ComponentId, point: Point) -> bool {
    Rect::new(0, 0, 300, 150).contains(point)
  }

  fn set_visible(&self, component: ComponentId, visible: bool) {
    self.toggles.set(self.toggles.get() + 1);
    self.visible.borrow_mut().insert(component, visible);
  }
}

/// Holds queries until the test answers them.
#[derive(Default)]
pub struct FakeTranslator {
  pub queries: RefCell<Vec<Query>>,
  replies:     RefCell<Vec<QueryReply>>,
}

impl Translator for FakeTranslator {
  fn translate(&self, query: Query, reply: QueryReply) {
    self.queries.borrow_mut().push(query);
    self.replies.borrow_mut().push(reply);
  }
}

impl FakeTranslator {
  pub fn calls(&self) -> usize {
    self.queries.borrow().len()
  }

  pub fn last_query(&self) -> Query {
    self.queries.borrow().last().cloned().expect("no query issued")
  }

  /// Take the reply of the `index`th query issued.
  pub fn reply(&self, index: usize) -> QueryReply {
    let position = self
      .replies
      .borrow()
      .iter()
      .position(|reply| reply.id() == self.queries.borrow()[index].id)
      .expect("reply already used");
    self.replies.borrow_mut().remove(position)
  }
}

#[derive(Default)]
pub struct FakeDialog {
  pub queries: RefCell<Vec<String>>,
}

impl TranslationDialog for FakeDialog {
  fn query(&self, text: &str) {
    self.queries.borrow_mut().push(text.to_string());
  }
}

#[derive(Default)]
pub struct FakeDialogs {
  pub opened: Cell<usize>,
  pub dialog: Rc<FakeDialog>,
}

impl DialogManager for FakeDialogs {
  fn show_dialog(&self) -> Rc<dyn TranslationDialog> {
    self.opened.set(self.opened.get() + 1);
    self.dialog.clone()
  }
}

pub struct FakeSession {
  released: Rc<Cell<usize>>,
}

impl SpeechSession for FakeSession {}

impl Drop for FakeSession {
  fn drop(&mut self) {
    self.released.set(self.released.get() + 1);
  }
}

#[derive(Default)]
pub struct FakeSpeech {
  pub started:  RefCell<Vec<(String, Lang)>>,
  pub released: Rc<Cell<usize>>,
}

impl TextToSpeech for FakeSpeech {
  fn speak(&self, text: &str, lang: Lang) -> Box<dyn SpeechSession> {
    self.started.borrow_mut().push((text.to_string(), lang));
    Box::new(FakeSession {
      released: self.released.clone(),
    })
  }
}

#[derive(Default)]
pub struct FakeSettings {
  pub opened: Cell<usize>,
}

impl SettingsOpener for FakeSettings {
  fn open_settings(&self) {
    self.opened.set(self.opened.get() + 1);
  }
}

pub struct Harness {
  pub editor:     Rc<FakeEditor>,
  pub toolkit:    Rc<FakeToolkit>,
  pub translator: Rc<FakeTranslator>,
  pub dialogs:    Rc<FakeDialogs>,
  pub speech:     Rc<FakeSpeech>,
  pub settings:   Rc<FakeSettings>,
  pub hooks:      PointerHooks,
  pub popup:      Rc<RefCell<PopupLog>>,
  pub marker:     Rc<MarkerProbe>,
}

impl Harness {
  pub fn new() -> Self {
    Self {
      editor:     Rc::new(FakeEditor::default()),
      toolkit:    Rc::new(FakeToolkit::default()),
      translator: Rc::new(FakeTranslator::default()),
      dialogs:    Rc::new(FakeDialogs::default()),
      speech:     Rc::new(FakeSpeech::default()),
      settings:   Rc::new(FakeSettings::default()),
      hooks:      PointerHooks::new(),
      popup:      Rc::new(RefCell::new(PopupLog::default())),
      marker:     Rc::new(MarkerProbe::default()),
    }
  }

  pub fn host(&self) -> BalloonHost {
    BalloonHost {
      editor:        self.editor.clone(),
      toolkit:       self.toolkit.clone(),
      translator:    self.translator.clone(),
      dialogs:       self.dialogs.clone(),
      speech:        self.speech.clone(),
      settings:      self.settings.clone(),
      pointer_hooks: self.hooks.clone(),
    }
  }

  pub fn balloon(&self, start: usize, end: usize, text: &str) -> Balloon {
    self.balloon_with(start, end, text, BalloonConfig::default())
  }

  pub fn balloon_with(
    &self,
    start: usize,
    end: usize,
    text: &str,
    config: BalloonConfig,
  ) -> Balloon {
    let popup = Box::new(FakePopup {
      log: self.popup.clone(),
    });
    let marker = Box::new(FakeMarker {
      probe: self.marker.clone(),
      start,
      end,
    });
    Balloon::new(self.host(), popup, marker, text, config)
  }

  pub fn hover(&self, component: ComponentId, screen: ScreenPoint) {
    self.hooks.dispatch(&PointerEvent::moved(component, screen));
  }

  pub fn kinds(&self) -> Vec<DisplayKind> {
    self.popup.borrow().kinds()
  }

  pub fn moves(&self) -> usize {
    self.popup.borrow().moves.len()
  }

  pub fn pin_shown(&self) -> Option<bool> {
    self.toolkit.visible.borrow().get(&PIN).copied()
  }
}

pub fn translation(text: &str) -> Translation {
  Translation::new(text, "你好", Lang::English, Lang::Chinese)
}
