//! The translation balloon.
//!
//! A [`Balloon`] is created for one piece of text at one place in the editor,
//! shown once, and disposed once. Everything it acquires along the way is
//! released by [`Balloon::dispose`], whichever way the balloon goes away:
//! explicit hide, pinning into the dialog, the popup being dismissed by the
//! host, or the balloon being dropped.
//!
//! The host drives the balloon from its UI event loop: it forwards popup
//! dismissal to [`Balloon::hide`] and calls [`Balloon::tick`] once per turn to
//! run deferred layout and apply finished queries.

use std::rc::Rc;

use the_translate_event::TurnQueue;

use crate::{
  anchor::AnchorTracker,
  config::BalloonConfig,
  content::{
    ContentStateMachine,
    DisplayState,
    Lifecycle,
    Revalidate,
  },
  error::{
    BalloonError,
    Result,
  },
  geometry::ScreenPoint,
  host::{
    DialogManager,
    Editor,
    Popup,
    RangeMarker,
    SettingsOpener,
    SpeechSession,
    TextToSpeech,
    Toolkit,
  },
  monitor::{
    HitTargets,
    OutsideInteractionMonitor,
    PointerHooks,
  },
  position::PositionResolver,
  presenter::{
    self,
    Presenter,
    View,
  },
  translation::{
    Lang,
    Translation,
    Translator,
  },
};

/// Long-lived collaborators shared by every balloon of a host.
#[derive(Clone)]
pub struct BalloonHost {
  pub editor:        Rc<dyn Editor>,
  pub toolkit:       Rc<dyn Toolkit>,
  pub translator:    Rc<dyn Translator>,
  pub dialogs:       Rc<dyn DialogManager>,
  pub speech:        Rc<dyn TextToSpeech>,
  pub settings:      Rc<dyn SettingsOpener>,
  pub pointer_hooks: PointerHooks,
}

pub struct Balloon {
  text:      String,
  config:    BalloonConfig,
  editor:    Rc<dyn Editor>,
  popup:     Box<dyn Popup>,
  anchor:    Option<Box<dyn RangeMarker>>,
  resolver:  PositionResolver,
  content:   ContentStateMachine,
  presenter: Presenter,
  monitor:   OutsideInteractionMonitor,
  deferred:  TurnQueue<Balloon>,
  dialogs:   Rc<dyn DialogManager>,
  tts:       Rc<dyn TextToSpeech>,
  settings:  Rc<dyn SettingsOpener>,
  speech:    Option<Box<dyn SpeechSession>>,
  lifecycle: Lifecycle,
  showing:   bool,
}

impl Balloon {
  /// Create a balloon for `text` anchored at `anchor`. Nothing is shown until
  /// [`Balloon::show`]; the pointer observer is installed right away.
  pub fn new(
    host: BalloonHost,
    popup: Box<dyn Popup>,
    anchor: Box<dyn RangeMarker>,
    text: impl Into<String>,
    config: BalloonConfig,
  ) -> Self {
    let targets = HitTargets {
      content_root: popup.content_root(),
      pin_button:   popup.pin_button(),
    };
    host.toolkit.set_visible(targets.pin_button, false);
    let monitor =
      OutsideInteractionMonitor::install(&host.pointer_hooks, host.toolkit.clone(), targets);

    let tracker = AnchorTracker::new(host.editor.clone());
    if let Err(err) = tracker.record_anchor(&*anchor) {
      tracing::debug!(%err, "balloon created on a stale anchor");
    }

    let presenter = Presenter::new(
      host.translator,
      config.source_language,
      config.target_language,
    );

    Self {
      text: text.into(),
      config,
      editor: host.editor,
      popup,
      anchor: Some(anchor),
      resolver: PositionResolver::new(tracker),
      content: ContentStateMachine::new(),
      presenter,
      monitor,
      deferred: TurnQueue::new(),
      dialogs: host.dialogs,
      tts: host.speech,
      settings: host.settings,
      speech: None,
      lifecycle: Lifecycle::Active,
      showing: false,
    }
  }

  pub fn is_disposed(&self) -> bool {
    self.lifecycle.is_disposed()
  }

  pub fn is_showing(&self) -> bool {
    self.showing
  }

  pub fn display_state(&self) -> &DisplayState {
    self.content.state()
  }

  /// Last location the balloon was placed at.
  pub fn location(&self) -> Option<ScreenPoint> {
    self.resolver.location()
  }

  pub fn pin_visible(&self) -> bool {
    self.monitor.pin_visible()
  }

  pub fn languages(&self) -> (Lang, Lang) {
    self.presenter.languages()
  }

  /// Layout passes waiting for the next UI turn.
  pub fn pending_layout_passes(&self) -> usize {
    self.deferred.len()
  }

  /// Show the balloon and start the query. Calling it again while the
  /// balloon is showing does nothing.
  pub fn show(&mut self) -> Result<()> {
    if self.lifecycle.is_disposed() {
      return Err(BalloonError::Disposed);
    }
    if self.showing {
      return Ok(());
    }
    self.showing = true;

    self.editor.scroll_to_caret();
    self.switch_content(DisplayState::Processing, Revalidate::No);

    let Some(anchor) = self.anchor.as_deref() else {
      return Err(BalloonError::Disposed);
    };
    let location = self
      .resolver
      .resolve_location(anchor, self.popup.preferred_size());
    self.popup.show_at(location);
    tracing::debug!(x = location.x, y = location.y, "balloon shown");

    self.presenter.translate(&self.text);
    Ok(())
  }

  /// Close the balloon for good. Hosts call this when the popup is dismissed.
  pub fn hide(&mut self) {
    if !self.lifecycle.is_disposed() {
      self.dispose();
    }
  }

  /// Release everything the balloon holds. Safe to call any number of times.
  pub fn dispose(&mut self) {
    if self.lifecycle.is_disposed() {
      return;
    }
    // Anything triggered by the teardown below must already see the balloon
    // as disposed.
    self.lifecycle = Lifecycle::Disposed;
    self.showing = false;

    self.popup.hide();
    self.anchor.take();
    self.speech.take();
    self.monitor.uninstall();
    self.presenter.close();
    self.deferred.clear();

    tracing::debug!("balloon disposed");
  }

  /// Re-place the balloon for its current size.
  pub fn relayout(&mut self) {
    if self.lifecycle.is_disposed() || !self.showing {
      return;
    }
    let Some(anchor) = self.anchor.as_deref() else {
      return;
    };
    let location = self
      .resolver
      .resolve_location(anchor, self.popup.preferred_size());
    self.popup.move_to(location);
  }

  /// Run the work deferred to this UI turn.
  pub fn run_deferred(&mut self) -> usize {
    let turn = self.deferred.take_turn();
    turn.run(self)
  }

  /// Apply query outcomes that have arrived. Returns how many were applied.
  pub fn pump(&mut self) -> usize {
    let mut delivered = 0;
    while let Some(outcome) = self.presenter.poll() {
      presenter::deliver(outcome, self);
      delivered += 1;
    }
    delivered
  }

  /// One UI turn: deferred layout first, then finished queries.
  pub fn tick(&mut self) {
    self.run_deferred();
    self.pump();
  }

  /// Translate the same text again with another language pair.
  pub fn change_languages(&mut self, src_lang: Lang, target_lang: Lang) {
    self.presenter.set_languages(src_lang, target_lang);
    self.requery();
  }

  /// Translate again, taking `lang` as the source language. Used when the
  /// backend detected a different language than the one requested.
  pub fn fix_language(&mut self, lang: Lang) {
    let (_, target_lang) = self.presenter.languages();
    self.change_languages(lang, target_lang);
  }

  /// Look up `word` from the result in the persistent dialog.
  pub fn new_translate(&mut self, word: &str) {
    self.open_in_dialog(Some(word));
  }

  /// The pin button: move the query into the persistent dialog.
  pub fn pin(&mut self) {
    let text = self.text.clone();
    self.open_in_dialog(Some(&text));
  }

  /// Close the balloon and open the persistent dialog, querying `text` there
  /// unless it is blank.
  pub fn open_in_dialog(&mut self, text: Option<&str>) {
    if self.lifecycle.is_disposed() {
      tracing::debug!("ignoring dialog request on disposed balloon");
      return;
    }
    self.hide();

    let dialog = self.dialogs.show_dialog();
    if let Some(text) = text.filter(|text| !text.trim().is_empty()) {
      dialog.query(text);
    }
  }

  /// Read `text` aloud, stopping any earlier playback.
  pub fn speak(&mut self, text: &str, lang: Lang) {
    if self.lifecycle.is_disposed() {
      return;
    }
    self.speech.take();
    self.speech = Some(self.tts.speak(text, lang));
  }

  /// The settings link in the error content.
  pub fn open_settings(&mut self) {
    if self.lifecycle.is_disposed() {
      return;
    }
    self.hide();
    self.settings.open_settings();
  }

  fn requery(&mut self) {
    if self.lifecycle.is_disposed() || !self.showing {
      tracing::debug!("ignoring query request on inactive balloon");
      return;
    }
    let text = self.text.clone();
    self.show_start_translate(&text);
    self.presenter.translate(&text);
  }

  fn switch_content(&mut self, state: DisplayState, revalidate: Revalidate) {
    let plan = self.content.transition(
      self.lifecycle,
      state,
      revalidate,
      &mut *self.popup,
      &self.config,
    );
    if plan.immediate {
      self.relayout();
    }
    if plan.deferred {
      // Reflowed content reports its final size one turn later.
      self.deferred.defer(Balloon::relayout);
    }
  }
}

impl View for Balloon {
  fn is_disposed(&self) -> bool {
    self.lifecycle.is_disposed()
  }

  fn show_start_translate(&mut self, query: &str) {
    if self.lifecycle.is_disposed() {
      tracing::debug!(query, "query started after balloon was disposed");
      return;
    }
    self.switch_content(DisplayState::Processing, Revalidate::Yes);
  }

  fn show_result(&mut self, query: &str, result: Translation) {
    if self.lifecycle.is_disposed() {
      tracing::debug!(query, "result arrived after balloon was disposed");
      return;
    }
    if self.config.auto_play_tts {
      self.speak(&result.original, result.src_lang);
    }
    self.switch_content(DisplayState::Result(result), Revalidate::Yes);
  }

  fn show_error(&mut self, query: &str, error: &str) {
    if self.lifecycle.is_disposed() {
      tracing::debug!(query, error, "error arrived after balloon was disposed");
      return;
    }
    self.switch_content(DisplayState::Error(error.to_string()), Revalidate::Yes);
  }
}

impl Drop for Balloon {
  fn drop(&mut self) {
    self.dispose();
  }
}
