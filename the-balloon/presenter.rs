use std::rc::Rc;

use tokio::sync::mpsc::{
  self,
  UnboundedReceiver,
  UnboundedSender,
};

use crate::translation::{
  Lang,
  Query,
  QueryId,
  QueryOutcome,
  QueryReply,
  Translation,
  Translator,
};

/// Receiver of query progress. Every entry point must tolerate being called
/// after the view was disposed.
pub trait View {
  fn is_disposed(&self) -> bool;
  fn show_start_translate(&mut self, query: &str);
  fn show_result(&mut self, query: &str, result: Translation);
  fn show_error(&mut self, query: &str, error: &str);
}

/// Route a finished query to `view`. Outcomes for a disposed view are
/// dropped.
pub fn deliver(outcome: QueryOutcome, view: &mut dyn View) {
  if view.is_disposed() {
    tracing::debug!(id = ?outcome.id, "dropping outcome for disposed view");
    return;
  }
  match outcome.result {
    Ok(translation) => view.show_result(&outcome.text, translation),
    Err(error) => view.show_error(&outcome.text, &error),
  }
}

/// Issues queries for a view and collects their outcomes.
///
/// Only the most recent query counts: outcomes of queries that were
/// superseded by a later one are dropped.
pub struct Presenter {
  translator:  Rc<dyn Translator>,
  tx:          UnboundedSender<QueryOutcome>,
  rx:          UnboundedReceiver<QueryOutcome>,
  next_id:     u64,
  latest:      Option<QueryId>,
  src_lang:    Lang,
  target_lang: Lang,
}

impl Presenter {
  pub fn new(translator: Rc<dyn Translator>, src_lang: Lang, target_lang: Lang) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      translator,
      tx,
      rx,
      next_id: 1,
      latest: None,
      src_lang,
      target_lang,
    }
  }

  pub fn languages(&self) -> (Lang, Lang) {
    (self.src_lang, self.target_lang)
  }

  pub fn set_languages(&mut self, src_lang: Lang, target_lang: Lang) {
    self.src_lang = src_lang;
    self.target_lang = target_lang;
  }

  pub fn translate(&mut self, text: &str) -> QueryId {
    let id = QueryId(self.next_id);
    self.next_id += 1;
    self.latest = Some(id);

    let query = Query {
      id,
      text: text.to_string(),
      src_lang: self.src_lang,
      target_lang: self.target_lang,
    };
    tracing::debug!(?id, src = %self.src_lang, target = %self.target_lang, "issuing translation query");
    self
      .translator
      .translate(query, QueryReply::new(id, text, self.tx.clone()));
    id
  }

  /// Next outcome of the latest query, if it has arrived.
  pub fn poll(&mut self) -> Option<QueryOutcome> {
    loop {
      let outcome = self.rx.try_recv().ok()?;
      if Some(outcome.id) == self.latest {
        self.latest = None;
        return Some(outcome);
      }
      tracing::debug!(id = ?outcome.id, "dropping outcome of superseded query");
    }
  }

  /// Stop accepting outcomes. Replies completed afterwards are discarded.
  pub fn close(&mut self) {
    self.latest = None;
    self.rx.close();
    while self.rx.try_recv().is_ok() {}
  }
}
