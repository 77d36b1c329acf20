//! Translation results and the backend seam.
//!
//! The balloon never talks to a translation service directly. It hands a
//! [`Query`] and a [`QueryReply`] to a [`Translator`]; the translator answers
//! through the reply whenever it is done, from any thread. Replies are queued
//! and only applied to the balloon on the UI thread.

use std::fmt;

use futures_util::future::BoxFuture;
use serde::{
  Deserialize,
  Serialize,
};
use tokio::{
  runtime::Handle,
  sync::mpsc::UnboundedSender,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
  Auto,
  Chinese,
  English,
  Japanese,
  Korean,
  French,
  German,
  Spanish,
  Russian,
  Italian,
  Portuguese,
}

impl Lang {
  pub const ALL: &'static [Lang] = &[
    Lang::Auto,
    Lang::Chinese,
    Lang::English,
    Lang::Japanese,
    Lang::Korean,
    Lang::French,
    Lang::German,
    Lang::Spanish,
    Lang::Russian,
    Lang::Italian,
    Lang::Portuguese,
  ];

  /// Language code sent to translation backends.
  pub const fn code(self) -> &'static str {
    match self {
      Lang::Auto => "auto",
      Lang::Chinese => "zh-CHS",
      Lang::English => "en",
      Lang::Japanese => "ja",
      Lang::Korean => "ko",
      Lang::French => "fr",
      Lang::German => "de",
      Lang::Spanish => "es",
      Lang::Russian => "ru",
      Lang::Italian => "it",
      Lang::Portuguese => "pt",
    }
  }

  pub const fn display_name(self) -> &'static str {
    match self {
      Lang::Auto => "Auto Detect",
      Lang::Chinese => "Chinese",
      Lang::English => "English",
      Lang::Japanese => "Japanese",
      Lang::Korean => "Korean",
      Lang::French => "French",
      Lang::German => "German",
      Lang::Spanish => "Spanish",
      Lang::Russian => "Russian",
      Lang::Italian => "Italian",
      Lang::Portuguese => "Portuguese",
    }
  }

  pub fn from_code(code: &str) -> Option<Lang> {
    Lang::ALL
      .iter()
      .copied()
      .find(|lang| lang.code().eq_ignore_ascii_case(code))
  }
}

impl fmt::Display for Lang {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.display_name())
  }
}

/// Phonetic spelling of the source and translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
  pub src:    Option<String>,
  pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
  pub word:                String,
  pub reverse_translation: Vec<String>,
}

/// Dictionary entries grouped under one part of speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dict {
  pub part_of_speech: String,
  #[serde(default)]
  pub entries:        Vec<DictEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
  pub original:     String,
  pub translation:  Option<String>,
  pub src_lang:     Lang,
  pub target_lang:  Lang,
  #[serde(default)]
  pub symbol:       Option<Symbol>,
  #[serde(default)]
  pub dictionaries: Vec<Dict>,
}

impl Translation {
  pub fn new(
    original: impl Into<String>,
    translation: impl Into<String>,
    src_lang: Lang,
    target_lang: Lang,
  ) -> Self {
    Self {
      original: original.into(),
      translation: Some(translation.into()),
      src_lang,
      target_lang,
      symbol: None,
      dictionaries: Vec::new(),
    }
  }

  pub fn with_symbol(mut self, symbol: Symbol) -> Self {
    self.symbol = Some(symbol);
    self
  }

  pub fn with_dictionaries(mut self, dictionaries: Vec<Dict>) -> Self {
    self.dictionaries = dictionaries;
    self
  }
}

/// Monotonic id of a query issued by one balloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  pub id:          QueryId,
  pub text:        String,
  pub src_lang:    Lang,
  pub target_lang: Lang,
}

/// A finished query, waiting to be applied on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
  pub id:     QueryId,
  pub text:   String,
  pub result: Result<Translation, String>,
}

/// One-shot completion handle for a [`Query`].
///
/// Completing the reply after the balloon is gone is fine; the outcome is
/// discarded.
#[derive(Debug)]
pub struct QueryReply {
  id:   QueryId,
  text: String,
  tx:   UnboundedSender<QueryOutcome>,
}

impl QueryReply {
  pub fn new(id: QueryId, text: impl Into<String>, tx: UnboundedSender<QueryOutcome>) -> Self {
    Self {
      id,
      text: text.into(),
      tx,
    }
  }

  pub fn id(&self) -> QueryId {
    self.id
  }

  pub fn succeed(self, translation: Translation) {
    self.complete(Ok(translation));
  }

  /// Fail the query. `error` is shown to the user verbatim.
  pub fn fail(self, error: impl Into<String>) {
    self.complete(Err(error.into()));
  }

  pub fn complete(self, result: Result<Translation, String>) {
    let Self { id, text, tx } = self;
    if tx.send(QueryOutcome { id, text, result }).is_err() {
      tracing::debug!(?id, "query completed after its balloon closed");
    }
  }
}

/// Translation backend.
pub trait Translator {
  /// Start translating `query`. The outcome must be delivered through
  /// `reply`; calling it synchronously from here is allowed, the balloon
  /// applies it on a later UI turn either way.
  fn translate(&self, query: Query, reply: QueryReply);
}

pub type TranslateFuture = BoxFuture<'static, Result<Translation, String>>;

/// Runs an async backend on a tokio runtime.
pub struct AsyncTranslator<F> {
  runtime: Handle,
  backend: F,
}

impl<F> AsyncTranslator<F>
where
  F: Fn(&Query) -> TranslateFuture,
{
  pub fn new(runtime: Handle, backend: F) -> Self {
    Self { runtime, backend }
  }
}

impl<F> Translator for AsyncTranslator<F>
where
  F: Fn(&Query) -> TranslateFuture,
{
  fn translate(&self, query: Query, reply: QueryReply) {
    tracing::debug!(id = ?query.id, src = %query.src_lang, target = %query.target_lang, "spawning translation");
    let future = (self.backend)(&query);
    self.runtime.spawn(async move {
      reply.complete(future.await);
    });
  }
}
