use std::{
  io,
  path::PathBuf,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BalloonError {
  /// The balloon was used after it had been disposed. This is a lifecycle bug
  /// in the caller.
  #[error("balloon was disposed")]
  Disposed,
  /// The anchor no longer maps to document content, usually because the text
  /// it pointed at was deleted.
  #[error("anchor range is no longer valid")]
  AnchorInvalidated,
  #[error("failed to read balloon config '{path}': {source}")]
  ConfigIo {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to parse balloon config: {0}")]
  Config(#[from] toml::de::Error),
}

pub type Result<T, E = BalloonError> = std::result::Result<T, E>;
