use std::{
  fs,
  path::Path,
};

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  error::{
    BalloonError,
    Result,
  },
  translation::Lang,
};

pub const DEFAULT_MAX_WIDTH: i32 = 600;
pub const DEFAULT_INSETS: i32 = 20;

/// Read-only settings snapshot handed to the balloon.
///
/// The layout values are not interpreted by the controller; they are passed
/// through to the popup that renders the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BalloonConfig {
  /// Maximum content width in pixels.
  pub max_width:          i32,
  /// Padding around the processing and error content.
  pub insets:             i32,
  pub source_language:    Lang,
  pub target_language:    Lang,
  /// Read the original text aloud once a result arrives.
  pub auto_play_tts:      bool,
  pub processing_message: String,
}

impl Default for BalloonConfig {
  fn default() -> Self {
    Self {
      max_width:          DEFAULT_MAX_WIDTH,
      insets:             DEFAULT_INSETS,
      source_language:    Lang::Auto,
      target_language:    Lang::Chinese,
      auto_play_tts:      false,
      processing_message: "Querying...".to_string(),
    }
  }
}

impl BalloonConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: &Path) -> Result<Self> {
    let source = fs::read_to_string(path).map_err(|source| BalloonError::ConfigIo {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml(&source)
  }
}
