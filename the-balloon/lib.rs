//! # the-balloon
//!
//! A transient translation balloon anchored next to text in an editor.
//!
//! The crate owns the balloon's lifecycle and placement; everything else is a
//! host collaborator described in [`host`]:
//!
//! - [`anchor`] maps the anchored text range to a point on screen.
//! - [`position`] places the balloon, preferring to stay put over jittering.
//! - [`content`] switches between the processing, result and error content.
//! - [`monitor`] watches pointer motion to show the pin button on hover.
//! - [`controller`] ties them together in [`Balloon`].
//!
//! ```ignore
//! let mut balloon = Balloon::new(host, popup, anchor, "display", BalloonConfig::default());
//! balloon.show()?;
//! // once per UI turn:
//! balloon.tick();
//! ```

pub mod anchor;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod monitor;
pub mod position;
pub mod presenter;
pub mod translation;

pub use config::BalloonConfig;
pub use content::{
  DisplayKind,
  DisplayState,
};
pub use controller::{
  Balloon,
  BalloonHost,
};
pub use error::BalloonError;
