//! Ambient Sound - play/stop control for a page's ambient audio track
//!
//! Keeps one audio track, its play/stop controls and the page's visibility
//! in agreement:
//! - The user's last explicit choice decides whether audio should play
//! - Hiding the page suspends playback; showing it again restores the choice
//! - A host-supplied callback runs once, right after the first play
//!
//! The state machine lives in [`playback`] and is independent of the
//! browser. On `wasm32` the [`web`] module binds it to real page elements.

pub mod cli;
pub mod config;
pub mod error;
pub mod playback;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PlayerConfig;
pub use error::{AmbientError, Result};
pub use playback::{
    AudioResource, ControlAffordance, ControlElement, PlaybackController, PlaybackEvent,
    Visibility,
};
