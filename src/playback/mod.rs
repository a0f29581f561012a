//! Playback Module
//!
//! The play/stop state machine and its collaborators:
//! - Event, command and presentation types
//! - The controller and the traits it drives
//! - Serialized delivery to a shared controller
//! - Headless collaborators for simulation and tests

pub mod controller;
pub mod dispatch;
pub mod headless;
pub mod state;

pub use controller::{AudioResource, ControlElement, PlaybackController};
pub use dispatch::dispatch;
pub use headless::{HeadlessAudio, HeadlessControl};
pub use state::{
    CommandOutcome, ControlAffordance, PlaybackEvent, PlaybackPhase, PlaybackSnapshot,
    ResourceCommand, Transition, Visibility,
};
