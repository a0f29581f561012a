//! Playback value types
//!
//! Events fed into the controller, commands it issues to the audio
//! resource, and the presentation state it derives from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmbientError;

/// Whether the hosting view is the one the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    /// Any non-visible state (background tab, minimized window, prerender)
    Hidden,
}

impl Visibility {
    /// Map a `document.visibilityState` value; anything but "visible" is hidden
    pub fn from_visibility_state(state: &str) -> Self {
        match state {
            "visible" => Visibility::Visible,
            _ => Visibility::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// External signals the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlaybackEvent {
    /// The play control was activated
    Play,
    /// The stop control was activated
    Stop,
    /// The view's visibility changed to the given state
    VisibilityChanged(Visibility),
}

impl fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackEvent::Play => write!(f, "play"),
            PlaybackEvent::Stop => write!(f, "stop"),
            PlaybackEvent::VisibilityChanged(Visibility::Visible) => write!(f, "visible"),
            PlaybackEvent::VisibilityChanged(Visibility::Hidden) => write!(f, "hidden"),
        }
    }
}

impl FromStr for PlaybackEvent {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play" => Ok(PlaybackEvent::Play),
            "stop" => Ok(PlaybackEvent::Stop),
            "visible" => Ok(PlaybackEvent::VisibilityChanged(Visibility::Visible)),
            "hidden" => Ok(PlaybackEvent::VisibilityChanged(Visibility::Hidden)),
            other => Err(AmbientError::InvalidEvent {
                token: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PlaybackEvent {
    type Error = AmbientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlaybackEvent> for String {
    fn from(event: PlaybackEvent) -> Self {
        event.to_string()
    }
}

/// Command sent to the audio resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCommand {
    Start,
    Stop,
}

impl fmt::Display for ResourceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCommand::Start => write!(f, "start"),
            ResourceCommand::Stop => write!(f, "stop"),
        }
    }
}

/// Which of the two mutually exclusive controls is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlAffordance {
    /// Play control shown, stop control hidden (default)
    #[default]
    ShowPlay,
    /// Stop control shown, play control hidden
    ShowStop,
}

impl ControlAffordance {
    /// Affordance that mirrors the given audio command
    pub fn for_command(command: ResourceCommand) -> Self {
        match command {
            ResourceCommand::Start => ControlAffordance::ShowStop,
            ResourceCommand::Stop => ControlAffordance::ShowPlay,
        }
    }

    /// Whether the play control should be hidden
    pub fn play_hidden(self) -> bool {
        self == ControlAffordance::ShowStop
    }

    /// Whether the stop control should be hidden
    pub fn stop_hidden(self) -> bool {
        self == ControlAffordance::ShowPlay
    }
}

impl fmt::Display for ControlAffordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlAffordance::ShowPlay => write!(f, "ShowPlay"),
            ControlAffordance::ShowStop => write!(f, "ShowStop"),
        }
    }
}

/// Coarse lifecycle of the audio resource as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// No play action has happened yet
    Uninitialized,
    Stopped,
    Playing,
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackPhase::Uninitialized => write!(f, "Uninitialized"),
            PlaybackPhase::Stopped => write!(f, "Stopped"),
            PlaybackPhase::Playing => write!(f, "Playing"),
        }
    }
}

/// What happened to the audio resource while handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "command", rename_all = "lowercase")]
pub enum CommandOutcome {
    /// The command was sent to the resource
    Issued(ResourceCommand),
    /// The command matched the last one issued and was not re-sent
    Skipped(ResourceCommand),
    /// The event required no command
    None,
}

impl CommandOutcome {
    /// The command sent to the resource, if any
    pub fn issued(self) -> Option<ResourceCommand> {
        match self {
            CommandOutcome::Issued(command) => Some(command),
            _ => None,
        }
    }
}

/// Result of handling a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub event: PlaybackEvent,
    pub command: CommandOutcome,
    /// True only for the event that invoked the first-play callback
    pub first_play_fired: bool,
    pub affordance: ControlAffordance,
}

/// Point-in-time view of the controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub initialized: bool,
    pub user_wants_playing: bool,
    pub affordance: ControlAffordance,
    pub phase: PlaybackPhase,
    pub last_command: Option<ResourceCommand>,
}
