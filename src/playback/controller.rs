//! Playback Controller
//!
//! Reconciles three independent signals into a single "should audio be
//! playing" decision:
//! - Play/stop control activations (explicit user intent)
//! - View visibility changes (transient suspension, never alters intent)
//! - The one-time first-play initialization
//!
//! Each handler applies its audio command and the matching control
//! presentation as one step, so the visible control always mirrors the last
//! command this controller issued.

use log::{debug, warn};

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::playback::state::{
    CommandOutcome, ControlAffordance, PlaybackEvent, PlaybackPhase, PlaybackSnapshot,
    ResourceCommand, Transition, Visibility,
};

/// The audio resource the controller commands
///
/// Implementations should treat a command for the state the resource is
/// already in as harmless. Errors are returned to whoever triggered the
/// command; the controller never retries.
pub trait AudioResource {
    /// Begin or resume playback
    fn start(&self) -> Result<()>;

    /// Pause playback
    fn stop(&self) -> Result<()>;
}

/// A control whose presentation can be toggled
pub trait ControlElement {
    fn set_hidden(&self, hidden: bool);
}

/// One-shot callback run after the first play action
type FirstPlayCallback = Box<dyn FnOnce()>;

/// Owns the playback intent and initialization state for one page session
pub struct PlaybackController<A, C> {
    audio: A,
    play_control: C,
    stop_control: C,

    /// Taken on first play, so it can only ever run once
    on_first_play: Option<FirstPlayCallback>,

    /// Whether the first play action has happened
    initialized: bool,

    /// The user's last explicit choice; only the two controls change it
    user_wants_playing: bool,

    affordance: ControlAffordance,

    /// Last command the audio resource accepted; cleared when one is refused
    last_command: Option<ResourceCommand>,

    skip_redundant_commands: bool,
}

impl<A, C> std::fmt::Debug for PlaybackController<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("initialized", &self.initialized)
            .field("user_wants_playing", &self.user_wants_playing)
            .field("affordance", &self.affordance)
            .field("last_command", &self.last_command)
            .field("first_play_pending", &self.on_first_play.is_some())
            .finish()
    }
}

impl<A: AudioResource, C: ControlElement> PlaybackController<A, C> {
    /// Create a controller over existing collaborators
    ///
    /// Presents the play control and hides the stop control immediately.
    /// The audio resource is not commanded until the first event.
    ///
    /// # Example
    /// ```
    /// use ambient_sound::playback::{
    ///     ControlAffordance, HeadlessAudio, HeadlessControl, PlaybackController,
    /// };
    ///
    /// let play = HeadlessControl::default();
    /// let stop = HeadlessControl::default();
    /// let controller = PlaybackController::new(
    ///     HeadlessAudio::default(),
    ///     play.clone(),
    ///     stop.clone(),
    ///     || {},
    /// );
    ///
    /// assert_eq!(controller.affordance(), ControlAffordance::ShowPlay);
    /// assert!(!play.is_hidden());
    /// assert!(stop.is_hidden());
    /// ```
    pub fn new(
        audio: A,
        play_control: C,
        stop_control: C,
        on_first_play: impl FnOnce() + 'static,
    ) -> Self {
        let mut controller = Self {
            audio,
            play_control,
            stop_control,
            on_first_play: Some(Box::new(on_first_play)),
            initialized: false,
            user_wants_playing: false,
            affordance: ControlAffordance::ShowPlay,
            last_command: None,
            skip_redundant_commands: true,
        };
        controller.present(ControlAffordance::ShowPlay);
        controller
    }

    /// Apply the command policy from a player config
    pub fn with_config(mut self, config: &PlayerConfig) -> Self {
        self.skip_redundant_commands = config.skip_redundant_commands;
        self
    }

    /// Choose whether a command equal to the last one issued is re-sent
    pub fn set_skip_redundant_commands(&mut self, skip: bool) {
        self.skip_redundant_commands = skip;
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    /// Dispatch an event to its handler
    pub fn handle(&mut self, event: PlaybackEvent) -> Result<Transition> {
        match event {
            PlaybackEvent::Play => self.play(),
            PlaybackEvent::Stop => self.stop(),
            PlaybackEvent::VisibilityChanged(visibility) => self.visibility_changed(visibility),
        }
    }

    /// The play control was activated
    ///
    /// Records the intent to play, starts the audio and, on the very first
    /// play, runs the first-play callback after the start command. A failed
    /// start is returned only after all of that has happened.
    pub fn play(&mut self) -> Result<Transition> {
        self.user_wants_playing = true;

        let (command, result) = self.apply(ResourceCommand::Start);

        let mut first_play_fired = false;
        if !self.initialized {
            if let Some(callback) = self.on_first_play.take() {
                debug!("[PLAYBACK] First play, running initialization callback");
                callback();
                first_play_fired = true;
            }
            self.initialized = true;
        }

        result?;
        Ok(self.transition(PlaybackEvent::Play, command, first_play_fired))
    }

    /// The stop control was activated
    pub fn stop(&mut self) -> Result<Transition> {
        self.user_wants_playing = false;

        let (command, result) = self.apply(ResourceCommand::Stop);
        result?;
        Ok(self.transition(PlaybackEvent::Stop, command, false))
    }

    /// The view's visibility changed
    ///
    /// Ignored until the first play. Becoming visible resumes playback only
    /// if the user last chose to play; becoming hidden always stops, without
    /// touching the user's intent.
    pub fn visibility_changed(&mut self, visibility: Visibility) -> Result<Transition> {
        let event = PlaybackEvent::VisibilityChanged(visibility);

        if !self.initialized {
            debug!("[PLAYBACK] Ignoring {} before first play", event);
            return Ok(self.transition(event, CommandOutcome::None, false));
        }

        let command = match visibility {
            Visibility::Visible if self.user_wants_playing => ResourceCommand::Start,
            Visibility::Visible => {
                debug!("[PLAYBACK] Visible again, user chose stop; staying stopped");
                return Ok(self.transition(event, CommandOutcome::None, false));
            }
            Visibility::Hidden => ResourceCommand::Stop,
        };

        let (outcome, result) = self.apply(command);
        result?;
        Ok(self.transition(event, outcome, false))
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// The audio resource this controller commands
    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The user's last explicit play/stop choice
    pub fn user_wants_playing(&self) -> bool {
        self.user_wants_playing
    }

    pub fn affordance(&self) -> ControlAffordance {
        self.affordance
    }

    pub fn last_command(&self) -> Option<ResourceCommand> {
        self.last_command
    }

    /// Lifecycle phase derived from initialization and the last command
    pub fn phase(&self) -> PlaybackPhase {
        match (self.initialized, self.affordance) {
            (false, _) => PlaybackPhase::Uninitialized,
            (true, ControlAffordance::ShowStop) => PlaybackPhase::Playing,
            (true, ControlAffordance::ShowPlay) => PlaybackPhase::Stopped,
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            initialized: self.initialized,
            user_wants_playing: self.user_wants_playing,
            affordance: self.affordance,
            phase: self.phase(),
            last_command: self.last_command,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Send a command and present the matching affordance as one step
    ///
    /// The affordance follows the command even when the resource refuses it;
    /// the refusal is handed back for the caller to propagate. A refused
    /// command is forgotten so the next command always reaches the resource.
    fn apply(&mut self, command: ResourceCommand) -> (CommandOutcome, Result<()>) {
        self.present(ControlAffordance::for_command(command));

        if self.skip_redundant_commands && self.last_command == Some(command) {
            debug!("[PLAYBACK] Skipping redundant {}", command);
            return (CommandOutcome::Skipped(command), Ok(()));
        }

        let result = match command {
            ResourceCommand::Start => self.audio.start(),
            ResourceCommand::Stop => self.audio.stop(),
        };

        match &result {
            Ok(()) => {
                self.last_command = Some(command);
                debug!("[PLAYBACK] Issued {}, showing {}", command, self.affordance);
            }
            Err(err) => {
                self.last_command = None;
                warn!("[PLAYBACK] Audio {} failed: {}", command, err);
            }
        }

        (CommandOutcome::Issued(command), result)
    }

    fn present(&mut self, affordance: ControlAffordance) {
        self.affordance = affordance;
        self.play_control.set_hidden(affordance.play_hidden());
        self.stop_control.set_hidden(affordance.stop_hidden());
    }

    fn transition(
        &self,
        event: PlaybackEvent,
        command: CommandOutcome,
        first_play_fired: bool,
    ) -> Transition {
        Transition {
            event,
            command,
            first_play_fired,
            affordance: self.affordance,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
