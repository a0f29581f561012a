//! Headless collaborators
//!
//! In-process stand-ins for the audio element and the two controls. Clones
//! share state, so a caller can keep one handle and give another to the
//! controller. Used by the CLI simulator and by tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{AmbientError, Result};
use crate::playback::controller::{AudioResource, ControlElement};
use crate::playback::state::ResourceCommand;

/// Audio resource that records every command it receives
#[derive(Debug, Clone, Default)]
pub struct HeadlessAudio {
    commands: Rc<RefCell<Vec<ResourceCommand>>>,
    fail_start: Rc<Cell<bool>>,
    fail_stop: Rc<Cell<bool>>,
    playing: Rc<Cell<bool>>,
}

impl HeadlessAudio {
    /// Every command received so far, including refused ones
    pub fn commands(&self) -> Vec<ResourceCommand> {
        self.commands.borrow().clone()
    }

    /// Make `start()` fail the way a blocked autoplay would
    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.set(fail);
    }

    /// Make `stop()` fail
    pub fn set_fail_stop(&self, fail: bool) {
        self.fail_stop.set(fail);
    }

    /// Whether the resource is audibly playing
    ///
    /// False after a refused start, even though the command was recorded.
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

impl AudioResource for HeadlessAudio {
    fn start(&self) -> Result<()> {
        self.commands.borrow_mut().push(ResourceCommand::Start);
        if self.fail_start.get() {
            return Err(AmbientError::ResourceCommand {
                command: ResourceCommand::Start,
                reason: "playback not allowed without user gesture".to_string(),
            });
        }
        self.playing.set(true);
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.commands.borrow_mut().push(ResourceCommand::Stop);
        if self.fail_stop.get() {
            return Err(AmbientError::ResourceCommand {
                command: ResourceCommand::Stop,
                reason: "media element not ready".to_string(),
            });
        }
        self.playing.set(false);
        Ok(())
    }
}

/// Control that remembers its hidden flag and how often it was written
#[derive(Debug, Clone, Default)]
pub struct HeadlessControl {
    hidden: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl HeadlessControl {
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Number of presentation writes received
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ControlElement for HeadlessControl {
    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
        self.writes.set(self.writes.get() + 1);
    }
}
