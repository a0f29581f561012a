//! Event delivery for a controller shared between listeners
//!
//! Host listeners hold the controller behind a `RefCell`. An event that
//! arrives while another is still being handled (e.g. a synchronous click
//! from inside the first-play callback) is dropped so handlers always run
//! to completion one at a time.

use std::cell::RefCell;

use log::warn;

use crate::error::Result;
use crate::playback::controller::{AudioResource, ControlElement, PlaybackController};
use crate::playback::state::{PlaybackEvent, Transition};

/// Deliver one event to a shared controller
///
/// Returns `None` when the event was dropped because a handler is already
/// running, otherwise the handler's result.
pub fn dispatch<A, C>(
    controller: &RefCell<PlaybackController<A, C>>,
    event: PlaybackEvent,
) -> Option<Result<Transition>>
where
    A: AudioResource,
    C: ControlElement,
{
    let Ok(mut controller) = controller.try_borrow_mut() else {
        warn!("[PLAYBACK] Dropping re-entrant {} event", event);
        return None;
    };
    Some(controller.handle(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::headless::{HeadlessAudio, HeadlessControl};
    use crate::playback::state::{ControlAffordance, ResourceCommand};
    use std::cell::{Cell, OnceCell};
    use std::rc::{Rc, Weak};

    type Controller = PlaybackController<HeadlessAudio, HeadlessControl>;

    fn shared(audio: &HeadlessAudio) -> RefCell<Controller> {
        RefCell::new(PlaybackController::new(
            audio.clone(),
            HeadlessControl::default(),
            HeadlessControl::default(),
            || {},
        ))
    }

    #[test]
    fn test_dispatch_delivers_event() {
        let audio = HeadlessAudio::default();
        let controller = shared(&audio);

        let transition = dispatch(&controller, PlaybackEvent::Play).unwrap().unwrap();
        assert_eq!(transition.affordance, ControlAffordance::ShowStop);
        assert_eq!(audio.commands(), vec![ResourceCommand::Start]);
    }

    #[test]
    fn test_dispatch_returns_handler_error() {
        let audio = HeadlessAudio::default();
        audio.set_fail_start(true);
        let controller = shared(&audio);

        let result = dispatch(&controller, PlaybackEvent::Play).unwrap();
        assert_eq!(result.unwrap_err().error_code(), "RESOURCE_COMMAND_FAILED");
    }

    #[test]
    fn test_dispatch_drops_event_while_borrowed() {
        let audio = HeadlessAudio::default();
        let controller = shared(&audio);

        let busy = controller.borrow_mut();
        assert!(dispatch(&controller, PlaybackEvent::Play).is_none());
        drop(busy);

        assert!(audio.commands().is_empty());
        assert!(!controller.borrow().is_initialized());
    }

    #[test]
    fn test_click_from_first_play_callback_is_dropped() {
        let audio = HeadlessAudio::default();
        let slot: Rc<OnceCell<Weak<RefCell<Controller>>>> = Rc::new(OnceCell::new());
        let dropped = Rc::new(Cell::new(false));

        let (inner_slot, inner_dropped) = (slot.clone(), dropped.clone());
        let controller = Rc::new(RefCell::new(PlaybackController::new(
            audio.clone(),
            HeadlessControl::default(),
            HeadlessControl::default(),
            move || {
                if let Some(controller) = inner_slot.get().and_then(Weak::upgrade) {
                    inner_dropped.set(dispatch(&controller, PlaybackEvent::Stop).is_none());
                }
            },
        )));
        slot.set(Rc::downgrade(&controller)).unwrap();

        let transition = dispatch(&controller, PlaybackEvent::Play).unwrap().unwrap();

        assert!(transition.first_play_fired);
        assert!(dropped.get());
        assert_eq!(transition.affordance, ControlAffordance::ShowStop);
        assert_eq!(audio.commands(), vec![ResourceCommand::Start]);
        assert!(controller.borrow().user_wants_playing());
    }
}
