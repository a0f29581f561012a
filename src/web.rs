//! Browser bindings
//!
//! Binds the controller to a page that already contains the audio element
//! and both controls. Click and `visibilitychange` listeners live for the
//! lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Document, EventTarget, HtmlAudioElement, HtmlElement};

use crate::config::PlayerConfig;
use crate::error::{AmbientError, Result};
use crate::playback::{
    dispatch, AudioResource, ControlElement, PlaybackController, PlaybackEvent,
    PlaybackSnapshot, ResourceCommand, Visibility,
};

/// Controller bound to real page elements
pub type WebController = PlaybackController<HtmlAudioResource, HtmlControl>;

/// Page audio element driven through `play()` / `pause()`
#[derive(Debug, Clone)]
pub struct HtmlAudioResource {
    element: HtmlAudioElement,
}

impl HtmlAudioResource {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }
}

impl AudioResource for HtmlAudioResource {
    fn start(&self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|err| AmbientError::ResourceCommand {
                command: ResourceCommand::Start,
                reason: js_error_message(&err),
            })?;

        // Autoplay rejections arrive later through the promise.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!("[PLAYBACK] Audio start rejected: {}", js_error_message(&err));
            }
        });
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.element
            .pause()
            .map_err(|err| AmbientError::ResourceCommand {
                command: ResourceCommand::Stop,
                reason: js_error_message(&err),
            })
    }
}

/// Page control toggled through its `hidden` attribute
#[derive(Debug, Clone)]
pub struct HtmlControl {
    element: HtmlElement,
}

impl HtmlControl {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl ControlElement for HtmlControl {
    fn set_hidden(&self, hidden: bool) {
        self.element.set_hidden(hidden);
    }
}

/// What the host keeps after mounting
#[derive(Debug, Clone)]
pub struct UiHandle {
    audio_element: HtmlAudioElement,
    controller: Rc<RefCell<WebController>>,
}

impl UiHandle {
    /// The audio element the controller drives
    pub fn audio_element(&self) -> &HtmlAudioElement {
        &self.audio_element
    }

    pub fn controller(&self) -> Rc<RefCell<WebController>> {
        self.controller.clone()
    }

    /// Current state, or `None` while an event is being handled
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        self.controller
            .try_borrow()
            .ok()
            .map(|controller| controller.snapshot())
    }
}

/// Find the configured elements, build the controller and attach listeners
///
/// Fails before the controller is built if any element is missing or of
/// the wrong kind.
pub fn mount(config: &PlayerConfig, on_first_play: impl FnOnce() + 'static) -> Result<UiHandle> {
    config.validate()?;

    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| AmbientError::MissingElement {
            id: "document".to_string(),
        })?;

    let audio_element: HtmlAudioElement =
        find_element(&document, &config.audio_element_id, "HTMLAudioElement")?;
    let play_button: HtmlElement =
        find_element(&document, &config.play_button_id, "HTMLElement")?;
    let stop_button: HtmlElement =
        find_element(&document, &config.stop_button_id, "HTMLElement")?;

    let controller = PlaybackController::new(
        HtmlAudioResource::new(audio_element.clone()),
        HtmlControl::new(play_button.clone()),
        HtmlControl::new(stop_button.clone()),
        on_first_play,
    )
    .with_config(config);
    let controller = Rc::new(RefCell::new(controller));

    {
        let controller = controller.clone();
        listen(&play_button, "click", move || {
            deliver(&controller, PlaybackEvent::Play)
        })?;
    }
    {
        let controller = controller.clone();
        listen(&stop_button, "click", move || {
            deliver(&controller, PlaybackEvent::Stop)
        })?;
    }
    {
        let controller = controller.clone();
        let doc = document.clone();
        listen(&document, "visibilitychange", move || {
            let visibility = current_visibility(&doc);
            deliver(&controller, PlaybackEvent::VisibilityChanged(visibility))
        })?;
    }

    Ok(UiHandle {
        audio_element,
        controller,
    })
}

/// JS entry point: mount with default element ids and return the audio element
#[wasm_bindgen(js_name = mountAmbientPlayer)]
pub fn mount_ambient_player(
    on_first_play: js_sys::Function,
) -> std::result::Result<HtmlAudioElement, JsValue> {
    let handle = mount(&PlayerConfig::default(), move || {
        if let Err(err) = on_first_play.call0(&JsValue::NULL) {
            warn!("[PLAYBACK] First-play callback threw: {}", js_error_message(&err));
        }
    })?;
    Ok(handle.audio_element().clone())
}

impl From<AmbientError> for JsValue {
    fn from(err: AmbientError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

fn deliver(controller: &RefCell<WebController>, event: PlaybackEvent) {
    if let Some(Err(err)) = dispatch(controller, event) {
        warn!("[PLAYBACK] {} failed: {}", event, err);
    }
}

fn find_element<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AmbientError::MissingElement { id: id.to_string() })?
        .dyn_into::<T>()
        .map_err(|_| AmbientError::WrongElementKind {
            id: id.to_string(),
            expected,
        })
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut() + 'static,
) -> Result<()> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| AmbientError::ListenerAttach {
            event,
            reason: js_error_message(&err),
        })?;
    callback.forget();
    Ok(())
}

fn current_visibility(document: &Document) -> Visibility {
    let state = js_sys::Reflect::get(document, &"visibilityState".into())
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
    Visibility::from_visibility_state(&state)
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
