//! Browser Overlay Surface
//!
//! `OverlaySurface` backed by `web_sys` elements and `gloo_timers`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, HtmlElement, HtmlVideoElement};

use super::controller::{OverlayController, OverlayEvent, OverlayId, OverlayMedia, OverlaySurface};

/// Class of the overlay root element
pub const OVERLAY_CLASS: &str = "video-overlay";

/// Body class that locks page scrolling while a modal or overlay is up
pub const MODAL_OPEN_CLASS: &str = "modal-open";

/// Overlay controller shared with the DOM callbacks it installs
pub type SharedOverlay = Rc<RefCell<OverlayController<DomOverlaySurface>>>;

type ControllerLink = Weak<RefCell<OverlayController<DomOverlaySurface>>>;

/// Create an overlay controller wired to the current document.
pub fn create_dom_overlay(fallback: Duration) -> SharedOverlay {
    Rc::new_cyclic(|link: &ControllerLink| {
        RefCell::new(OverlayController::with_fallback(
            DomOverlaySurface::new(link.clone()),
            fallback,
        ))
    })
}

struct Mounted {
    id: OverlayId,
    root: HtmlElement,
    video: HtmlVideoElement,
    on_ended: Closure<dyn FnMut()>,
    on_click: Option<Closure<dyn FnMut()>>,
    fallback: Option<Timeout>,
}

impl Mounted {
    fn detach(self) {
        let _ = self
            .video
            .remove_event_listener_with_callback("ended", self.on_ended.as_ref().unchecked_ref());
        if let Some(on_click) = &self.on_click {
            let _ = self
                .root
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        let _ = self.video.pause();
        self.root.remove();
    }
}

/// Overlay surface rendering into `document.body`
pub struct DomOverlaySurface {
    document: Option<Document>,
    link: ControllerLink,
    mounted: Option<Mounted>,
}

impl DomOverlaySurface {
    fn new(link: ControllerLink) -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            link,
            mounted: None,
        }
    }

    /// Whether an overlay element is currently attached
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    fn current(&mut self, id: OverlayId) -> Option<&mut Mounted> {
        self.mounted.as_mut().filter(|m| m.id == id)
    }

    fn build(&self, document: &Document, id: OverlayId, media: &OverlayMedia) -> Result<Mounted, JsValue> {
        let root: HtmlElement = document.create_element("div")?.dyn_into()?;
        root.set_class_name(OVERLAY_CLASS);
        root.set_attribute("aria-hidden", "false")?;

        let frame: HtmlElement = document.create_element("div")?.dyn_into()?;
        frame.set_class_name("video-box");

        let video: HtmlVideoElement = document.create_element("video")?.dyn_into()?;
        video.set_src(&media.source);
        if let Some(poster) = &media.poster {
            video.set_poster(poster);
        }
        // Muted inline playback is the only kind mobile browsers start unattended
        video.set_muted(true);
        video.set_attribute("playsinline", "")?;
        video.set_autoplay(true);
        video.set_controls(false);

        frame.append_child(&video)?;
        root.append_child(&frame)?;

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&root)?;
        body.class_list().add_1(MODAL_OPEN_CLASS)?;

        let link = self.link.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            dispatch(&link, OverlayEvent::PlaybackEnded(id));
        }) as Box<dyn FnMut()>);
        video.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())?;

        Ok(Mounted {
            id,
            root,
            video,
            on_ended,
            on_click: None,
            fallback: None,
        })
    }
}

impl OverlaySurface for DomOverlaySurface {
    fn mount(&mut self, id: OverlayId, media: &OverlayMedia) {
        let Some(document) = self.document.clone() else {
            tracing::warn!(%id, "No document; overlay not shown");
            return;
        };

        // Leftover element from outside this controller
        if let Ok(Some(stale)) = document.query_selector(&format!(".{}", OVERLAY_CLASS)) {
            stale.remove();
        }

        match self.build(&document, id, media) {
            Ok(mounted) => self.mounted = Some(mounted),
            Err(e) => tracing::error!(%id, "Failed to build overlay: {:?}", e),
        }
    }

    fn unmount(&mut self, id: OverlayId) {
        if self.mounted.as_ref().map(|m| m.id) == Some(id) {
            if let Some(mounted) = self.mounted.take() {
                mounted.detach();
            }
        }
    }

    fn request_play(&mut self, id: OverlayId) {
        let link = self.link.clone();
        let Some(mounted) = self.current(id) else {
            return;
        };

        if let Some(on_click) = mounted.on_click.take() {
            let _ = mounted
                .root
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }

        match mounted.video.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    let event = match JsFuture::from(promise).await {
                        Ok(_) => OverlayEvent::PlaybackStarted(id),
                        Err(_) => OverlayEvent::PlaybackBlocked(id),
                    };
                    deliver(&link, event);
                });
            }
            Err(_) => dispatch(&link, OverlayEvent::PlaybackBlocked(id)),
        }
    }

    fn arm_fallback(&mut self, id: OverlayId, after: Duration) {
        let link = self.link.clone();
        let Some(mounted) = self.current(id) else {
            return;
        };

        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        mounted.fallback = Some(Timeout::new(millis, move || {
            dispatch(&link, OverlayEvent::FallbackElapsed(id));
        }));
    }

    fn cancel_fallback(&mut self, id: OverlayId) {
        if let Some(mounted) = self.current(id) {
            // Dropping a gloo Timeout clears it
            drop(mounted.fallback.take());
        }
    }

    fn arm_resume_on_click(&mut self, id: OverlayId) {
        let link = self.link.clone();
        let Some(mounted) = self.current(id) else {
            return;
        };

        let on_click = Closure::wrap(Box::new(move || {
            dispatch(&link, OverlayEvent::ResumeRequested(id));
        }) as Box<dyn FnMut()>);

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let added = mounted
            .root
            .add_event_listener_with_callback_and_add_event_listener_options(
                "click",
                on_click.as_ref().unchecked_ref(),
                &options,
            );

        match added {
            Ok(()) => mounted.on_click = Some(on_click),
            Err(e) => tracing::warn!(%id, "Could not arm tap-to-play: {:?}", e),
        }
    }
}

/// Queue an event for the controller.
///
/// DOM callbacks never touch the controller directly: handling may tear down
/// the overlay and drop the very closure that is running.
fn dispatch(link: &ControllerLink, event: OverlayEvent) {
    let link = link.clone();
    wasm_bindgen_futures::spawn_local(async move {
        deliver(&link, event);
    });
}

fn deliver(link: &ControllerLink, event: OverlayEvent) {
    let Some(controller) = link.upgrade() else {
        return;
    };

    let borrowed = controller.try_borrow_mut();
    match borrowed {
        Ok(mut controller) => controller.handle(event),
        Err(_) => tracing::warn!(?event, "Overlay controller busy; event dropped"),
    }
}
