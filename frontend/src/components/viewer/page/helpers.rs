//! Browser plumbing for the viewer: document-level listeners, fullscreen,
//! canvas sizing and display formatting.

use num_format::{Locale, ToFormattedString};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};
use yew::NodeRef;

/// Vertical space kept free for the top bar and source panel outside
/// fullscreen.
const CHROME_HEIGHT_PX: f64 = 220.0;

/// Shown when pdf.js cannot parse the bytes.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load PDF. Please try another file.";

/// An event listener on `document`, removed when dropped.
pub struct DocumentListener {
    document: Document,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl DocumentListener {
    pub fn new(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Err(err) = document.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("could not listen to {event}: {err:?}");
            return None;
        }
        Some(Self {
            document,
            event,
            callback,
        })
    }
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

pub fn is_document_fullscreen() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.fullscreen_element())
        .is_some()
}

/// Enters or leaves fullscreen for `container` and returns the new state.
///
/// When the Fullscreen API is refused the state still flips: the view then
/// pins the container over the viewport with CSS instead.
pub fn toggle_fullscreen(container: &NodeRef, fullscreen: bool) -> bool {
    if fullscreen {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            if document.fullscreen_element().is_some() {
                document.exit_fullscreen();
            }
        }
        return false;
    }

    match container.cast::<Element>() {
        Some(element) => {
            if let Err(err) = element.request_fullscreen() {
                log::info!("fullscreen refused ({err:?}), using CSS fallback");
            }
        }
        None => log::warn!("viewer container is not mounted"),
    }
    true
}

/// Height available to the page canvas, in CSS pixels.
pub fn canvas_max_height(fullscreen: bool) -> f64 {
    let viewport = web_sys::window()
        .and_then(|window| window.inner_height().ok())
        .and_then(|height| height.as_f64())
        .unwrap_or(800.0);
    if fullscreen {
        viewport
    } else {
        (viewport - CHROME_HEIGHT_PX).max(200.0)
    }
}

pub fn fallback_file_name() -> String {
    format!("scanned-pdf-{}.pdf", Uuid::new_v4())
}

pub fn format_size(bytes: usize) -> String {
    format!("{} bytes", bytes.to_formatted_string(&Locale::en))
}
