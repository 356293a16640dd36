//! Runtime state of the viewer.

use std::rc::Rc;

use common::embed::EmbedReference;
use common::fetcher::DocumentFetcher;
use common::slideshow::{KeyCommand, SlideshowController};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use super::helpers::{is_document_fullscreen, DocumentListener};
use super::messages::Msg;
use crate::bridge::pdfjs::PdfDocument;
use crate::net::GlooHttpClient;
use crate::timers::IntervalTimers;

pub struct ViewerPage {
    /// Page, playback and loading state plus the advance timer.
    pub controller: SlideshowController<IntervalTimers>,

    pub fetcher: Rc<DocumentFetcher<GlooHttpClient>>,

    /// Open pdf.js document, `None` while loading, on failure and in embed
    /// mode.
    pub document: Option<PdfDocument>,

    /// Set when a Drive file could only be shown through the preview frame.
    pub embed: Option<EmbedReference>,

    pub file_name: Option<String>,

    /// Size of the downloaded or uploaded file.
    pub byte_len: Option<usize>,

    /// Which download strategy produced the bytes (`direct`, a proxy name,
    /// `upload`).
    pub source: Option<String>,

    /// `(load generation, page)` last handed to the renderer.
    pub rendered: Option<(u64, u32)>,

    /// A render is running; pdf.js refuses two renders on one canvas.
    pub render_in_flight: bool,

    /// Fade applied while the next page is drawn.
    pub transitioning: bool,
    pub transition_generation: u64,

    pub container_ref: NodeRef,
    pub canvas_ref: NodeRef,
    pub file_input_ref: NodeRef,

    /// `keydown` and `fullscreenchange` listeners on the document.
    pub listeners: Vec<DocumentListener>,
}

impl ViewerPage {
    pub fn new(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        Self {
            controller: SlideshowController::new(
                IntervalTimers::new(ctx.link().callback(Msg::Tick)),
                config.default_duration_secs,
            ),
            fetcher: Rc::new(DocumentFetcher::new(GlooHttpClient, config)),
            document: None,
            embed: None,
            file_name: None,
            byte_len: None,
            source: None,
            rendered: None,
            render_in_flight: false,
            transitioning: false,
            transition_generation: 0,
            container_ref: NodeRef::default(),
            canvas_ref: NodeRef::default(),
            file_input_ref: NodeRef::default(),
            listeners: Vec::new(),
        }
    }

    /// Installs the keyboard shortcuts and tracks native fullscreen changes
    /// (the browser leaves fullscreen on Escape without asking us).
    pub fn listen_to_document(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        let keys = DocumentListener::new("keydown", move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let typing = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .is_some();
            if typing {
                return;
            }
            if let Some(command) = KeyCommand::from_code(&event.code()) {
                if command.prevents_default() {
                    event.prevent_default();
                }
                link.send_message(Msg::Key(command));
            }
        });

        let link = ctx.link().clone();
        let fullscreen = DocumentListener::new("fullscreenchange", move |_| {
            link.send_message(Msg::FullscreenChanged(is_document_fullscreen()));
        });

        self.listeners.extend(keys.into_iter().chain(fullscreen));
    }
}
