//! Update function for the viewer.
//!
//! Loading runs in three asynchronous steps (fetch or file read, pdf.js open,
//! page render), each reporting back with the load generation it belongs to.
//! Playback messages go straight to the controller; whenever the visible
//! page changes a short fade is started.

use common::embed::EmbedReference;
use common::model::fetch::FetchOutcome;
use common::slideshow::{KeyCommand, SlideshowController};
use common::ScanError;
use gloo_file::{futures::read_as_bytes, Blob};
use gloo_timers::future::TimeoutFuture;
use web_sys::{HtmlCanvasElement, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{canvas_max_height, fallback_file_name, toggle_fullscreen, LOAD_FAILED_MESSAGE};
use super::messages::Msg;
use super::state::ViewerPage;
use crate::bridge::pdfjs::PdfDocument;
use crate::timers::IntervalTimers;

pub fn update(component: &mut ViewerPage, ctx: &Context<ViewerPage>, msg: Msg) -> bool {
    match msg {
        Msg::Fetched(generation, outcome) => {
            if generation != component.controller.load_generation() {
                return false;
            }
            match outcome {
                FetchOutcome::Fetched(document) => {
                    log::info!(
                        "downloaded {} bytes via {}",
                        document.bytes.len(),
                        document.strategy
                    );
                    component.file_name = Some(document.file_name.unwrap_or_else(fallback_file_name));
                    component.byte_len = Some(document.bytes.len());
                    component.source = Some(document.strategy);
                    open_document(ctx, generation, document.bytes);
                    true
                }
                FetchOutcome::FallbackToEmbed(file_id) => {
                    log::info!("showing Drive file {file_id} in the preview frame");
                    component.embed = Some(EmbedReference::for_drive_file(&file_id));
                    component.controller.document_loaded(generation, 0)
                }
                FetchOutcome::Failed(failure) => {
                    log::error!("download of {} failed: {failure}", ctx.props().url);
                    component
                        .controller
                        .document_failed(generation, failure.user_message())
                }
            }
        }
        Msg::FileRead(generation, Ok(bytes)) => {
            if generation != component.controller.load_generation() {
                return false;
            }
            component.byte_len = Some(bytes.len());
            open_document(ctx, generation, bytes);
            true
        }
        Msg::FileRead(generation, Err(err)) => {
            log::error!("could not read the selected file: {err}");
            component.controller.document_failed(generation, LOAD_FAILED_MESSAGE)
        }
        Msg::Opened(generation, Ok(document)) => {
            let pages = document.page_count();
            if !component.controller.document_loaded(generation, pages) {
                // Dropping `document` closes it.
                return false;
            }
            log::info!("document opened with {pages} pages");
            component.document = Some(document);
            component.rendered = None;
            schedule_autoplay(component, ctx, generation);
            true
        }
        Msg::Opened(generation, Err(err)) => {
            log::error!("pdf.js could not open the document: {err}");
            component.controller.document_failed(generation, LOAD_FAILED_MESSAGE)
        }
        Msg::PageRendered(generation, page, result) => {
            component.render_in_flight = false;
            match result {
                Ok(()) if page == component.controller.state().current_page => {
                    component.controller.render_succeeded(generation);
                }
                Ok(()) => {}
                Err(err) => {
                    log::error!("rendering page {page} failed: {err}");
                    let message = ScanError::RenderFailed(err).user_message();
                    component.controller.render_failed(generation, message);
                }
            }
            // Re-render even without a state change so `rendered` picks up a
            // page that changed while this render was running.
            true
        }
        Msg::Tick(generation) => {
            let before = component.controller.state().current_page;
            let changed = component.controller.tick(generation);
            page_changed(component, ctx, before);
            changed
        }
        Msg::Autoplay(generation) => component.controller.autoplay(generation),
        Msg::TransitionDone(generation) => {
            if generation != component.transition_generation {
                return false;
            }
            component.transitioning = false;
            true
        }
        Msg::TogglePlay => component.controller.toggle(),
        Msg::Previous => navigate(component, ctx, |controller| controller.previous()),
        Msg::Next => navigate(component, ctx, |controller| controller.next()),
        Msg::SetDuration(text) => {
            // Non-numeric, zero and negative input leave the duration as is.
            if let Ok(seconds) = text.trim().parse::<u32>() {
                component.controller.set_duration(seconds);
            }
            true
        }
        Msg::ToggleFullscreen => {
            let fullscreen = component.controller.state().is_fullscreen;
            let now = toggle_fullscreen(&component.container_ref, fullscreen);
            set_fullscreen(component, now);
            true
        }
        Msg::FullscreenChanged(native) => {
            if native == component.controller.state().is_fullscreen {
                return false;
            }
            set_fullscreen(component, native);
            true
        }
        Msg::Key(command) => match command {
            KeyCommand::TogglePlay => update(component, ctx, Msg::TogglePlay),
            KeyCommand::Previous => update(component, ctx, Msg::Previous),
            KeyCommand::Next => update(component, ctx, Msg::Next),
            KeyCommand::ToggleFullscreen => update(component, ctx, Msg::ToggleFullscreen),
            KeyCommand::ExitFullscreen => {
                if component.controller.state().is_fullscreen {
                    update(component, ctx, Msg::ToggleFullscreen)
                } else {
                    false
                }
            }
        },
        Msg::OpenFilePicker => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            let generation = begin_load(component);
            log::info!("reading local file {}", file.name());
            component.file_name = Some(file.name());
            component.source = Some("upload".to_string());

            let link = ctx.link().clone();
            wasm_bindgen_futures::spawn_local(async move {
                let blob = Blob::from(file);
                let result = read_as_bytes(&blob).await.map_err(|err| err.to_string());
                link.send_message(Msg::FileRead(generation, result));
            });
            true
        }
        Msg::Back => {
            // Stop playback before the parent unmounts us.
            component.controller.pause();
            ctx.props().on_back.emit(());
            false
        }
    }
}

/// Downloads `props.url` as a fresh load.
pub fn start_fetch(component: &mut ViewerPage, ctx: &Context<ViewerPage>) {
    let generation = begin_load(component);
    let url = ctx.props().url.clone();
    log::info!("loading {url}");

    let fetcher = component.fetcher.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = fetcher.fetch(&url).await;
        link.send_message(Msg::Fetched(generation, outcome));
    });
}

/// Draws the current page unless it is already drawn or being drawn.
pub fn render_current_page(component: &mut ViewerPage, ctx: &Context<ViewerPage>) {
    let Some(document) = &component.document else {
        return;
    };
    let state = component.controller.state();
    if state.is_loading || state.page_count == 0 || component.render_in_flight {
        return;
    }
    let generation = component.controller.load_generation();
    let page = state.current_page;
    if component.rendered == Some((generation, page)) {
        return;
    }
    let Some(canvas) = component.canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };

    component.rendered = Some((generation, page));
    component.render_in_flight = true;
    let renderer = document.renderer();
    let max_height = canvas_max_height(state.is_fullscreen);
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = renderer.render(page, &canvas, max_height).await;
        link.send_message(Msg::PageRendered(generation, page, result));
    });
}

fn begin_load(component: &mut ViewerPage) -> u64 {
    let generation = component.controller.begin_load();
    component.document = None;
    component.embed = None;
    component.file_name = None;
    component.byte_len = None;
    component.source = None;
    component.rendered = None;
    component.transitioning = false;
    generation
}

fn open_document(ctx: &Context<ViewerPage>, generation: u64, bytes: Vec<u8>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = PdfDocument::open(&bytes).await;
        link.send_message(Msg::Opened(generation, result));
    });
}

fn schedule_autoplay(component: &ViewerPage, ctx: &Context<ViewerPage>, generation: u64) {
    if !component.controller.state().can_play() {
        return;
    }
    let delay = ctx.props().config.autoplay_delay_ms;
    let link = ctx.link().clone();
    spawn_local(async move {
        TimeoutFuture::new(delay).await;
        link.send_message(Msg::Autoplay(generation));
    });
}

fn navigate<F>(component: &mut ViewerPage, ctx: &Context<ViewerPage>, step: F) -> bool
where
    F: FnOnce(&mut SlideshowController<IntervalTimers>) -> bool,
{
    let before = component.controller.state().current_page;
    let changed = step(&mut component.controller);
    page_changed(component, ctx, before);
    changed
}

fn page_changed(component: &mut ViewerPage, ctx: &Context<ViewerPage>, before: u32) {
    if component.controller.state().current_page == before {
        return;
    }
    component.transitioning = true;
    component.transition_generation += 1;
    let generation = component.transition_generation;
    let duration = ctx.props().config.transition_ms;
    let link = ctx.link().clone();
    spawn_local(async move {
        TimeoutFuture::new(duration).await;
        link.send_message(Msg::TransitionDone(generation));
    });
}

fn set_fullscreen(component: &mut ViewerPage, fullscreen: bool) {
    component.controller.set_fullscreen(fullscreen);
    // The canvas is sized for the viewport, so redraw at the new size.
    component.rendered = None;
}
