use yew::html::Scope;
use yew::prelude::*;

use super::page::{Msg, ViewerPage};

/// Playback controls, page counter, duration field and progress bar.
pub fn top_bar(component: &ViewerPage, link: &Scope<ViewerPage>) -> Html {
    let state = component.controller.state();
    let progress = format!("width:{:.1}%;height:100%;background:#1976d2;transition:width 0.3s;", state.progress() * 100.0);
    let on_duration = link.callback(|e: Event| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        Msg::SetDuration(input.value())
    });
    let bar_style = if state.is_fullscreen {
        "background:rgba(0,0,0,0.6);color:#fff;"
    } else {
        "background:#fff;color:#222;border-bottom:1px solid #ddd;"
    };

    html! {
        <div class="top-bar" style={bar_style}>
            <div style="display:flex;align-items:center;gap:0.5rem;padding:0.5rem 1rem;flex-wrap:wrap;">
                <button class="btn" disabled={!state.has_previous()} onclick={link.callback(|_| Msg::Previous)} title="Previous page (←)">
                    {"⏮"}
                </button>
                <button class="btn btn-primary" disabled={!state.can_play()} onclick={link.callback(|_| Msg::TogglePlay)} title="Play / pause (Space)">
                    { if state.is_playing { "⏸ Pause" } else { "▶ Play" } }
                </button>
                <button class="btn" disabled={!state.has_next()} onclick={link.callback(|_| Msg::Next)} title="Next page (→)">
                    {"⏭"}
                </button>

                <span style="min-width:7rem;text-align:center;">
                    { state.page_label().unwrap_or_default() }
                </span>

                <label style="display:flex;align-items:center;gap:0.25rem;">
                    {"Seconds per page"}
                    <input
                        type="number"
                        min="1"
                        style="width:4rem;"
                        value={state.duration_secs.to_string()}
                        onchange={on_duration}
                    />
                </label>

                <button class="btn" style="margin-left:auto;" onclick={link.callback(|_| Msg::ToggleFullscreen)} title="Fullscreen (F)">
                    { if state.is_fullscreen { "Exit Fullscreen" } else { "Fullscreen" } }
                </button>
            </div>
            <div style="height:4px;background:rgba(0,0,0,0.1);">
                <div style={progress} />
            </div>
        </div>
    }
}
