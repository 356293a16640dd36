//! View for the viewer screen.
//!
//! Layout, top to bottom: back button, control bar (native rendering only),
//! the page area and a panel describing where the document came from. In
//! fullscreen only the control bar and the page area remain.

use common::links::urls::{drive_file_id, drive_view_url};
use yew::prelude::*;

use super::helpers::format_size;
use super::messages::Msg;
use super::state::ViewerPage;
use crate::components::viewer::drive_embed::drive_embed;
use crate::components::viewer::file_upload::file_upload;
use crate::components::viewer::top_bar::top_bar;

pub fn view(component: &ViewerPage, ctx: &Context<ViewerPage>) -> Html {
    let link = ctx.link();
    let state = component.controller.state();

    // CSS fallback when the Fullscreen API is refused; harmless when the
    // container is already the native fullscreen element.
    let container_style = if state.is_fullscreen {
        "position:fixed;inset:0;z-index:1000;background:#000;display:flex;flex-direction:column;"
    } else {
        "min-height:100vh;display:flex;flex-direction:column;background:#f5f5f5;"
    };

    html! {
        <div class="viewer-page" ref={component.container_ref.clone()} style={container_style}>
            {
                if state.is_fullscreen {
                    html! {}
                } else {
                    html! {
                        <div style="padding:0.75rem 1rem;">
                            <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Back)}>
                                {"← Back to Scanner"}
                            </button>
                        </div>
                    }
                }
            }

            {
                if component.embed.is_none() {
                    top_bar(component, link)
                } else {
                    html! {}
                }
            }

            <div style="flex:1;display:flex;align-items:center;justify-content:center;position:relative;overflow:hidden;">
                { page_area(component, ctx) }
            </div>

            {
                if state.is_fullscreen {
                    html! {}
                } else {
                    source_panel(component, ctx)
                }
            }
        </div>
    }
}

fn page_area(component: &ViewerPage, ctx: &Context<ViewerPage>) -> Html {
    let link = ctx.link();
    let state = component.controller.state();

    if state.is_loading {
        return html! {
            <div style="display:flex;flex-direction:column;align-items:center;gap:0.75rem;color:#666;">
                <div class="spinner" />
                <span>{"Loading PDF..."}</span>
            </div>
        };
    }

    if let Some(embed) = &component.embed {
        return drive_embed(embed);
    }

    if component.document.is_none() {
        return html! {
            <div style="max-width:480px;padding:1.5rem;text-align:center;">
                {
                    if let Some(error) = &state.error {
                        html! { <p style="color:#b71c1c;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                { file_upload(component, link) }
            </div>
        };
    }

    let canvas_style = format!(
        "max-width:100%;box-shadow:0 2px 12px rgba(0,0,0,0.3);background:#fff;opacity:{};transition:opacity {}ms ease-in-out;",
        if component.transitioning { "0.35" } else { "1" },
        ctx.props().config.transition_ms / 2,
    );

    html! {
        <>
            <canvas ref={component.canvas_ref.clone()} style={canvas_style} />
            {
                if let Some(error) = &state.error {
                    html! {
                        <div style="position:absolute;bottom:1rem;left:50%;transform:translateX(-50%);padding:0.5rem 1rem;border-radius:6px;background:#ffebee;color:#b71c1c;">
                            { error }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

fn source_panel(component: &ViewerPage, ctx: &Context<ViewerPage>) -> Html {
    let url = &ctx.props().url;
    let drive_id = drive_file_id(url);
    let failed = component.document.is_none() && component.controller.state().error.is_some();
    let open_url = drive_id.as_deref().map(drive_view_url).unwrap_or_else(|| url.clone());

    html! {
        <div class="source-panel" style="padding:1rem;border-top:1px solid #ddd;background:#fff;font-size:0.85rem;color:#555;word-break:break-all;">
            <div><strong>{"Source: "}</strong>{ url }</div>
            {
                if let Some(name) = &component.file_name {
                    let size = component.byte_len.map(format_size).unwrap_or_default();
                    let via = component.source.as_deref().map(|source| format!(" via {source}")).unwrap_or_default();
                    html! { <div>{ format!("File: {name} {size}{via}") }</div> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(file_id) = &drive_id {
                    html! {
                        <div style="margin-top:0.5rem;">
                            <a href={drive_view_url(file_id)} target="_blank" rel="noopener noreferrer">
                                {"Open in browser"}
                            </a>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            {
                if failed {
                    html! {
                        <p style="margin:0.5rem 0 0;">
                            {"The server may refuse downloads from other sites (CORS). "}
                            <a href={open_url} target="_blank" rel="noopener noreferrer">{"Open the document in your browser"}</a>
                            {", save it, then use \"Upload PDF\"."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            {
                if component.embed.is_some() {
                    html! {
                        <p style="margin:0.5rem 0 0;">
                            {"This file is shown in Google's viewer. Slideshow controls are not available for it."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
