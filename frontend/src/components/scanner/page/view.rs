use common::scanner::is_permission_denied;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ScannerPage;
use crate::components::scanner::camera::QrScanner;

pub fn view(component: &ScannerPage, ctx: &Context<ScannerPage>) -> Html {
    let link = ctx.link();
    let session = &component.session;

    html! {
        <div class="scanner-page" style="min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:2rem 1rem;gap:1.5rem;">
            <header style="text-align:center;">
                <h1 style="margin:0;">{"PDF Slideshow Reader"}</h1>
                <p style="color:#666;margin:0.5rem 0 0;">{"Scan a QR code that links to a PDF to start a slideshow"}</p>
            </header>

            <QrScanner
                on_scan={link.callback(Msg::Scanned)}
                on_device_error={link.callback(Msg::DeviceFailed)}
            />

            {
                if session.is_processing() {
                    html! {
                        <div style="display:flex;align-items:center;gap:0.75rem;">
                            <div class="spinner" />
                            <span>{"Processing scanned link..."}</span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            {
                match session.error() {
                    Some(err) => html! {
                        <div style="width:100%;max-width:480px;padding:1rem;border-radius:8px;background:#ffebee;color:#b71c1c;">
                            <div>{ err.user_message() }</div>
                            {
                                if is_permission_denied(&err.to_string()) {
                                    html! {
                                        <div style="margin-top:0.5rem;font-size:0.85rem;">
                                            {"Camera access was blocked. Allow camera access for this site in your browser settings and try again."}
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                            <button class="btn btn-secondary" style="margin-top:0.75rem;" onclick={link.callback(|_| Msg::ScanAgain)}>
                                {"Scan another code"}
                            </button>
                        </div>
                    },
                    _ => html! {},
                }
            }

            <section style="max-width:480px;color:#555;font-size:0.9rem;">
                <h3>{"How it works"}</h3>
                <ol>
                    <li>{"Tap the scan button and allow camera access."}</li>
                    <li>{"Point the camera at a QR code linking to a PDF (direct link, shortened link or Google Drive)."}</li>
                    <li>{"The PDF opens as a slideshow that advances automatically."}</li>
                </ol>
            </section>
        </div>
    }
}
