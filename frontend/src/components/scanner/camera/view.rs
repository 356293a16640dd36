use yew::prelude::*;

use super::messages::Msg;
use super::state::QrScanner;

pub fn view(component: &QrScanner, ctx: &Context<QrScanner>) -> Html {
    let link = ctx.link();

    html! {
        <div class="qr-scanner" style="display:flex;flex-direction:column;align-items:center;gap:1rem;width:100%;">
            {
                if component.camera.is_active() {
                    html! {
                        <div style="position:relative;width:100%;max-width:480px;">
                            <video
                                ref={component.video_ref.clone()}
                                autoplay=true
                                muted=true
                                playsinline=true
                                style="width:100%;border-radius:8px;background:#000;"
                            />
                            <div style="position:absolute;inset:15%;border:3px solid rgba(255,255,255,0.8);border-radius:12px;pointer-events:none;" />
                            <button class="btn btn-secondary" style="margin-top:0.75rem;width:100%;" onclick={link.callback(|_| Msg::Close)}>
                                {"Stop Scanning"}
                            </button>
                        </div>
                    }
                } else {
                    html! {
                        <button class="btn btn-primary" onclick={link.callback(|_| Msg::Open)}>
                            {"Scan Barcode / QR Code"}
                        </button>
                    }
                }
            }
            { scan_result(component) }
            { scan_error(component) }
        </div>
    }
}

fn scan_result(component: &QrScanner) -> Html {
    let Some(result) = &component.result else {
        return html! {};
    };
    html! {
        <div class="scan-result" style="width:100%;max-width:480px;padding:0.75rem;border-radius:8px;background:#e8f5e9;word-break:break-all;">
            <strong>{"Scanned: "}</strong>{ &result.text }
            {
                if let Some(format) = &result.format {
                    html! { <div style="font-size:0.8rem;color:#555;">{ format!("Format: {format}") }</div> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn scan_error(component: &QrScanner) -> Html {
    let Some(error) = &component.error else {
        return html! {};
    };
    html! {
        <div class="scan-error" style="width:100%;max-width:480px;padding:0.75rem;border-radius:8px;background:#fff3e0;color:#e65100;">
            { error }
        </div>
    }
}
