use yew::html::Scope;
use yew::prelude::*;

use super::page::{Msg, ViewerPage};

/// Manual upload offered when the document could not be downloaded.
pub fn file_upload(component: &ViewerPage, link: &Scope<ViewerPage>) -> Html {
    let on_change = link.batch_callback(|e: Event| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        // Allow picking the same file again after a failure.
        input.set_value("");
        file.map(Msg::FileSelected)
    });

    html! {
        <div class="file-upload" style="display:flex;flex-direction:column;align-items:center;gap:0.5rem;">
            <p style="margin:0;color:#555;">{"You can also open a PDF stored on this device."}</p>
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="application/pdf,.pdf"
                style="display:none;"
                onchange={on_change}
            />
            <button class="btn btn-primary" onclick={link.callback(|_| Msg::OpenFilePicker)}>
                {"Upload PDF"}
            </button>
        </div>
    }
}
