use common::embed::EmbedReference;
use yew::prelude::*;

/// Sandboxed Google Drive preview frame.
pub fn drive_embed(embed: &EmbedReference) -> Html {
    html! {
        <iframe
            src={embed.src.clone()}
            title={embed.title}
            sandbox={embed.sandbox}
            allow={embed.allow}
            style="width:100%;height:100%;min-height:70vh;border:none;background:#fff;"
        />
    }
}
