//! Embedded-viewer fallback for Drive files that cannot be downloaded.
//!
//! The preview frame shows the document, but page changes, the slideshow
//! timer and fullscreen control are not available through it.

use crate::links::urls::drive_preview_url;

/// Everything needed to render a sandboxed preview frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReference {
    pub file_id: String,
    pub src: String,
    pub sandbox: &'static str,
    pub allow: &'static str,
    pub title: &'static str,
}

impl EmbedReference {
    pub fn for_drive_file(file_id: &str) -> Self {
        Self {
            file_id: file_id.to_string(),
            src: drive_preview_url(file_id),
            sandbox: "allow-scripts allow-same-origin allow-presentation",
            allow: "autoplay",
            title: "PDF Viewer",
        }
    }
}
