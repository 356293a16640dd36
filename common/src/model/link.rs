//! Scanned payloads, link kinds and the outcome of resolving a scanned link.

use serde::{Deserialize, Serialize};

/// Raw text decoded from a barcode or QR code, produced once per scan event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPayload {
    /// The decoded text, exactly as the decoder reported it.
    pub text: String,
    /// Barcode symbology reported by the decoder (e.g. `QR_CODE`), if known.
    pub format: Option<String>,
}

impl ScanPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: None,
        }
    }

    pub fn with_format(text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: Some(format.into()),
        }
    }
}

/// How a scanned link has to be handled downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// A URL pointing straight at a PDF file.
    DirectPdf,
    /// A Google Drive share link, normalized to its direct-download form.
    GoogleDrive,
    /// An `http(s)` URL that is neither of the above; it has to go through
    /// the redirect resolver before it can be classified again.
    Unresolvable,
}

/// A classified link.
///
/// When `kind` is [`LinkKind::GoogleDrive`], `url` always carries the Drive
/// file identifier (`...uc?export=download&id=<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub kind: LinkKind,
    pub url: String,
}

impl ResolvedLink {
    pub fn direct_pdf(url: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::DirectPdf,
            url: url.into(),
        }
    }

    pub fn google_drive(file_id: &str) -> Self {
        Self {
            kind: LinkKind::GoogleDrive,
            url: crate::links::urls::drive_download_url(file_id),
        }
    }

    pub fn unresolvable(url: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Unresolvable,
            url: url.into(),
        }
    }

    /// Drive file identifier, only for [`LinkKind::GoogleDrive`] links.
    pub fn drive_file_id(&self) -> Option<String> {
        match self.kind {
            LinkKind::GoogleDrive => crate::links::urls::drive_file_id(&self.url),
            _ => None,
        }
    }

    /// True once the link can be handed to the document fetcher.
    pub fn is_terminal(&self) -> bool {
        self.kind != LinkKind::Unresolvable
    }
}
