//! Outcome of downloading a document, including categorized failures and
//! their user-facing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed document download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchFailureKind {
    /// The browser refused the cross-origin request.
    Cors,
    /// The request never produced a response.
    Network,
    /// A response arrived but its declared type is not a PDF.
    NotAPdf,
    /// Anything else, including non-success HTTP statuses.
    Other,
}

impl FetchFailureKind {
    /// Picks a category from the text of a transport error.
    ///
    /// Browsers report blocked cross-origin requests and dead networks with
    /// different wordings (`Failed to fetch`, `NetworkError when attempting
    /// to fetch resource`, `Load failed`), so this matches on the text.
    pub fn categorize(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("cors") || lower.contains("blocked") || lower.contains("cross-origin") {
            FetchFailureKind::Cors
        } else if lower.contains("failed to fetch")
            || lower.contains("networkerror")
            || lower.contains("network error")
            || lower.contains("load failed")
        {
            FetchFailureKind::Network
        } else if lower.contains("not a pdf") {
            FetchFailureKind::NotAPdf
        } else {
            FetchFailureKind::Other
        }
    }
}

/// Why a document could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub kind: FetchFailureKind,
    pub detail: String,
}

impl FetchFailure {
    pub fn new(kind: FetchFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Builds a failure whose kind is derived from `detail`.
    pub fn from_message(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: FetchFailureKind::categorize(&detail),
            detail,
        }
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self.kind {
            FetchFailureKind::Cors => {
                "CORS Error: Unable to load PDF due to browser security restrictions.".to_string()
            }
            FetchFailureKind::Network => {
                "Network Error: Unable to download PDF. Please check your internet connection."
                    .to_string()
            }
            FetchFailureKind::NotAPdf => {
                "Failed to load PDF: Downloaded content is not a PDF file".to_string()
            }
            FetchFailureKind::Other => format!("Failed to load PDF: {}", self.detail),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.detail)
    }
}

/// Document bytes obtained by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub bytes: Vec<u8>,
    /// Name derived from the source URL, when it has a usable last segment.
    pub file_name: Option<String>,
    /// Declared `Content-Type` of the response, if any.
    pub content_type: Option<String>,
    /// Name of the strategy that produced the bytes (`direct`, `codetabs`, ...).
    pub strategy: String,
}

/// Result of [`crate::fetcher::DocumentFetcher::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Bytes were downloaded and can be rendered natively.
    Fetched(FetchedDocument),
    /// Every strategy failed for a Google Drive file; show the embedded
    /// viewer for this file identifier instead.
    FallbackToEmbed(String),
    /// The document could not be downloaded.
    Failed(FetchFailure),
}
