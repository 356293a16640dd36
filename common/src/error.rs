use thiserror::Error;

use crate::model::fetch::FetchFailure;

/// Everything that can go wrong between a scan and a rendered page.
///
/// None of these are fatal: the scan session and the slideshow controller
/// turn them into a message and the user can scan or upload again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scanned content is not a link")]
    InvalidContent,

    #[error("could not resolve shortened link: {0}")]
    ResolutionFailed(String),

    #[error("link does not point to a PDF: {0}")]
    NotAPdfLink(String),

    #[error("download failed: {0}")]
    FetchFailed(FetchFailure),

    #[error("render failed: {0}")]
    RenderFailed(String),

    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
}

impl ScanError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::InvalidContent => "Scanned content is not a valid PDF link".to_string(),
            ScanError::ResolutionFailed(detail) => {
                format!("Failed to resolve shortened URL: {detail}")
            }
            ScanError::NotAPdfLink(_) => {
                "Shortened URL does not resolve to a PDF link".to_string()
            }
            ScanError::FetchFailed(failure) => failure.user_message(),
            ScanError::RenderFailed(_) => "Failed to render PDF page".to_string(),
            ScanError::DeviceUnavailable(detail) => format!("Camera unavailable: {detail}"),
        }
    }
}

impl From<FetchFailure> for ScanError {
    fn from(failure: FetchFailure) -> Self {
        ScanError::FetchFailed(failure)
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("proxy `{0}` has an empty URL template")]
    EmptyProxyTemplate(String),

    #[error("proxy `{0}` template has no {{url}} placeholder")]
    MissingPlaceholder(String),

    #[error("default slide duration must be at least one second")]
    ZeroDuration,

    #[error("redirect hop limit must be at least one")]
    ZeroHops,
}
