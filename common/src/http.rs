//! Network port used by the resolver, the fetcher and the scan session.

use async_trait::async_trait;
use thiserror::Error;

/// Answer to a `HEAD` request sent without following redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    /// `Location` header, when the response exposes it.
    pub location: Option<String>,
    /// The browser hid the response (`opaqueredirect` / `opaque`), so neither
    /// the status nor the headers can be read.
    pub opaque: bool,
}

impl ProbeResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            location: None,
            opaque: false,
        }
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
            opaque: false,
        }
    }

    pub fn opaque() -> Self {
        Self {
            status: 0,
            location: None,
            opaque: true,
        }
    }

    fn is_redirect(&self) -> bool {
        !self.opaque && (300..400).contains(&self.status)
    }

    /// Redirect target, if this is a readable 3xx response with a location.
    pub fn redirect_target(&self) -> Option<&str> {
        if !self.is_redirect() {
            return None;
        }
        self.location
            .as_deref()
            .filter(|location| !location.trim().is_empty())
    }

    /// True when the answer says nothing usable about where the link leads:
    /// hidden by the browser, or a redirect without a location.
    pub fn is_unobservable(&self) -> bool {
        self.opaque || self.status == 0 || (self.is_redirect() && self.redirect_target().is_none())
    }
}

/// A fully read `GET` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The request did not produce a response at all. `message` is the text the
/// platform reported and is what failure categorization looks at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Minimal request/response primitive.
///
/// Futures are not required to be `Send`: in the browser everything runs on
/// the UI thread.
#[async_trait(?Send)]
pub trait HttpClient {
    /// `HEAD` request that must not follow redirects automatically.
    async fn probe(&self, url: &str) -> Result<ProbeResponse, TransportError>;

    /// `GET` request returning the whole body.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_target_needs_a_readable_3xx() {
        assert_eq!(
            ProbeResponse::redirect(301, "https://example.com/a.pdf").redirect_target(),
            Some("https://example.com/a.pdf")
        );
        assert_eq!(ProbeResponse::redirect(200, "/ignored").redirect_target(), None);
        assert_eq!(ProbeResponse::redirect(302, "").redirect_target(), None);
        assert_eq!(ProbeResponse::opaque().redirect_target(), None);
        assert!(ProbeResponse::opaque().is_unobservable());
    }

    #[test]
    fn redirect_without_location_is_unobservable() {
        assert!(ProbeResponse::new(302).is_unobservable());
        assert!(ProbeResponse::redirect(301, "  ").is_unobservable());
        assert_eq!(ProbeResponse::redirect(301, "  ").redirect_target(), None);
        assert!(!ProbeResponse::new(200).is_unobservable());
        assert!(!ProbeResponse::redirect(302, "/next").is_unobservable());
    }
}
