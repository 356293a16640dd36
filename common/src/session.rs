//! Scan session: from decoded text to the URL handed to the viewer.
//!
//! The UI owns a [`ScanSession`] (synchronous bookkeeping) and a
//! [`LinkPipeline`] (the asynchronous classify → resolve → validate chain).
//! A scan is started with [`ScanSession::begin`], run with
//! [`LinkPipeline::run`] and finished with [`ScanSession::complete`], which
//! drops results belonging to an older scan.

use log::{debug, info};

use crate::error::{Result, ScanError};
use crate::http::HttpClient;
use crate::links::classifier::{classify, classify_resolved};
use crate::links::resolver::RedirectResolver;
use crate::model::config::AppConfig;
use crate::model::link::{LinkKind, ResolvedLink, ScanPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Open the viewer on this URL.
    Navigate(String),
    /// Show the error and let the user scan again.
    Failed(ScanError),
    /// The result belongs to a scan that is no longer current.
    Ignored,
}

/// A scan accepted by [`ScanSession::begin`].
#[derive(Debug, Clone)]
pub struct ScanTicket {
    pub generation: u64,
    pub payload: ScanPayload,
}

#[derive(Debug, Default)]
pub struct ScanSession {
    is_processing: bool,
    generation: u64,
    last_scan: Option<ScanPayload>,
    error: Option<ScanError>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn last_scan(&self) -> Option<&ScanPayload> {
        self.last_scan.as_ref()
    }

    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Accepts a decoded payload unless a scan is already being processed;
    /// payloads arriving meanwhile are dropped, not queued.
    pub fn begin(&mut self, payload: ScanPayload) -> Option<ScanTicket> {
        if self.is_processing {
            debug!("scan in progress, ignoring {:?}", payload.text);
            return None;
        }
        self.generation += 1;
        self.is_processing = true;
        self.error = None;
        self.last_scan = Some(payload.clone());
        Some(ScanTicket {
            generation: self.generation,
            payload,
        })
    }

    pub fn complete(&mut self, generation: u64, result: Result<String>) -> ScanOutcome {
        if !self.is_processing || generation != self.generation {
            debug!("discarding result of scan {generation}");
            return ScanOutcome::Ignored;
        }
        self.is_processing = false;
        match result {
            Ok(url) => {
                info!("scan {generation} resolved to {url}");
                ScanOutcome::Navigate(url)
            }
            Err(err) => {
                info!("scan {generation} failed: {err}");
                self.error = Some(err.clone());
                ScanOutcome::Failed(err)
            }
        }
    }

    /// Records a camera failure reported by the decoder.
    pub fn device_failed(&mut self, detail: impl Into<String>) {
        self.error = Some(ScanError::DeviceUnavailable(detail.into()));
    }

    /// Clears the last result and forgets any scan still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.is_processing = false;
        self.last_scan = None;
        self.error = None;
    }

    /// Runs one scan to completion.
    pub async fn handle_scan<C>(&mut self, pipeline: &LinkPipeline<C>, payload: ScanPayload) -> ScanOutcome
    where
        C: HttpClient + Clone,
    {
        let Some(ticket) = self.begin(payload) else {
            return ScanOutcome::Ignored;
        };
        let result = pipeline.run(&ticket.payload).await;
        self.complete(ticket.generation, result)
    }
}

#[derive(Debug, Clone)]
pub struct LinkPipeline<C> {
    client: C,
    resolver: RedirectResolver<C>,
    validate_reachability: bool,
}

impl<C: HttpClient + Clone> LinkPipeline<C> {
    pub fn new(client: C, config: &AppConfig) -> Self {
        Self {
            resolver: RedirectResolver::new(client.clone(), config),
            client,
            validate_reachability: config.validate_reachability,
        }
    }

    /// Classifies the payload, resolves shortened links, and returns the URL
    /// the viewer should load.
    pub async fn run(&self, payload: &ScanPayload) -> Result<String> {
        let mut link = classify(payload.text.trim())?;
        if !link.is_terminal() {
            let resolved = self.resolver.resolve(&link.url).await?;
            link = classify_resolved(&resolved)?;
        }
        self.check_reachable(&link).await;
        Ok(link.url)
    }

    /// Best-effort probe. A refused cross-origin probe says nothing about
    /// whether the document exists, so no outcome here fails the scan.
    async fn check_reachable(&self, link: &ResolvedLink) {
        if !self.validate_reachability || link.kind == LinkKind::GoogleDrive {
            return;
        }
        match self.client.probe(&link.url).await {
            Ok(probe) => debug!("{} answered probe with status {}", link.url, probe.status),
            Err(err) => info!("probe of {} failed ({err}), assuming reachable", link.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ProbeResponse;
    use crate::testing::ScriptedHttp;

    fn pipeline(http: &ScriptedHttp) -> LinkPipeline<ScriptedHttp> {
        LinkPipeline::new(http.clone(), &AppConfig::default())
    }

    #[tokio::test]
    async fn drive_link_navigates_without_network() {
        let http = ScriptedHttp::new();
        let mut session = ScanSession::new();

        let outcome = session
            .handle_scan(
                &pipeline(&http),
                ScanPayload::new("https://drive.google.com/file/d/ABC123/view?usp=sharing"),
            )
            .await;

        assert_eq!(
            outcome,
            ScanOutcome::Navigate("https://drive.google.com/uc?export=download&id=ABC123".to_string())
        );
        assert!(http.requests().is_empty());
        assert!(!session.is_processing());
    }

    #[tokio::test]
    async fn failed_probe_is_treated_as_reachable() {
        let http = ScriptedHttp::new();
        let mut session = ScanSession::new();

        let outcome = session
            .handle_scan(&pipeline(&http), ScanPayload::new("  https://example.com/deck.pdf\n"))
            .await;

        assert_eq!(outcome, ScanOutcome::Navigate("https://example.com/deck.pdf".to_string()));
        assert_eq!(http.requests(), vec!["HEAD https://example.com/deck.pdf".to_string()]);
    }

    #[tokio::test]
    async fn validation_can_be_switched_off() {
        let http = ScriptedHttp::new();
        let config = AppConfig {
            validate_reachability: false,
            ..AppConfig::default()
        };
        let pipeline = LinkPipeline::new(http.clone(), &config);

        let url = pipeline.run(&ScanPayload::new("https://example.com/deck.pdf")).await.unwrap();
        assert_eq!(url, "https://example.com/deck.pdf");
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn shortened_link_is_resolved_and_reclassified() {
        let http = ScriptedHttp::new();
        http.on_probe(
            "https://bit.ly/deck",
            Ok(ProbeResponse::redirect(301, "https://drive.google.com/file/d/XY-9/view")),
        );

        let url = pipeline(&http).run(&ScanPayload::new("https://bit.ly/deck")).await.unwrap();
        assert_eq!(url, "https://drive.google.com/uc?export=download&id=XY-9");
    }

    #[tokio::test]
    async fn shortened_link_to_landing_page_is_not_a_pdf_link() {
        let http = ScriptedHttp::new();
        http.on_probe("https://bit.ly/home", Ok(ProbeResponse::redirect(301, "https://example.com/home")));
        http.on_probe("https://example.com/home", Ok(ProbeResponse::new(200)));
        let mut session = ScanSession::new();

        let outcome = session
            .handle_scan(&pipeline(&http), ScanPayload::new("https://bit.ly/home"))
            .await;

        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::NotAPdfLink(_))));
        assert!(matches!(session.error(), Some(ScanError::NotAPdfLink(_))));
        assert!(!session.is_processing());
    }

    #[tokio::test]
    async fn plain_text_is_invalid_content() {
        let http = ScriptedHttp::new();
        let mut session = ScanSession::new();
        let outcome = session
            .handle_scan(&pipeline(&http), ScanPayload::with_format("4006381333931", "EAN_13"))
            .await;
        assert_eq!(outcome, ScanOutcome::Failed(ScanError::InvalidContent));
        assert_eq!(session.last_scan().and_then(|scan| scan.format.as_deref()), Some("EAN_13"));
    }

    #[test]
    fn overlapping_scans_are_dropped() {
        let mut session = ScanSession::new();
        let first = session.begin(ScanPayload::new("https://a.example/x.pdf")).unwrap();
        assert!(session.begin(ScanPayload::new("https://b.example/y.pdf")).is_none());
        assert_eq!(session.last_scan().map(|scan| scan.text.as_str()), Some("https://a.example/x.pdf"));

        let outcome = session.complete(first.generation, Ok("https://a.example/x.pdf".to_string()));
        assert_eq!(outcome, ScanOutcome::Navigate("https://a.example/x.pdf".to_string()));
        assert!(session.begin(ScanPayload::new("https://b.example/y.pdf")).is_some());
    }

    #[test]
    fn results_after_reset_are_ignored() {
        let mut session = ScanSession::new();
        let ticket = session.begin(ScanPayload::new("https://a.example/x.pdf")).unwrap();
        session.reset();

        let outcome = session.complete(ticket.generation, Err(ScanError::InvalidContent));
        assert_eq!(outcome, ScanOutcome::Ignored);
        assert!(session.error().is_none());
    }

    #[test]
    fn camera_failure_is_recorded() {
        let mut session = ScanSession::new();
        session.device_failed("NotAllowedError: Permission denied");
        assert!(matches!(session.error(), Some(ScanError::DeviceUnavailable(_))));
    }
}
