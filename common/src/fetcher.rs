//! Document download with the Google Drive proxy chain.
//!
//! A Drive download is tried with each [`FetchStrategy`] in order, strictly
//! one after the other, stopping at the first success. When all of them fail
//! the outcome is [`FetchOutcome::FallbackToEmbed`] rather than an error.
//! Any other URL gets exactly one direct request.
//!
//! There is no timeout here; callers that need one wrap the future.

use log::{debug, info, warn};
use url::Url;

use crate::http::{HttpClient, HttpResponse};
use crate::links::urls::{drive_file_id, is_drive_url};
use crate::model::config::{AppConfig, ProxyEndpoint};
use crate::model::fetch::{FetchFailure, FetchFailureKind, FetchOutcome, FetchedDocument};

/// File name given to documents downloaded from Drive.
pub const DRIVE_FILE_NAME: &str = "google-drive-pdf.pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    Direct,
    Proxy(ProxyEndpoint),
}

impl FetchStrategy {
    pub fn name(&self) -> &str {
        match self {
            FetchStrategy::Direct => "direct",
            FetchStrategy::Proxy(proxy) => &proxy.name,
        }
    }

    pub fn request_url(&self, target: &str) -> String {
        match self {
            FetchStrategy::Direct => target.to_string(),
            FetchStrategy::Proxy(proxy) => proxy.url_for(target),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentFetcher<C> {
    client: C,
    drive_strategies: Vec<FetchStrategy>,
}

impl<C: HttpClient> DocumentFetcher<C> {
    /// Direct download first, then every configured proxy.
    pub fn new(client: C, config: &AppConfig) -> Self {
        let drive_strategies = std::iter::once(FetchStrategy::Direct)
            .chain(config.fetch_proxies.iter().cloned().map(FetchStrategy::Proxy))
            .collect();
        Self::with_strategies(client, drive_strategies)
    }

    pub fn with_strategies(client: C, drive_strategies: Vec<FetchStrategy>) -> Self {
        Self {
            client,
            drive_strategies,
        }
    }

    pub fn strategies(&self) -> &[FetchStrategy] {
        &self.drive_strategies
    }

    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        if let Some(file_id) = drive_file_id(url) {
            return self.fetch_drive(url, &file_id).await;
        }
        self.fetch_direct(url).await
    }

    async fn fetch_drive(&self, url: &str, file_id: &str) -> FetchOutcome {
        for strategy in &self.drive_strategies {
            match self.attempt(strategy, url).await {
                Ok(response) => {
                    info!("downloaded Drive file {file_id} via {}", strategy.name());
                    return FetchOutcome::Fetched(FetchedDocument {
                        bytes: response.body,
                        file_name: Some(DRIVE_FILE_NAME.to_string()),
                        content_type: response.content_type,
                        strategy: strategy.name().to_string(),
                    });
                }
                Err(failure) => warn!("{} download of {url} failed: {failure}", strategy.name()),
            }
        }
        info!("all download strategies failed for Drive file {file_id}, using embedded viewer");
        FetchOutcome::FallbackToEmbed(file_id.to_string())
    }

    async fn fetch_direct(&self, url: &str) -> FetchOutcome {
        let strategy = FetchStrategy::Direct;
        let response = match self.attempt(&strategy, url).await {
            Ok(response) => response,
            Err(failure) => {
                warn!("download of {url} failed: {failure}");
                return FetchOutcome::Failed(failure);
            }
        };

        // Drive's download endpoint does not reliably declare a PDF type.
        if !is_drive_url(url) {
            if let Some(content_type) = &response.content_type {
                if !content_type.to_ascii_lowercase().contains("pdf") {
                    return FetchOutcome::Failed(FetchFailure::new(
                        FetchFailureKind::NotAPdf,
                        format!("declared content type is {content_type}"),
                    ));
                }
            }
        }

        FetchOutcome::Fetched(FetchedDocument {
            bytes: response.body,
            file_name: file_name_for(url),
            content_type: response.content_type,
            strategy: strategy.name().to_string(),
        })
    }

    async fn attempt(&self, strategy: &FetchStrategy, url: &str) -> Result<HttpResponse, FetchFailure> {
        let request_url = strategy.request_url(url);
        debug!("fetching {request_url} ({})", strategy.name());
        let response = self
            .client
            .get(&request_url)
            .await
            .map_err(|err| FetchFailure::from_message(err.message))?;
        if !response.is_success() {
            return Err(FetchFailure::new(
                FetchFailureKind::Other,
                format!("{} answered HTTP {}", strategy.name(), response.status),
            ));
        }
        Ok(response)
    }
}

/// Last path segment of `url`, ignoring query and fragment.
pub fn file_name_for(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, TransportError};
    use crate::testing::{ScriptedHttp, html_response, http_status, pdf_response};

    const DRIVE_URL: &str = "https://drive.google.com/uc?export=download&id=ABC123";

    fn fetcher(http: &ScriptedHttp) -> DocumentFetcher<ScriptedHttp> {
        DocumentFetcher::new(http.clone(), &AppConfig::default())
    }

    fn proxy_url(index: usize, target: &str) -> String {
        AppConfig::default().fetch_proxies[index].url_for(target)
    }

    #[tokio::test]
    async fn drive_tries_direct_then_both_proxies_then_embeds() {
        let http = ScriptedHttp::new();
        http.on_get(DRIVE_URL, Err(TransportError::new("TypeError: Failed to fetch")));
        http.on_get(&proxy_url(0, DRIVE_URL), Ok(http_status(500)));

        let outcome = fetcher(&http).fetch(DRIVE_URL).await;

        assert_eq!(outcome, FetchOutcome::FallbackToEmbed("ABC123".to_string()));
        assert_eq!(
            http.requests(),
            vec![
                format!("GET {DRIVE_URL}"),
                format!("GET {}", proxy_url(0, DRIVE_URL)),
                format!("GET {}", proxy_url(1, DRIVE_URL)),
            ]
        );
    }

    #[tokio::test]
    async fn drive_stops_at_first_successful_proxy() {
        let http = ScriptedHttp::new();
        http.on_get(&proxy_url(0, DRIVE_URL), Ok(html_response("%PDF-1.7 from proxy")));

        let FetchOutcome::Fetched(document) = fetcher(&http).fetch(DRIVE_URL).await else {
            panic!("expected bytes from the first proxy");
        };
        assert_eq!(document.strategy, "codetabs");
        assert_eq!(document.file_name.as_deref(), Some(DRIVE_FILE_NAME));
        assert_eq!(document.bytes, b"%PDF-1.7 from proxy");
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn injected_strategy_list_is_used_as_is() {
        let http = ScriptedHttp::new();
        let fetcher = DocumentFetcher::with_strategies(http.clone(), vec![FetchStrategy::Direct]);

        let outcome = fetcher.fetch(DRIVE_URL).await;
        assert_eq!(outcome, FetchOutcome::FallbackToEmbed("ABC123".to_string()));
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn direct_pdf_download() {
        let http = ScriptedHttp::new();
        let url = "https://example.com/talks/deck.pdf?v=2";
        http.on_get(url, Ok(pdf_response(b"%PDF-1.4")));

        let FetchOutcome::Fetched(document) = fetcher(&http).fetch(url).await else {
            panic!("expected a document");
        };
        assert_eq!(document.file_name.as_deref(), Some("deck.pdf"));
        assert_eq!(document.strategy, "direct");
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn missing_content_type_is_accepted() {
        let http = ScriptedHttp::new();
        let url = "https://example.com/deck.pdf";
        http.on_get(
            url,
            Ok(HttpResponse {
                status: 200,
                content_type: None,
                body: b"%PDF".to_vec(),
            }),
        );
        assert!(matches!(fetcher(&http).fetch(url).await, FetchOutcome::Fetched(_)));
    }

    #[tokio::test]
    async fn html_instead_of_pdf_is_rejected() {
        let http = ScriptedHttp::new();
        let url = "https://example.com/deck.pdf";
        http.on_get(url, Ok(html_response("<html>login</html>")));

        let FetchOutcome::Failed(failure) = fetcher(&http).fetch(url).await else {
            panic!("expected a failure");
        };
        assert_eq!(failure.kind, FetchFailureKind::NotAPdf);
    }

    #[tokio::test]
    async fn non_drive_failures_are_categorized() {
        let http = ScriptedHttp::new();
        let url = "https://example.com/deck.pdf";

        http.on_get(url, Ok(http_status(404)));
        let FetchOutcome::Failed(failure) = fetcher(&http).fetch(url).await else {
            panic!("expected a failure");
        };
        assert_eq!(failure.kind, FetchFailureKind::Other);
        assert_eq!(failure.detail, "direct answered HTTP 404");

        http.on_get(url, Err(TransportError::new("Access blocked by CORS policy")));
        let FetchOutcome::Failed(failure) = fetcher(&http).fetch(url).await else {
            panic!("expected a failure");
        };
        assert_eq!(failure.kind, FetchFailureKind::Cors);

        http.on_get(url, Err(TransportError::new("TypeError: Failed to fetch")));
        let FetchOutcome::Failed(failure) = fetcher(&http).fetch(url).await else {
            panic!("expected a failure");
        };
        assert_eq!(failure.kind, FetchFailureKind::Network);
        assert_eq!(http.requests().len(), 3);
    }

    #[test]
    fn file_names_come_from_the_last_segment() {
        assert_eq!(file_name_for("https://a.example/x/y.pdf#p=2").as_deref(), Some("y.pdf"));
        assert_eq!(file_name_for("https://a.example/"), None);
        assert_eq!(file_name_for("https://a.example"), None);
        assert_eq!(file_name_for("https://a.example/talks/deck.pdf?dl=1").as_deref(), Some("deck.pdf"));
        assert_eq!(file_name_for("no url"), None);
    }
}
