//! Redirect resolution for shortened links.
//!
//! Each hop is a `HEAD` request that does not follow redirects. When no
//! usable redirect comes back (opaque response, blocked request, a 3xx
//! without location, or a landing page that is not a document), the page's
//! body is fetched through a CORS-relaxing proxy and scraped for an embedded
//! Drive link instead.

use std::collections::HashSet;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{Result, ScanError};
use crate::http::HttpClient;
use crate::links::classifier::classify;
use crate::links::urls::{find_drive_link, is_drive_url, join_location};
use crate::model::config::{AppConfig, ProxyEndpoint};

/// Body shape of "get contents" proxies such as allorigins.
#[derive(Deserialize)]
struct ProxyContents {
    contents: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RedirectResolver<C> {
    client: C,
    scrape_proxy: ProxyEndpoint,
    max_hops: usize,
}

impl<C: HttpClient> RedirectResolver<C> {
    pub fn new(client: C, config: &AppConfig) -> Self {
        Self {
            client,
            scrape_proxy: config.resolver_proxy.clone(),
            max_hops: config.max_redirect_hops,
        }
    }

    /// Follows `short_url` to its terminal URL.
    pub async fn resolve(&self, short_url: &str) -> Result<String> {
        let mut visited = HashSet::new();
        self.resolve_from(short_url, &mut visited).await
    }

    /// Like [`resolve`](Self::resolve), with a caller-provided set of URLs
    /// that must not be visited again.
    ///
    /// Returns the URL unchanged when no redirect is observed and scraping
    /// finds nothing; the caller classifies whatever comes back.
    pub async fn resolve_from(&self, short_url: &str, visited: &mut HashSet<String>) -> Result<String> {
        let mut current = short_url.to_string();
        visited.insert(current.clone());
        let mut hops = 0;

        loop {
            let probe = match self.client.probe(&current).await {
                Ok(probe) => probe,
                Err(err) => {
                    warn!("redirect probe for {current} failed ({err})");
                    return self.settle(&current, hops).await;
                }
            };

            if let Some(location) = probe.redirect_target() {
                let Some(target) = join_location(&current, location) else {
                    warn!("{current} redirects to unusable location {location:?}");
                    return self.settle(&current, hops).await;
                };
                debug!("{current} redirects ({}) to {target}", probe.status);

                if is_drive_url(&target) {
                    info!("resolved {short_url} to Drive link {target}");
                    return Ok(target);
                }
                if !visited.insert(target.clone()) {
                    return Err(ScanError::ResolutionFailed(format!(
                        "redirect loop back to {target}"
                    )));
                }
                hops += 1;
                if hops > self.max_hops {
                    return Err(ScanError::ResolutionFailed(format!(
                        "too many redirects starting at {short_url}"
                    )));
                }
                current = target;
                continue;
            }

            if probe.is_unobservable() {
                debug!("redirect metadata of {current} is hidden");
            } else {
                debug!("{current} answered {} without redirecting", probe.status);
            }
            return self.settle(&current, hops).await;
        }
    }

    /// The probe of `url` led nowhere further. A document link is final;
    /// anything else is scraped.
    async fn settle(&self, url: &str, hops: usize) -> Result<String> {
        if is_document_link(url) {
            debug!("{url} is terminal");
            return Ok(url.to_string());
        }
        debug!("scraping {url}");
        self.scrape(url, hops > 0).await
    }

    /// Fetches `url` through the scrape proxy and returns the first Drive link
    /// in its body, or `url` itself when there is none.
    ///
    /// An unreachable proxy is only an error while still on the scanned URL;
    /// once a redirect has been followed, the URL reached so far is returned.
    async fn scrape(&self, url: &str, followed_redirect: bool) -> Result<String> {
        let proxy_url = self.scrape_proxy.url_for(url);
        let response = match self.client.get(&proxy_url).await {
            Ok(response) => response,
            Err(err) if followed_redirect => {
                warn!("{} could not fetch {url} ({err}), stopping here", self.scrape_proxy.name);
                return Ok(url.to_string());
            }
            Err(err) => {
                return Err(ScanError::ResolutionFailed(format!(
                    "{} could not fetch {url}: {err}",
                    self.scrape_proxy.name
                )));
            }
        };

        if !response.is_success() {
            warn!(
                "{} answered HTTP {} for {url}",
                self.scrape_proxy.name, response.status
            );
            return Ok(url.to_string());
        }

        let raw = response.text();
        let body = serde_json::from_str::<ProxyContents>(&raw)
            .ok()
            .and_then(|wrapped| wrapped.contents)
            .unwrap_or(raw);

        match find_drive_link(&body) {
            Some(link) => {
                info!("scraped Drive link {link} from {url}");
                Ok(link.to_string())
            }
            None => {
                debug!("no Drive link in body of {url}");
                Ok(url.to_string())
            }
        }
    }
}

/// A PDF or Drive file link; anything else may still hide one in its body.
fn is_document_link(url: &str) -> bool {
    classify(url).is_ok_and(|link| link.is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ProbeResponse, TransportError};
    use crate::testing::{ScriptedHttp, html_response, http_status};

    fn resolver(http: &ScriptedHttp) -> RedirectResolver<ScriptedHttp> {
        RedirectResolver::new(http.clone(), &AppConfig::default())
    }

    fn proxied(url: &str) -> String {
        AppConfig::default().resolver_proxy.url_for(url)
    }

    #[tokio::test]
    async fn follows_redirect_chain_to_terminal_url() {
        let http = ScriptedHttp::new();
        http.on_probe("https://bit.ly/x", Ok(ProbeResponse::redirect(301, "https://mid.example/y")));
        http.on_probe("https://mid.example/y", Ok(ProbeResponse::redirect(302, "/files/deck.pdf")));
        http.on_probe("https://mid.example/files/deck.pdf", Ok(ProbeResponse::new(200)));

        let resolved = resolver(&http).resolve("https://bit.ly/x").await.unwrap();
        assert_eq!(resolved, "https://mid.example/files/deck.pdf");
    }

    #[tokio::test]
    async fn stops_at_first_drive_link() {
        let http = ScriptedHttp::new();
        http.on_probe(
            "https://scan.page/abc",
            Ok(ProbeResponse::redirect(302, "https://drive.google.com/file/d/ID1/view")),
        );

        let resolved = resolver(&http).resolve("https://scan.page/abc").await.unwrap();
        assert_eq!(resolved, "https://drive.google.com/file/d/ID1/view");
        assert_eq!(http.requests(), vec!["HEAD https://scan.page/abc".to_string()]);
    }

    #[tokio::test]
    async fn redirect_cycle_terminates() {
        let http = ScriptedHttp::new();
        http.on_probe("https://a.example/", Ok(ProbeResponse::redirect(301, "https://b.example/")));
        http.on_probe("https://b.example/", Ok(ProbeResponse::redirect(301, "https://a.example/")));

        let result = resolver(&http).resolve("https://a.example/").await;
        assert!(matches!(result, Err(ScanError::ResolutionFailed(_))));
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn hop_limit_caps_long_chains() {
        let http = ScriptedHttp::new();
        for n in 0..10 {
            http.on_probe(
                &format!("https://hop.example/{n}"),
                Ok(ProbeResponse::redirect(302, format!("https://hop.example/{}", n + 1))),
            );
        }

        let result = resolver(&http).resolve("https://hop.example/0").await;
        assert!(matches!(result, Err(ScanError::ResolutionFailed(msg)) if msg.contains("too many")));
        assert_eq!(http.requests().len(), 6);
    }

    #[tokio::test]
    async fn visited_set_from_caller_is_respected() {
        let http = ScriptedHttp::new();
        http.on_probe("https://a.example/", Ok(ProbeResponse::redirect(301, "https://seen.example/")));

        let mut visited = HashSet::from(["https://seen.example/".to_string()]);
        let result = resolver(&http).resolve_from("https://a.example/", &mut visited).await;
        assert!(matches!(result, Err(ScanError::ResolutionFailed(_))));
    }

    #[tokio::test]
    async fn hidden_redirect_is_scraped_through_proxy() {
        let http = ScriptedHttp::new();
        http.on_probe("https://scan.page/abc", Ok(ProbeResponse::opaque()));
        http.on_get(
            &proxied("https://scan.page/abc"),
            Ok(html_response(
                r#"{"contents":"<html><a href=\"https://drive.google.com/file/d/XYZ/view?usp=sharing\">open</a></html>"}"#,
            )),
        );

        let resolved = resolver(&http).resolve("https://scan.page/abc").await.unwrap();
        assert_eq!(resolved, "https://drive.google.com/file/d/XYZ/view?usp=sharing");
    }

    #[tokio::test]
    async fn blocked_probe_falls_back_to_scraping_raw_body() {
        let http = ScriptedHttp::new();
        http.on_probe(
            "https://short.example/q",
            Err(TransportError::new("TypeError: Failed to fetch")),
        );
        http.on_get(
            &proxied("https://short.example/q"),
            Ok(html_response("window.location='https://drive.google.com/file/d/RAW/view'")),
        );

        let resolved = resolver(&http).resolve("https://short.example/q").await.unwrap();
        assert_eq!(resolved, "https://drive.google.com/file/d/RAW/view");
    }

    #[tokio::test]
    async fn nothing_found_returns_url_unchanged() {
        let http = ScriptedHttp::new();
        http.on_probe("https://short.example/q", Ok(ProbeResponse::opaque()));
        http.on_get(&proxied("https://short.example/q"), Ok(html_response(r#"{"contents":"<p>hi</p>"}"#)));

        let resolved = resolver(&http).resolve("https://short.example/q").await.unwrap();
        assert_eq!(resolved, "https://short.example/q");

        http.on_get(&proxied("https://short.example/q"), Ok(http_status(503)));
        let resolved = resolver(&http).resolve("https://short.example/q").await.unwrap();
        assert_eq!(resolved, "https://short.example/q");
    }

    #[tokio::test]
    async fn blocked_probe_after_a_redirect_keeps_the_target() {
        let http = ScriptedHttp::new();
        http.on_probe("https://sho.rt/a", Ok(ProbeResponse::redirect(302, "https://cdn.example/a.pdf")));
        http.on_probe("https://cdn.example/a.pdf", Err(TransportError::new("blocked by CORS policy")));

        let resolved = resolver(&http).resolve("https://sho.rt/a").await.unwrap();
        assert_eq!(resolved, "https://cdn.example/a.pdf");
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn redirect_without_location_is_scraped() {
        let http = ScriptedHttp::new();
        http.on_probe("https://scan.page/p/abc", Ok(ProbeResponse::new(302)));
        http.on_get(
            &proxied("https://scan.page/p/abc"),
            Ok(html_response(r#"{"contents":"<a href='https://drive.google.com/file/d/XYZ/view'>"}"#)),
        );

        let resolved = resolver(&http).resolve("https://scan.page/p/abc").await.unwrap();
        assert_eq!(resolved, "https://drive.google.com/file/d/XYZ/view");
        assert_eq!(
            http.requests(),
            vec![
                "HEAD https://scan.page/p/abc".to_string(),
                format!("GET {}", proxied("https://scan.page/p/abc")),
            ]
        );
    }

    #[tokio::test]
    async fn landing_page_is_scraped_for_a_drive_link() {
        let http = ScriptedHttp::new();
        http.on_probe("https://scan.page/p/abc", Ok(ProbeResponse::new(200)));
        http.on_get(
            &proxied("https://scan.page/p/abc"),
            Ok(html_response(r#"{"contents":"<a href='https://drive.google.com/file/d/XYZ/view'>"}"#)),
        );

        let resolved = resolver(&http).resolve("https://scan.page/p/abc").await.unwrap();
        assert_eq!(resolved, "https://drive.google.com/file/d/XYZ/view");
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn pdf_answering_directly_is_not_scraped() {
        let http = ScriptedHttp::new();
        http.on_probe("https://cdn.example/deck.pdf", Ok(ProbeResponse::new(200)));

        let resolved = resolver(&http).resolve("https://cdn.example/deck.pdf").await.unwrap();
        assert_eq!(resolved, "https://cdn.example/deck.pdf");
        assert_eq!(http.requests(), vec!["HEAD https://cdn.example/deck.pdf".to_string()]);
    }

    #[tokio::test]
    async fn unreachable_proxy_is_resolution_failure() {
        let http = ScriptedHttp::new();
        http.on_probe("https://short.example/q", Ok(ProbeResponse::opaque()));

        let result = resolver(&http).resolve("https://short.example/q").await;
        assert!(matches!(result, Err(ScanError::ResolutionFailed(_))));
    }
}
