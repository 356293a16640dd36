//! `HttpClient` on top of the browser's fetch API.

use async_trait::async_trait;
use common::http::{HttpClient, HttpResponse, ProbeResponse, TransportError};
use gloo_net::http::{Method, Request, RequestBuilder};
use web_sys::{RequestRedirect, ResponseType};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlooHttpClient;

fn transport_error(err: gloo_net::Error) -> TransportError {
    TransportError::new(err.to_string())
}

#[async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, TransportError> {
        let response = RequestBuilder::new(url)
            .method(Method::HEAD)
            .redirect(RequestRedirect::Manual)
            .send()
            .await
            .map_err(transport_error)?;

        // With `redirect: manual` the browser answers cross-origin redirects
        // with an opaque response: no status, no headers.
        if matches!(response.type_(), ResponseType::Opaqueredirect | ResponseType::Opaque) {
            return Ok(ProbeResponse::opaque());
        }
        Ok(ProbeResponse {
            status: response.status(),
            location: response.headers().get("location"),
            opaque: false,
        })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = Request::get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.binary().await.map_err(transport_error)?;
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
