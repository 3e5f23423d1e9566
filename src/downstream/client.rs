//! Reqwest-backed service client
//!
//! One instance per backend. Configuration (base URL, timeout, codec) is fixed
//! at construction and read-only afterwards, so a client is shared freely
//! between concurrent requests.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::{Downstream, DownstreamError, DownstreamRequest, DownstreamResponse, JsonCodec};
use crate::config::ServiceConfig;

/// HTTP client for one backend service
pub struct ServiceClient {
    name: &'static str,
    client: Client,
    base_url: Url,
    codec: JsonCodec,
}

impl ServiceClient {
    pub fn new(
        name: &'static str,
        config: &ServiceConfig,
        codec: JsonCodec,
    ) -> anyhow::Result<Self> {
        let base_url = parse_base_url(&config.base_url)
            .with_context(|| format!("{name} service base url"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .with_context(|| format!("{name} service http client"))?;

        Ok(Self {
            name,
            client,
            base_url,
            codec,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Downstream for ServiceClient {
    fn name(&self) -> &'static str {
        self.name
    }

    fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    async fn dispatch(
        &self,
        request: DownstreamRequest,
    ) -> Result<DownstreamResponse, DownstreamError> {
        let url = resolve_url(&self.base_url, &request)?;
        let mut builder = self.client.request(request.method.clone(), url.clone());
        if let Some(body) = &request.body {
            let encoded = self
                .codec
                .encode(body)
                .map_err(|e| DownstreamError::InvalidRequest(format!("unencodable body: {e}")))?;
            builder = builder.body(encoded);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(
                service = self.name,
                method = %request.method,
                path = url.path(),
                error = %e,
                "Downstream call failed"
            );
            DownstreamError::from_transport(self.name, &e)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DownstreamError::from_transport(self.name, &e))?;

        debug!(
            service = self.name,
            method = %request.method,
            path = url.path(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Downstream call completed"
        );

        Ok(DownstreamResponse::new(status, body.to_vec()))
    }
}

/// Validate a backend base URL and normalize it to end with `/`.
pub fn parse_base_url(raw: &str) -> Result<Url, DownstreamError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| DownstreamError::InvalidRequest(format!("base url '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(DownstreamError::InvalidRequest(format!(
            "base url '{raw}' must be an absolute http(s) url"
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(DownstreamError::InvalidRequest(format!(
            "base url '{raw}' must not carry a query or fragment"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Full URL for a request: base + rendered path + query.
///
/// The rendered path is appended as text and re-parsed, which leaves
/// existing `%XX` sequences alone. A path the parser would rewrite (dot
/// segments) is refused rather than sent somewhere else.
pub fn resolve_url(base: &Url, request: &DownstreamRequest) -> Result<Url, DownstreamError> {
    let path = request.render_path()?;
    let path = path.trim_start_matches('/');
    let raw = format!("{}{}", base.as_str(), path);
    let mut url = Url::parse(&raw)
        .map_err(|e| DownstreamError::InvalidRequest(format!("url '{raw}': {e}")))?;

    let expected = format!("{}{}", base.path(), path);
    if url.path() != expected {
        return Err(DownstreamError::InvalidRequest(format!(
            "path '{path}' resolves to '{}'",
            url.path()
        )));
    }

    if !request.query.is_empty() {
        url.query_pairs_mut().extend_pairs(
            request
                .query
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::fetch_text;

    fn config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            sort_param: "sortBy".to_string(),
        }
    }

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("http://users.internal:8081/api").unwrap();
        assert_eq!(url.as_str(), "http://users.internal:8081/api/");

        let url = parse_base_url("http://users.internal:8081").unwrap();
        assert_eq!(url.as_str(), "http://users.internal:8081/");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(parse_base_url("users.internal").is_err());
        assert!(parse_base_url("ftp://users.internal/").is_err());
        assert!(parse_base_url("http://users.internal/?x=1").is_err());
    }

    #[test]
    fn test_resolve_url_keeps_encoded_identifier() {
        let base = parse_base_url("http://bills.internal/api").unwrap();
        let request =
            DownstreamRequest::get("bills/{externalId}").path_param("externalId", "ab%2Fcd");
        let url = resolve_url(&base, &request).unwrap();
        assert_eq!(url.as_str(), "http://bills.internal/api/bills/ab%2Fcd");
    }

    #[test]
    fn test_resolve_url_appends_query_in_order() {
        let base = parse_base_url("http://users.internal/").unwrap();
        let request = DownstreamRequest::get("users/all")
            .query("pageNumber", 0)
            .query("pageSize", 10)
            .query("sortBy", "creationDate")
            .query("direction", "asc")
            .query("lastNameFilter", "van Dijk");
        let url = resolve_url(&base, &request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://users.internal/users/all?pageNumber=0&pageSize=10&sortBy=creationDate&direction=asc&lastNameFilter=van+Dijk"
        );
    }

    #[test]
    fn test_resolve_url_refuses_dot_segments() {
        let base = parse_base_url("http://users.internal/").unwrap();
        for id in [".", "..", "%2e", ".%2E"] {
            let request = DownstreamRequest::delete("users/{externalId}/delete")
                .path_param("externalId", id);
            let err = resolve_url(&base, &request).unwrap_err();
            assert!(matches!(err, DownstreamError::InvalidRequest(_)), "{id}");
        }

        let request = DownstreamRequest::delete("bills/{externalId}/delete")
            .path_param("externalId", "..");
        let base = parse_base_url("http://bills.internal/api").unwrap();
        assert!(resolve_url(&base, &request).is_err());
    }

    #[test]
    fn test_new_client_rejects_bad_base_url() {
        let err = ServiceClient::new("users", &config("users.internal"), JsonCodec::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").starts_with("users service base url"));
    }

    #[test]
    fn test_new_client() {
        let client =
            ServiceClient::new("users", &config("http://localhost:8081"), JsonCodec::default())
                .unwrap();
        assert_eq!(client.name(), "users");
        assert_eq!(client.base_url().as_str(), "http://localhost:8081/");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ServiceClient::new(
            "bills",
            &config(&format!("http://127.0.0.1:{port}")),
            JsonCodec::default(),
        )
        .unwrap();

        let err = fetch_text(&client, DownstreamRequest::delete("bills/delete"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DownstreamError::Transport {
                service: "bills",
                ..
            }
        ));
    }
}
