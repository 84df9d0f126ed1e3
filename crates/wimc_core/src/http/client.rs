//! `reqwest`-backed transport.
//!
//! # Responsibility
//! - Turn `HttpRequest` values into real HTTP calls against the API base URL.
//! - Apply timeout, user agent and body content type per method.
//!
//! # Invariants
//! - Status codes are returned as-is; non-2xx is not an error here.
//! - Dropping the returned future aborts the underlying request.

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::config::ClientConfig;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::time::Instant;

/// Transport over a shared `reqwest::Client` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Builds a transport with its own client configured from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Reuses an existing client, e.g. to share a pool across transports.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let started_at = Instant::now();
        let url = self.config.endpoint_for(&request.path);
        let parsed =
            reqwest::Url::parse(&url).map_err(|_| TransportError::InvalidUrl(url.clone()))?;

        let method = Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|_| TransportError::InvalidUrl(url.clone()))?;
        let mut builder = self.client.request(method, parsed).query(&request.query);
        if let Some(body) = &request.body {
            // `json` keeps an explicitly set content type.
            builder = builder
                .header(CONTENT_TYPE, request.method.body_content_type())
                .json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "event=http_send module=http status=error method={} path={} duration_ms={} error={}",
                    request.method,
                    request.path,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect::<Vec<_>>();
        let body = response.bytes().await?.to_vec();

        debug!(
            "event=http_send module=http status=ok method={} path={} http_status={} bytes={} duration_ms={}",
            request.method,
            request.path,
            status,
            body.len(),
            started_at.elapsed().as_millis()
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
