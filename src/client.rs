//! Authenticated HTTP client for Microsoft Graph.
//!
//! `GraphClient` wraps a `reqwest::Client` and a `TokenProvider` behind a
//! `Mutex` and implements [`RequestAdapter`], so every request builder in
//! the crate sends through it.
//!
//! Token lifecycle:
//! - Lazy acquisition: the first request that finds no cached token
//!   triggers `refresh_token()`.
//! - Expiry-aware: an expired token (60s buffer) is refreshed before use.
//! - One-shot 401 retry: a `401 Unauthorized` invalidates the cached token,
//!   refreshes once and resends. A second 401 is returned to the caller.
//!
//! Throttling: 429, 503 and 504 are retried up to `RetryPolicy::max_retries`
//! times, waiting for `Retry-After` when the service sends one and using
//! capped exponential backoff otherwise.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::adapter::{RawResponse, RequestAdapter, retry_after};
use crate::auth::TokenProvider;
use crate::config::{DEFAULT_BASE_URL, GraphConfig};
use crate::device_management::DeviceManagementRequestBuilder;
use crate::error::{GraphError, Result};
use crate::request::RequestInformation;

/// Retry behaviour for throttled and temporarily unavailable responses.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Backoff for the first retry when no `Retry-After` is given.
    pub base_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff for the given zero-based retry attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    fn should_retry(&self, status: StatusCode, attempt: u32) -> bool {
        attempt < self.max_retries
            && matches!(
                status,
                StatusCode::TOO_MANY_REQUESTS
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            )
    }
}

/// Transport settings for [`GraphClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// TCP + TLS handshake limit.
    pub connect_timeout: Duration,
    /// Whole request limit, including reading the body.
    pub request_timeout: Duration,
    /// Backoff for 429, 503 and 504 responses.
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(100),
            retry: RetryPolicy::default(),
        }
    }
}

/// Authenticated HTTP client for the Graph REST API.
///
/// `auth` is behind a `Mutex` because refreshing needs `&mut TokenProvider`
/// while requests only borrow the client. The lock is held for the token
/// check or refresh, never across a Graph round-trip.
pub struct GraphClient {
    client: Client,
    base_url: Url,
    auth: Mutex<TokenProvider>,
    retry: RetryPolicy,
}

impl GraphClient {
    /// Client for the public-cloud v1.0 endpoint.
    pub fn new(auth: TokenProvider, options: Option<ClientOptions>) -> Result<Self> {
        Self::with_base_url(auth, DEFAULT_BASE_URL, options)
    }

    /// Constructor with a custom base URL (national clouds, `beta`, or a
    /// mock server in tests).
    pub fn with_base_url(
        auth: TokenProvider,
        base_url: &str,
        options: Option<ClientOptions>,
    ) -> Result<Self> {
        let options = options.unwrap_or_default();
        let base_url = Url::parse(base_url).map_err(|e| {
            GraphError::invalid_request(format!("invalid base URL `{base_url}`: {e}"))
        })?;
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()?;

        Ok(GraphClient {
            client,
            base_url,
            auth: Mutex::new(auth),
            retry: options.retry,
        })
    }

    /// Builds the token provider and client from a loaded configuration.
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        Self::with_base_url(
            config.token_provider()?,
            &config.base_url,
            Some(config.client_options()),
        )
    }

    /// Root that URL templates are expanded against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Entry point to the `deviceManagement` resource tree.
    pub fn device_management(&self) -> DeviceManagementRequestBuilder<'_> {
        DeviceManagementRequestBuilder::new(self)
    }

    async fn bearer_token(&self) -> Result<String> {
        let mut auth = self.auth.lock().await;
        if auth.token().is_none() {
            auth.refresh_token().await?;
        }
        auth.token().map(str::to_owned).ok_or_else(|| GraphError::Auth {
            message: "token missing after refresh".to_string(),
            source: None,
        })
    }

    async fn force_refresh(&self) -> Result<String> {
        let mut auth = self.auth.lock().await;
        auth.invalidate();
        auth.refresh_token().await?;
        auth.token().map(str::to_owned).ok_or_else(|| GraphError::Auth {
            message: "token missing after forced refresh".to_string(),
            source: None,
        })
    }

    fn build_request(
        &self,
        request: &RequestInformation,
        url: &Url,
        token: &str,
    ) -> reqwest::RequestBuilder {
        let mut headers = request.headers().clone();
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        let mut req = self
            .client
            .request(request.method().clone(), url.clone())
            .bearer_auth(token)
            .headers(headers);
        if let Some(content) = request.content() {
            req = req.body(content.clone());
        }
        req
    }
}

#[async_trait]
impl RequestAdapter for GraphClient {
    async fn execute(&self, request: &RequestInformation) -> Result<RawResponse> {
        let url = request.url(&self.base_url)?;
        let mut token = self.bearer_token().await?;
        let mut refreshed = false;
        let mut attempt = 0;

        loop {
            debug!(method = %request.method(), url = %url, attempt, "sending request");
            let resp = self.build_request(request, &url, &token).send().await?;
            let status = resp.status();

            if status == StatusCode::UNAUTHORIZED && !refreshed {
                warn!(url = %url, "received 401, refreshing token and retrying once");
                token = self.force_refresh().await?;
                refreshed = true;
                continue;
            }

            if self.retry.should_retry(status, attempt) {
                let delay = retry_after(resp.headers())
                    .map(|d| d.min(self.retry.max_delay))
                    .unwrap_or_else(|| self.retry.backoff(attempt));
                warn!(
                    url = %url,
                    status = status.as_u16(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "service asked us to back off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let headers = resp.headers().clone();
            let body = resp.bytes().await?;
            debug!(url = %url, status = status.as_u16(), bytes = body.len(), "received response");
            return Ok(RawResponse {
                status,
                headers,
                body,
            });
        }
    }
}
