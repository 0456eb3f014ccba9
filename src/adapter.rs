//! The seam between request builders and the HTTP transport.
//!
//! Builders never touch `reqwest` directly. They produce a
//! [`RequestInformation`] and hand it to a [`RequestAdapter`], which owns
//! the transport, bearer authentication and transport-level retries, and
//! returns a [`RawResponse`] whatever its status.
//!
//! The free functions in this module (`send_json`, `send_optional`,
//! `send_no_content`, `send_text`) sit on top of the adapter: they map
//! non-success statuses to [`GraphError`] and deserialize success bodies.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::error::{GraphError, Result};
use crate::odata::ODataErrorResponse;
use crate::request::RequestInformation;

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status of the final attempt.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The whole body, possibly empty.
    pub body: Bytes,
}

impl RawResponse {
    /// True for a 204, or any response that carried no bytes.
    pub fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.is_empty()
    }
}

/// Sends request descriptions over some transport.
///
/// Implementations must not map HTTP statuses to errors; they only fail for
/// transport, authentication or request-construction problems.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Sends `request` and reads the full response.
    async fn execute(&self, request: &RequestInformation) -> Result<RawResponse>;
}

/// Parses a `Retry-After` header given in delta-seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Converts a non-success response into the matching error variant.
pub fn error_from_response(response: &RawResponse) -> GraphError {
    let body = String::from_utf8_lossy(&response.body).into_owned();

    if response.status == StatusCode::TOO_MANY_REQUESTS {
        return GraphError::Throttled {
            retry_after: retry_after(&response.headers),
            body,
        };
    }

    let error = serde_json::from_slice::<ODataErrorResponse>(&response.body)
        .ok()
        .map(|e| e.error);
    GraphError::Api {
        status: response.status,
        error,
        body,
    }
}

async fn execute_checked(
    adapter: &dyn RequestAdapter,
    request: &RequestInformation,
) -> Result<RawResponse> {
    let response = adapter.execute(request).await?;
    if response.status.is_success() {
        Ok(response)
    } else {
        Err(error_from_response(&response))
    }
}

/// Sends the request and deserializes the JSON body into `T`.
pub async fn send_json<T: DeserializeOwned>(
    adapter: &dyn RequestAdapter,
    request: &RequestInformation,
) -> Result<T> {
    let response = execute_checked(adapter, request).await?;
    if response.is_empty() {
        return Err(GraphError::EmptyResponse {
            status: response.status,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// Like [`send_json`], but a 204 or empty body yields `None`.
pub async fn send_optional<T: DeserializeOwned>(
    adapter: &dyn RequestAdapter,
    request: &RequestInformation,
) -> Result<Option<T>> {
    let response = execute_checked(adapter, request).await?;
    if response.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&response.body)?))
}

/// Sends the request and discards any success body.
pub async fn send_no_content(
    adapter: &dyn RequestAdapter,
    request: &RequestInformation,
) -> Result<()> {
    execute_checked(adapter, request).await?;
    Ok(())
}

/// Sends the request and returns the success body as text.
pub async fn send_text(adapter: &dyn RequestAdapter, request: &RequestInformation) -> Result<String> {
    let response = execute_checked(adapter, request).await?;
    Ok(String::from_utf8_lossy(&response.body).into_owned())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory adapter used by unit tests across the crate.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use reqwest::Url;

    use super::*;

    pub(crate) const BASE: &str = "https://graph.microsoft.com/v1.0";

    /// Replays canned responses and records the URL, method and body of
    /// every request it receives.
    #[derive(Default)]
    pub(crate) struct FakeAdapter {
        responses: Mutex<VecDeque<RawResponse>>,
        seen: Mutex<Vec<(String, String, Option<String>)>>,
    }

    impl FakeAdapter {
        pub(crate) fn respond(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(RawResponse {
                status: StatusCode::from_u16(status).unwrap(),
                headers: HeaderMap::new(),
                body: Bytes::from(body.to_string()),
            });
            self
        }

        pub(crate) fn seen(&self) -> Vec<(String, String, Option<String>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RequestAdapter for FakeAdapter {
        async fn execute(&self, request: &RequestInformation) -> Result<RawResponse> {
            let url = request.url(&Url::parse(BASE).unwrap())?;
            let body = request
                .content()
                .map(|b| String::from_utf8_lossy(b).into_owned());
            self.seen
                .lock()
                .unwrap()
                .push((request.method().to_string(), url.to_string(), body));
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned response left"))
        }
    }
}
