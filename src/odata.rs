//! OData envelope types shared by every endpoint family.
//!
//! - [`ODataCollection`]: the `{ "value": [...], "@odata.nextLink": ... }`
//!   wrapper returned by list endpoints.
//! - [`PrimitiveValue`]: the `{ "value": x }` wrapper returned by OData
//!   functions that produce a single primitive.
//! - [`ODataErrorResponse`] / [`MainError`]: the error payload Graph sends
//!   with 4xx/5xx responses.
//! - [`PageIterator`]: follows `@odata.nextLink` until the collection is
//!   exhausted.

use std::collections::HashSet;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{RequestAdapter, send_json};
use crate::error::GraphError;
use crate::request::RequestInformation;

/// One page of an OData collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ODataCollection<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    /// Absolute URL of the next page, absent on the last page.
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,

    /// Total item count, only present when `$count=true` was requested.
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Wrapper for OData functions that return a single primitive value.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimitiveValue<T> {
    /// The returned value.
    pub value: T,
}

/// Top-level OData error body: `{ "error": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataErrorResponse {
    /// The main error object.
    pub error: MainError,
}

/// The main error object inside an OData error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainError {
    /// Service-defined error code (e.g. `"ResourceNotFound"`, `"BadRequest"`).
    pub code: String,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,

    /// Diagnostic identifiers Graph attaches to every error.
    #[serde(default)]
    pub inner_error: Option<InnerError>,
}

/// Request correlation data that Microsoft support asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerError {
    /// Server-side request ID.
    #[serde(rename = "request-id", default)]
    pub request_id: Option<String>,

    /// Echo of the `client-request-id` header, if one was sent.
    #[serde(rename = "client-request-id", default)]
    pub client_request_id: Option<String>,

    /// Server timestamp of the failure.
    #[serde(default)]
    pub date: Option<String>,
}

/// Walks an OData collection page by page.
///
/// The first request is whatever the builder produced (template, query
/// options and headers). Every following request is a raw-URL GET on the
/// previous page's `@odata.nextLink`, which already encodes the query
/// options; only the headers are carried forward.
///
/// A `@odata.nextLink` that was already followed ends the walk with
/// `GraphError::InvalidRequest`.
pub struct PageIterator<'a, T> {
    adapter: &'a dyn RequestAdapter,
    next: Option<RequestInformation>,
    headers: HeaderMap,
    followed: HashSet<String>,
    _item: std::marker::PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> PageIterator<'a, T> {
    /// Creates an iterator whose first page is fetched with `first`.
    pub fn new(adapter: &'a dyn RequestAdapter, first: RequestInformation) -> Self {
        let headers = first.headers().clone();
        PageIterator {
            adapter,
            next: Some(first),
            headers,
            followed: HashSet::new(),
            _item: std::marker::PhantomData,
        }
    }

    /// Fetches the next page, or returns `None` once the last page was read.
    pub async fn next_page(&mut self) -> crate::error::Result<Option<Vec<T>>> {
        let Some(request) = self.next.take() else {
            return Ok(None);
        };

        let page: ODataCollection<T> = send_json(self.adapter, &request).await?;
        debug!(
            items = page.value.len(),
            has_next = page.next_link.is_some(),
            "fetched collection page"
        );

        if let Some(link) = page.next_link {
            if !self.followed.insert(link.clone()) {
                return Err(GraphError::invalid_request(format!(
                    "@odata.nextLink repeats an earlier page: {link}"
                )));
            }
            let mut follow = RequestInformation::from_raw_url(Method::GET, &link);
            for (name, value) in &self.headers {
                follow.headers_mut().append(name.clone(), value.clone());
            }
            self.next = Some(follow);
        }

        Ok(Some(page.value))
    }

    /// Drains every remaining page into a single vector.
    pub async fn collect_all(mut self) -> crate::error::Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::FakeAdapter;

    #[derive(Debug, Deserialize)]
    struct Item {
        id: String,
    }

    #[test]
    fn collection_reads_next_link_and_count() {
        let json = r#"{
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#deviceManagement/managedDevices",
            "@odata.count": 12,
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/deviceManagement/managedDevices?$skiptoken=abc",
            "value": [{"id": "a"}, {"id": "b"}]
        }"#;
        let page: ODataCollection<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(page.value.len(), 2);
        assert_eq!(page.value[1].id, "b");
        assert_eq!(page.count, Some(12));
        assert!(page.next_link.unwrap().contains("$skiptoken=abc"));
    }

    #[test]
    fn collection_without_value_is_empty() {
        let page: ODataCollection<Item> = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn error_response_parses_inner_error() {
        let json = r#"{
            "error": {
                "code": "ResourceNotFound",
                "message": "Resource not found",
                "innerError": {
                    "date": "2026-03-01T10:00:00",
                    "request-id": "9c1b2c3d-0000-4000-8000-000000000001",
                    "client-request-id": "9c1b2c3d-0000-4000-8000-000000000002"
                }
            }
        }"#;
        let resp: ODataErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.code, "ResourceNotFound");
        let inner = resp.error.inner_error.unwrap();
        assert_eq!(
            inner.request_id.as_deref(),
            Some("9c1b2c3d-0000-4000-8000-000000000001")
        );
        assert!(inner.date.is_some());
    }

    #[test]
    fn primitive_value_unwraps_boolean() {
        let v: PrimitiveValue<bool> =
            serde_json::from_str(r#"{"@odata.context": "x", "value": true}"#).unwrap();
        assert!(v.value);
    }

    fn first_page() -> RequestInformation {
        RequestInformation::new(
            Method::GET,
            "deviceManagement/managedDevices",
            crate::request::PathParameters::new(),
        )
    }

    #[tokio::test]
    async fn repeated_next_link_stops_the_walk() {
        let adapter = FakeAdapter::default()
            .respond(200, r#"{"value": [{"id": "a"}], "@odata.nextLink": "https://graph.microsoft.com/v1.0/deviceManagement/managedDevices?$skiptoken=p2"}"#)
            .respond(200, r#"{"value": [{"id": "b"}], "@odata.nextLink": "https://graph.microsoft.com/v1.0/deviceManagement/managedDevices?$skiptoken=p2"}"#);

        let err = PageIterator::<Item>::new(&adapter, first_page())
            .collect_all()
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidRequest { .. }));
        assert!(err.to_string().contains("skiptoken=p2"));
        assert_eq!(adapter.seen().len(), 2);
    }

    #[tokio::test]
    async fn next_link_cycle_is_detected() {
        let adapter = FakeAdapter::default()
            .respond(200, r#"{"value": [], "@odata.nextLink": "https://graph.microsoft.com/v1.0/x?$skiptoken=1"}"#)
            .respond(200, r#"{"value": [], "@odata.nextLink": "https://graph.microsoft.com/v1.0/x?$skiptoken=2"}"#)
            .respond(200, r#"{"value": [], "@odata.nextLink": "https://graph.microsoft.com/v1.0/x?$skiptoken=1"}"#);

        let mut pages = PageIterator::<Item>::new(&adapter, first_page());
        assert!(pages.next_page().await.unwrap().is_some());
        assert!(pages.next_page().await.unwrap().is_some());
        assert!(pages.next_page().await.is_err());
        assert!(pages.next_page().await.unwrap().is_none());
    }
}
