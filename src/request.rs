//! Request descriptions handed from builders to the request adapter.
//!
//! A [`RequestInformation`] is a complete, transport-independent description
//! of one Graph call: method, relative URL template, path parameters, query
//! pairs, headers and an optional body. Builders produce them; a
//! [`RequestAdapter`](crate::adapter::RequestAdapter) turns them into HTTP.
//!
//! ## URL templates
//!
//! Templates are relative to the adapter's base URL and use `{name}`
//! placeholders, one or more per path segment:
//!
//! ```text
//! deviceManagement/managedDevices/{managedDevice-id}/retire
//! deviceManagement/verifyWindowsEnrollmentAutoDiscovery(domainName='{domainName}')
//! ```
//!
//! Each expanded segment is percent-encoded as a single path segment. A
//! placeholder wrapped in single quotes is an OData string literal, so any
//! quote in the value is doubled.

use std::collections::BTreeMap;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;

use crate::error::{GraphError, Result};

/// Path parameter name → value.
pub type PathParameters = BTreeMap<String, String>;

/// OData system query options.
///
/// Unset options are never sent. Multi-valued options (`$select`,
/// `$expand`, `$orderby`) are comma-joined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParameters {
    /// `$select`: properties to return.
    pub select: Vec<String>,
    /// `$expand`: navigation properties to inline.
    pub expand: Vec<String>,
    /// `$filter` expression, e.g. `operatingSystem eq 'Windows'`.
    pub filter: Option<String>,
    /// `$orderby`: properties, each optionally followed by `desc`.
    pub orderby: Vec<String>,
    /// `$search` expression; Graph wants it double-quoted.
    pub search: Option<String>,
    /// `$top`: page size.
    pub top: Option<u32>,
    /// `$skip`: items to skip.
    pub skip: Option<u32>,
    /// `$count`: ask for `@odata.count` alongside the page.
    pub count: Option<bool>,
}

impl QueryParameters {
    /// Returns the options as `(name, value)` pairs in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.select.is_empty() {
            pairs.push(("$select", self.select.join(",")));
        }
        if !self.expand.is_empty() {
            pairs.push(("$expand", self.expand.join(",")));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        if !self.orderby.is_empty() {
            pairs.push(("$orderby", self.orderby.join(",")));
        }
        if let Some(search) = &self.search {
            pairs.push(("$search", search.clone()));
        }
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("$count", count.to_string()));
        }
        pairs
    }
}

/// Per-call options accepted by every builder operation.
#[derive(Debug, Clone, Default)]
pub struct RequestConfiguration {
    /// OData query options to append to the URL.
    pub query: QueryParameters,
    /// Extra request headers (e.g. `ConsistencyLevel: eventual`).
    pub headers: HeaderMap,
}

impl RequestConfiguration {
    /// Shorthand for a configuration that only sets query options.
    pub fn with_query(query: QueryParameters) -> Self {
        RequestConfiguration {
            query,
            headers: HeaderMap::new(),
        }
    }
}

/// A transport-independent description of a single Graph request.
#[derive(Debug, Clone)]
pub struct RequestInformation {
    method: Method,
    url_template: String,
    path_parameters: PathParameters,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    content: Option<Bytes>,
    raw_url: Option<String>,
}

impl RequestInformation {
    /// Creates a request on a relative URL template.
    pub fn new(method: Method, url_template: impl Into<String>, path_parameters: PathParameters) -> Self {
        RequestInformation {
            method,
            url_template: url_template.into(),
            path_parameters,
            query: Vec::new(),
            headers: HeaderMap::new(),
            content: None,
            raw_url: None,
        }
    }

    /// Creates a request for an absolute URL, such as an `@odata.nextLink`.
    /// The URL is used verbatim; templates and query pairs are ignored.
    pub fn from_raw_url(method: Method, url: &str) -> Self {
        RequestInformation {
            raw_url: Some(url.to_string()),
            ..RequestInformation::new(method, String::new(), PathParameters::new())
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Relative URL template; empty for raw-URL requests.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Values for the template placeholders.
    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_parameters
    }

    /// Mutable access to the placeholder values.
    pub fn path_parameters_mut(&mut self) -> &mut PathParameters {
        &mut self.path_parameters
    }

    /// The absolute URL set by [`from_raw_url`](Self::from_raw_url), if any.
    pub fn raw_url(&self) -> Option<&str> {
        self.raw_url.as_deref()
    }

    /// Query pairs in the order they will be sent.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Serialized body, if any.
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    /// Appends one query pair.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Sets a header, replacing any existing value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Serializes `body` as the JSON request content.
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<()> {
        let bytes = serde_json::to_vec(body)?;
        self.content = Some(Bytes::from(bytes));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(())
    }

    /// Applies caller-supplied query options and headers.
    pub fn configure(&mut self, config: Option<&RequestConfiguration>) {
        let Some(config) = config else {
            return;
        };
        for (name, value) in config.query.pairs() {
            self.add_query(name, value);
        }
        for (name, value) in &config.headers {
            self.headers.append(name.clone(), value.clone());
        }
    }

    /// Resolves the full request URL against `base`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        if let Some(raw) = &self.raw_url {
            return Url::parse(raw)
                .map_err(|e| GraphError::invalid_request(format!("invalid URL `{raw}`: {e}")));
        }

        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                GraphError::invalid_request(format!("base URL `{base}` cannot carry a path"))
            })?;
            segments.pop_if_empty();
            for segment in self.url_template.split('/').filter(|s| !s.is_empty()) {
                segments.push(&expand_segment(segment, &self.path_parameters)?);
            }
        }

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

/// Substitutes every `{name}` placeholder in one path segment.
fn expand_segment(segment: &str, params: &PathParameters) -> Result<String> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            return Err(GraphError::invalid_request(format!(
                "unterminated placeholder in `{segment}`"
            )));
        };
        let name = &rest[start + 1..start + len];
        let value = params
            .get(name)
            .ok_or_else(|| GraphError::invalid_request(format!("missing path parameter `{name}`")))?;

        let prefix = &rest[..start];
        out.push_str(prefix);
        if prefix.ends_with('\'') {
            out.push_str(&value.replace('\'', "''"));
        } else {
            out.push_str(value);
        }
        rest = &rest[start + len + 1..];
    }

    out.push_str(rest);

    // An empty, "." or ".." segment would be collapsed or resolved by the
    // URL parser and change which resource is addressed.
    if matches!(out.as_str(), "" | "." | "..") {
        return Err(GraphError::invalid_request(format!(
            "path segment `{segment}` expands to `{out}`"
        )));
    }
    Ok(out)
}
