//! Typed error hierarchy for the graph-dm crate.
//!
//! Every variant maps to a real system boundary:
//! - `Auth` covers the Microsoft identity platform token endpoint.
//! - `Api` and `Throttled` cover non-success responses from Microsoft Graph.
//!   `Api` keeps the raw body alongside the parsed OData error so nothing
//!   the service said is lost.
//! - `EmptyResponse` is a 2xx that carried no body where one was required.
//! - `InvalidRequest` is raised before anything goes on the wire (unfilled
//!   URL template placeholder, unparsable raw URL).
//! - `Config` covers loading and validating the TOML configuration.
//! - `Parse` and `Network` wrap `serde_json` and `reqwest` failures.

use std::time::Duration;

use reqwest::StatusCode;

use crate::odata::MainError;

/// Unified error type for all graph-dm library operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Authentication failure at the token endpoint.
    ///
    /// Non-2xx token responses put the AADSTS error body in `message`.
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable description, including status and body when available.
        message: String,
        /// The underlying transport or parse error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Microsoft Graph returned a non-success HTTP status code.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by Graph.
        status: StatusCode,
        /// The parsed `{"error": {...}}` payload, when the body had that shape.
        error: Option<MainError>,
        /// The raw response body text.
        body: String,
    },

    /// Graph kept answering 429 after the client exhausted its retries.
    #[error("request throttled (retry after {retry_after:?}): {body}")]
    Throttled {
        /// The last `Retry-After` value the service sent, if any.
        retry_after: Option<Duration>,
        /// The raw response body text.
        body: String,
    },

    /// A 2xx response had no body, but the operation expects an entity.
    #[error("empty response body with status {status}")]
    EmptyResponse {
        /// The (successful) status code that came back without content.
        status: StatusCode,
    },

    /// The request could not be built: missing path parameter, bad raw URL.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request description.
        message: String,
    },

    /// Configuration could not be read or is incomplete.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
        /// The underlying I/O or TOML error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization or deserialization failed.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A network-level failure occurred (DNS, TCP, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GraphError {
    /// Returns the HTTP status for errors that came from a Graph response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GraphError::Api { status, .. } | GraphError::EmptyResponse { status } => Some(*status),
            GraphError::Throttled { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            _ => None,
        }
    }

    /// Returns the OData error code (e.g. `"ResourceNotFound"`), if Graph sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            GraphError::Api {
                error: Some(error), ..
            } => Some(error.code.as_str()),
            _ => None,
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        GraphError::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn auth_error_displays_message() {
        let err = GraphError::Auth {
            message: "token request failed (401): AADSTS7000215".to_string(),
            source: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("AADSTS7000215"));
        assert!(msg.contains("authentication failed"));
    }

    #[test]
    fn auth_error_with_source_chains_correctly() {
        let json_err: serde_json::Error = serde_json::from_str::<String>("not-json").unwrap_err();
        let err = GraphError::Auth {
            message: "failed to parse token response".to_string(),
            source: Some(Box::new(json_err)),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn api_error_preserves_status_code_and_body() {
        let err = GraphError::Api {
            status: StatusCode::NOT_FOUND,
            error: Some(MainError {
                code: "ResourceNotFound".to_string(),
                message: "Resource not found".to_string(),
                inner_error: None,
            }),
            body: r#"{"error":{"code":"ResourceNotFound","message":"Resource not found"}}"#
                .to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"), "display should include status code");
        assert!(msg.contains("Resource not found"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.code(), Some("ResourceNotFound"));
    }

    #[test]
    fn api_error_without_odata_payload_has_no_code() {
        let err = GraphError::Api {
            status: StatusCode::BAD_GATEWAY,
            error: None,
            body: "<html>bad gateway</html>".to_string(),
        };
        assert_eq!(err.code(), None);
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn throttled_error_reports_429() {
        let err = GraphError::Throttled {
            retry_after: Some(Duration::from_secs(30)),
            body: String::new(),
        };
        assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn parse_error_wraps_serde_json() {
        let json_err: serde_json::Error =
            serde_json::from_str::<String>("{{bad json}}").unwrap_err();
        let err = GraphError::Parse(json_err);
        assert!(err.to_string().contains("failed to parse response"));
        assert!(err.source().is_some());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphError>();
    }
}
