//! OAuth2 client-credentials authentication for Microsoft identity platform.
//!
//! Acquires bearer tokens from `{authority}/{tenant_id}/oauth2/v2.0/token`
//! using the client_credentials grant. The token is cached in
//! `TokenProvider` and refreshed on demand. `GraphClient` reads the cached
//! token via `token()` and calls `refresh_token()` when it is absent or stale.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, Result};

/// Public-cloud authority host.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// `.default` scope for application permissions on Microsoft Graph.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Token requests are small; they should never take long.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Safety buffer subtracted from `expires_in` so a token is refreshed
/// before it can expire in flight.
const EXPIRY_BUFFER_SECS: u64 = 60;

/// Form body sent to the token endpoint.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    client_id: &'a str,
    scope: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

/// The parts of the token response we use. Extra fields such as
/// `ext_expires_in` are ignored.
#[derive(Deserialize)]
pub struct TokenResponse {
    /// Bearer token sent in the `Authorization` header.
    pub access_token: String,
    /// Always `Bearer` for this grant.
    pub token_type: String,
    /// Lifetime in seconds from the moment the token was issued.
    pub expires_in: u64,
}

/// Manages OAuth2 token acquisition and caching.
///
/// Invariants:
/// - `response` is `None` until the first successful `refresh_token()` call
///   (or was cleared by `invalidate()`).
/// - `acquired_at` is always `Some` when `response` is `Some`.
/// - `token()` returns `None` once `expires_in - 60s` has elapsed.
pub struct TokenProvider {
    client: reqwest::Client,
    authority: String,
    scope: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    response: Option<TokenResponse>,
    acquired_at: Option<Instant>,
}

impl TokenProvider {
    /// Creates a provider for the given app registration. No token is
    /// requested until `refresh_token()` is called.
    ///
    /// Fails with `GraphError::Network` if the HTTP client cannot be built.
    pub fn new(tenant_id: &str, client_id: &str, client_secret: &str, scope: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .build()
            .map_err(GraphError::Network)?;
        Ok(TokenProvider {
            client,
            authority: DEFAULT_AUTHORITY.to_string(),
            scope: scope.to_string(),
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            response: None,
            acquired_at: None,
        })
    }

    /// Points token requests at a different authority host (sovereign
    /// clouds, or a mock server in tests).
    pub fn with_authority(mut self, authority: &str) -> Self {
        self.authority = authority.trim_end_matches('/').to_string();
        self
    }

    /// Creates a provider with a pre-set token that never calls the token
    /// endpoint until it expires or is invalidated. Treated as freshly
    /// acquired with a one hour lifetime.
    pub fn with_token(token: &str) -> Result<Self> {
        let mut tp = TokenProvider::new("", "", "", "")?;
        tp.response = Some(TokenResponse {
            access_token: token.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        });
        tp.acquired_at = Some(Instant::now());
        Ok(tp)
    }

    fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority, self.tenant_id)
    }

    /// Fetches a new token and caches it.
    ///
    /// The body is read as text before the status check so that the AADSTS
    /// diagnostics survive into the error.
    pub async fn refresh_token(&mut self) -> Result<()> {
        let body = TokenRequest {
            client_id: &self.client_id,
            scope: &self.scope,
            client_secret: &self.client_secret,
            grant_type: "client_credentials",
        };

        let url = self.token_url();
        debug!(tenant = %self.tenant_id, client_id = %self.client_id, "requesting access token");

        let response = self
            .client
            .post(&url)
            .form(&body)
            .send()
            .await
            .map_err(|e| GraphError::Auth {
                message: format!("token request to {url} failed"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| GraphError::Auth {
            message: "failed to read token response".to_string(),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(GraphError::Auth {
                message: format!("token request failed ({status}): {text}"),
                source: None,
            });
        }

        let resp: TokenResponse = serde_json::from_str(&text).map_err(|e| GraphError::Auth {
            message: "failed to parse token response".to_string(),
            source: Some(Box::new(e)),
        })?;
        debug!(expires_in = resp.expires_in, "access token acquired");

        self.acquired_at = Some(Instant::now());
        self.response = Some(resp);
        Ok(())
    }

    /// Drops the cached token so the next `token()` call returns `None`.
    pub fn invalidate(&mut self) {
        self.response = None;
        self.acquired_at = None;
    }

    fn is_expired(&self) -> bool {
        match (&self.response, self.acquired_at) {
            (Some(resp), Some(acquired)) => {
                let lifetime = resp.expires_in.saturating_sub(EXPIRY_BUFFER_SECS);
                acquired.elapsed().as_secs() >= lifetime
            }
            _ => false,
        }
    }

    /// Returns the cached access token, or `None` if there is none or it
    /// is within 60 seconds of expiry.
    pub fn token(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.response.as_ref().map(|r| r.access_token.as_str())
    }
}
