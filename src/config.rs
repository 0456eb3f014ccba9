//! File-based configuration for the Graph client.
//!
//! ```toml
//! tenant_id = "00000000-0000-0000-0000-000000000000"
//! client_id = "11111111-1111-1111-1111-111111111111"
//! # client_secret is better supplied via GRAPH_CLIENT_SECRET
//!
//! [http]
//! request_timeout_secs = 60
//!
//! [retry]
//! max_retries = 5
//! ```
//!
//! Every key except `tenant_id` and `client_id` has a default, so an empty
//! `[http]` or `[retry]` table (or none at all) is valid.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::auth::{DEFAULT_AUTHORITY, GRAPH_DEFAULT_SCOPE, TokenProvider};
use crate::client::{ClientOptions, RetryPolicy};
use crate::error::{GraphError, Result};

/// Environment variable that overrides `client_secret` from the file. A
/// secret set with `GraphConfig::with_client_secret` overrides both.
pub const CLIENT_SECRET_ENV: &str = "GRAPH_CLIENT_SECRET";

/// Microsoft Graph v1.0 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Settings for one app registration against one Graph endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Entra ID tenant (directory) ID.
    pub tenant_id: String,
    /// Application (client) ID.
    pub client_id: String,

    /// Secret from the file. Lowest precedence.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Set programmatically or from `--secret`; never read from the file.
    #[serde(skip)]
    explicit_secret: Option<String>,

    /// Graph root including the version segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identity platform host used for token requests.
    #[serde(default = "default_authority")]
    pub authority: String,

    /// OAuth2 scope requested with the client-credentials grant.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// `[http]` table.
    #[serde(default)]
    pub http: HttpConfig,

    /// `[retry]` table.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Transport timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Retry policy for throttled and transient failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound on any single backoff delay in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

fn default_scope() -> String {
    GRAPH_DEFAULT_SCOPE.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    100
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl GraphConfig {
    /// Builds a configuration from credentials alone, with every other
    /// setting at its default.
    pub fn new(tenant_id: &str, client_id: &str) -> Self {
        GraphConfig {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: None,
            explicit_secret: None,
            base_url: default_base_url(),
            authority: default_authority(),
            scope: default_scope(),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
        }
    }

    /// Sets a secret that takes precedence over `GRAPH_CLIENT_SECRET` and
    /// the file. An empty string is ignored.
    pub fn with_client_secret(mut self, secret: &str) -> Self {
        self.explicit_secret = Some(secret.to_string()).filter(|s| !s.is_empty());
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GraphError::Config {
            message: "invalid configuration file".to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Config {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolves the client secret: the explicit one, then
    /// `GRAPH_CLIENT_SECRET`, then the file.
    pub fn client_secret(&self) -> Result<String> {
        resolve_secret(
            self.explicit_secret.as_deref(),
            std::env::var(CLIENT_SECRET_ENV).ok(),
            self.client_secret.as_deref(),
        )
    }

    /// Builds a token provider from the credentials and authority.
    pub fn token_provider(&self) -> Result<TokenProvider> {
        let secret = self.client_secret()?;
        Ok(TokenProvider::new(&self.tenant_id, &self.client_id, &secret, &self.scope)?
            .with_authority(&self.authority))
    }

    /// Converts the `[http]` and `[retry]` tables into client options.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.http.request_timeout_secs),
            retry: RetryPolicy {
                max_retries: self.retry.max_retries,
                base_delay: Duration::from_millis(self.retry.base_delay_ms),
                max_delay: Duration::from_millis(self.retry.max_delay_ms),
            },
        }
    }
}

fn resolve_secret(
    explicit: Option<&str>,
    from_env: Option<String>,
    from_file: Option<&str>,
) -> Result<String> {
    explicit
        .map(str::to_owned)
        .or_else(|| from_env.filter(|s| !s.is_empty()))
        .or_else(|| from_file.map(str::to_owned))
        .ok_or_else(|| GraphError::Config {
            message: format!("no client secret: set {CLIENT_SECRET_ENV} or client_secret"),
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = GraphConfig::from_toml_str(
            r#"
            tenant_id = "t"
            client_id = "c"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.authority, DEFAULT_AUTHORITY);
        assert_eq!(config.scope, GRAPH_DEFAULT_SCOPE);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.http.request_timeout_secs, 100);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.client_secret.is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = GraphConfig::from_toml_str(
            r#"
            tenant_id = "t"
            client_id = "c"
            base_url = "https://graph.microsoft.com/beta"

            [retry]
            max_retries = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://graph.microsoft.com/beta");
        assert_eq!(config.retry.max_retries, 7);
        assert_eq!(config.retry.base_delay_ms, 1_000);
        assert_eq!(config.retry.max_delay_ms, 30_000);
    }

    #[test]
    fn missing_tenant_is_a_config_error() {
        let err = GraphConfig::from_toml_str(r#"client_id = "c""#).unwrap_err();
        assert!(matches!(err, GraphError::Config { .. }));
    }

    #[test]
    fn client_options_convert_units() {
        let mut config = GraphConfig::new("t", "c");
        config.retry.base_delay_ms = 250;
        config.http.request_timeout_secs = 5;
        let options = config.client_options();
        assert_eq!(options.retry.base_delay, Duration::from_millis(250));
        assert_eq!(options.request_timeout, Duration::from_secs(5));
        assert_eq!(options.retry.max_retries, 3);
    }

    #[test]
    fn env_secret_wins_over_file() {
        let secret = resolve_secret(None, Some("from-env".to_string()), Some("from-file")).unwrap();
        assert_eq!(secret, "from-env");
    }

    #[test]
    fn explicit_secret_wins_over_env_and_file() {
        let secret = resolve_secret(
            Some("explicit"),
            Some("from-env".to_string()),
            Some("from-file"),
        )
        .unwrap();
        assert_eq!(secret, "explicit");
    }

    #[test]
    fn with_client_secret_beats_file_value() {
        let mut config = GraphConfig::new("t", "c");
        config.client_secret = Some("from-file".to_string());
        let config = config.with_client_secret("explicit");
        assert_eq!(config.client_secret().unwrap(), "explicit");
    }

    #[test]
    fn empty_explicit_secret_is_ignored() {
        let config = GraphConfig::new("t", "c").with_client_secret("");
        assert!(config.explicit_secret.is_none());
    }

    #[test]
    fn empty_env_secret_falls_back_to_file() {
        let secret = resolve_secret(None, Some(String::new()), Some("from-file")).unwrap();
        assert_eq!(secret, "from-file");
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = resolve_secret(None, None, None).unwrap_err();
        assert!(err.to_string().contains(CLIENT_SECRET_ENV));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GraphConfig::load(Path::new("/nonexistent/graph-dm.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
