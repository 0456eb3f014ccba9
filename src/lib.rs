//! Async Rust client library for the Microsoft Graph device-management API.
//!
//! Every call follows the same path:
//!
//! ```text
//! request builder ──► RequestInformation ──► RequestAdapter::execute ──► typed model
//!                                                                   └──► GraphError
//! ```
//!
//! Builders are cheap, borrow the adapter, and mirror the Graph URL tree.
//! Each operation has a `to_*_request` variant that returns the
//! [`RequestInformation`](request::RequestInformation) without sending it.
//!
//! # Modules
//!
//! - [`adapter`]: `RequestAdapter` trait and typed send helpers.
//! - [`assignment`]: Polymorphic assignment targets.
//! - [`auth`]: OAuth2 client credentials token provider with expiry tracking.
//! - [`builder`]: Generic collection and item request builders.
//! - [`client`]: `GraphClient`, the reqwest-backed adapter with 401 and throttling retry.
//! - [`compliance_policies`]: Compliance policies, scheduled actions, device statuses.
//! - [`config`]: TOML configuration with environment overrides.
//! - [`device_configurations`]: Configuration profiles and OMA-URI settings.
//! - [`device_management`]: The `deviceManagement` singleton and root builder.
//! - [`discriminator`]: `@odata.type` handling for polymorphic payloads.
//! - [`error`]: Typed error hierarchy (`GraphError`).
//! - [`managed_devices`]: Managed devices and their remote actions.
//! - [`notification_templates`]: Compliance notification templates.
//! - [`odata`]: Collection pages, OData error payloads, paging.
//! - [`request`]: `RequestInformation`, query options, URL expansion.
//!
//! # Quick Start
//!
//! ```ignore
//! use graph_dm::auth::TokenProvider;
//! use graph_dm::client::GraphClient;
//! use graph_dm::request::{QueryParameters, RequestConfiguration};
//!
//! let tp = TokenProvider::new("tenant", "client_id", "secret", graph_dm::auth::GRAPH_DEFAULT_SCOPE)?;
//! let client = GraphClient::new(tp, None)?;
//!
//! let config = RequestConfiguration::with_query(QueryParameters {
//!     filter: Some("operatingSystem eq 'Windows'".into()),
//!     ..Default::default()
//! });
//! let devices = client.device_management().managed_devices().list_all(Some(&config)).await?;
//! client.device_management().managed_devices().by_id("device-id").sync_device(None).await?;
//! ```

#![warn(missing_docs)]

pub mod adapter;
pub mod assignment;
pub mod auth;
pub mod builder;
pub mod client;
pub mod compliance_policies;
pub mod config;
pub mod device_configurations;
pub mod device_management;
pub mod discriminator;
pub mod error;
pub mod managed_devices;
pub mod notification_templates;
pub mod odata;
pub mod request;

pub use client::GraphClient;
pub use error::{GraphError, Result};
