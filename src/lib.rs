//! Type-safe async client for the iRacing member data API.
//!
//! We Race Pitwall Data wraps `members-ng.iracing.com/data` behind a small,
//! explicit client: one login per client, session cookies on every call, and
//! transparent resolution of the presigned links most endpoints answer with.
//!
//! # Features
//!
//! - **Cookie Sessions**: Lazy login, cookies derived once and reused
//! - **Presigned Links**: Followed automatically and cached until shortly before they expire
//! - **Endpoint Index**: Every section and endpoint described, with parameter validation
//! - **Pluggable Transport**: reqwest by default, any [`Transport`] for tests or proxies
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pitwall_data::{Credentials, DataClient, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> pitwall_data::Result<()> {
//!     let client = DataClient::new(Credentials::from_env()?)?;
//!
//!     // Direct endpoint
//!     let categories = client.constants().categories().await?;
//!
//!     // Linked endpoint: the presigned link is followed and cached
//!     let recent = client
//!         .stats()
//!         .member_recent_races(QueryParams::new().with("cust_id", 123456))
//!         .await?;
//!
//!     println!("{:?}\n{:?}", categories, recent);
//!     Ok(())
//! }
//! ```
//!
//! Nothing is retried, rate-limited or persisted. Every failure is returned as
//! an [`ApiError`].

// Core types and error handling
pub mod auth;
pub mod cache;
pub mod config;
mod error;
pub mod payload;
pub mod query;
#[cfg(test)]
mod test_utils;

// Network layer
pub mod transport;
pub mod transports;

// Client and endpoint index
pub mod api;
pub mod client;

// Core exports
pub use auth::Credentials;
pub use cache::{Clock, SystemClock};
pub use config::ClientConfig;
pub use error::*;
pub use payload::{LinkedResponse, Payload, PresignedLink, ResponseKind};
pub use query::{QueryParams, QueryValue};

// Network exports
pub use transport::{HttpRequest, HttpResponse, Transport};
pub use transports::HttpTransport;

// Main API exports
pub use api::{Endpoint, ParamKind, ParamSpec};
pub use client::{DataClient, DataClientBuilder};
