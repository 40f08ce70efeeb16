//! Error types for data API operations.
//!
//! Every failure in this crate surfaces as an [`ApiError`]. Variants are kept
//! distinguishable so callers can tell "the network worked but the payload was
//! unexpected" apart from "the network call itself failed".
//!
//! ## Error Categories
//!
//! - **Authentication Errors**: The login exchange was rejected
//! - **Request Errors**: A data call returned a non-success HTTP status
//! - **Protocol Errors**: The upstream broke the presigned-link convention
//! - **Validation Errors**: Parameters or payloads did not match their schema
//! - **Transport Errors**: The HTTP exchange itself failed
//!
//! ## Recovery
//!
//! Nothing in this crate retries on its own. Errors report whether a retry
//! could help, and what to check:
//!
//! ```rust
//! use pitwall_data::ApiError;
//!
//! let error = ApiError::transport_failed("connection reset");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type alias for data API operations.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Main error type for data API operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("Request to {url} failed: {status} {status_text}")]
    Request { url: String, status: u16, status_text: String, body: String },

    #[error("Protocol error: {reason}")]
    Protocol { reason: String },

    #[error("Validation failed in {context}: {details}")]
    Validation { context: String, details: String },

    #[error("HTTP transport error: {reason}")]
    Transport {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl ApiError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Request { status, .. } => *status == 429 || *status >= 500,
            ApiError::Authentication { status, .. } => *status >= 500,
            ApiError::Protocol { .. } => false,
            ApiError::Validation { .. } => false,
            ApiError::Parse { .. } => false,
            ApiError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ApiError::Authentication { .. } => vec![
                "Check the account email and password",
                "Log in once through the iRacing website to clear pending verification",
                "Confirm the account has legacy authentication enabled",
            ],
            ApiError::Request { .. } => vec![
                "Check the request parameters",
                "Verify the account can access this resource",
                "Wait before retrying if the service reported rate limiting",
            ],
            ApiError::Protocol { .. } => vec![
                "Check whether the endpoint returns inline data instead of a link",
                "Update the endpoint index to the current upstream behavior",
            ],
            ApiError::Validation { .. } => vec![
                "Compare parameters against the endpoint's parameter schema",
                "Check the target type matches the upstream response shape",
            ],
            ApiError::Transport { .. } => vec![
                "Check network connectivity",
                "Verify the base URL is reachable",
                "Increase the configured request timeout",
            ],
            ApiError::Parse { .. } => vec![
                "Verify the upstream returned well-formed JSON",
                "Inspect the raw response body",
            ],
            ApiError::Config { .. } => vec![
                "Check environment variables and configuration values",
                "Use an absolute http(s) base URL",
            ],
        }
    }

    /// The HTTP status attached to this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. } | ApiError::Request { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Helper constructor for login failures.
    pub fn authentication_failed(status: u16, body: impl Into<String>) -> Self {
        ApiError::Authentication { status, body: body.into() }
    }

    /// Helper constructor for non-success data responses.
    pub fn request_failed(
        url: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ApiError::Request {
            url: url.into(),
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Helper constructor for protocol violations.
    pub fn protocol(reason: impl Into<String>) -> Self {
        ApiError::Protocol { reason: reason.into() }
    }

    /// Helper constructor for schema validation errors.
    pub fn validation(context: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::Validation { context: context.into(), details: details.into() }
    }

    /// Helper constructor for transport errors.
    pub fn transport_failed(reason: impl Into<String>) -> Self {
        ApiError::Transport { reason: reason.into(), source: None }
    }

    /// Helper constructor for transport errors with source.
    pub fn transport_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        ApiError::Transport { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        ApiError::Config { reason: reason.into() }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            "request could not be completed".to_string()
        };
        ApiError::Transport { reason, source: Some(Box::new(err)) }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config { reason: format!("invalid URL: {}", err) }
    }
}
