//! Login exchange and session cookies
//!
//! The member data service authenticates with two cookies derived from a
//! single login response:
//!
//! - `irsso_membersv2`: the SSO session value, verbatim
//! - `authtoken_members`: a percent-encoded JSON blob
//!   `{"authtoken":{"authcode":...,"email":...}}`

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ApiError, Result};

/// Name of the SSO session cookie.
pub const SSO_COOKIE: &str = "irsso_membersv2";

/// Name of the composite auth-token cookie.
pub const AUTH_TOKEN_COOKIE: &str = "authtoken_members";

const ENV_EMAIL: &str = "IRACING_EMAIL";
const ENV_PASSWORD: &str = "IRACING_PASSWORD";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Account identity and secret used for the login exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Read credentials from `IRACING_EMAIL` and `IRACING_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if either variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        let email = read_env(ENV_EMAIL)?;
        let password = read_env(ENV_PASSWORD)?;
        Ok(Self { email, password })
    }

    /// JSON body for the login request.
    ///
    /// Field order is fixed: `{"email":...,"password":...}`.
    pub(crate) fn login_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ApiError::Parse {
            context: "Login request serialization".to_string(),
            details: e.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::config(format!("environment variable {} is not set", name))),
    }
}

/// Body of a login response.
///
/// Only the fields needed to derive cookies are modelled; the rest is kept in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// Auth code, embedded verbatim in the auth-token cookie
    #[serde(default)]
    pub authcode: Value,
    /// SSO session value (absent when the login was not accepted)
    #[serde(rename = "ssoCookieValue")]
    pub sso_cookie_value: Option<String>,
    /// Customer identifier of the authenticated member
    #[serde(rename = "custId")]
    pub cust_id: Option<i64>,
    /// Email echoed back by the service
    pub email: Option<String>,
    /// Upstream message, usually present on rejected logins
    pub message: Option<String>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Session credential: the cookie pair obtained from one login exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookies {
    sso: String,
    auth_token: String,
    cust_id: Option<i64>,
}

impl SessionCookies {
    /// Derive session cookies from a login response.
    ///
    /// `status` and `raw_body` are only used to describe a rejected login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] if the response carries no SSO
    /// cookie value or no auth code.
    pub fn from_login(
        response: &LoginResponse,
        credentials: &Credentials,
        status: u16,
        raw_body: &str,
    ) -> Result<Self> {
        let sso = match response.sso_cookie_value.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                let body = response.message.clone().unwrap_or_else(|| raw_body.to_string());
                return Err(ApiError::authentication_failed(status, body));
            }
        };

        if response.authcode.is_null() {
            return Err(ApiError::authentication_failed(status, raw_body));
        }

        let email = response.email.as_deref().unwrap_or(&credentials.email);
        let blob = json!({ "authtoken": { "authcode": response.authcode, "email": email } });
        let auth_token = utf8_percent_encode(&blob.to_string(), URI_COMPONENT).to_string();

        Ok(Self { sso, auth_token, cust_id: response.cust_id })
    }

    /// Value of the `Cookie` header for authenticated requests.
    pub fn header_value(&self) -> String {
        format!("{}={}; {}={}", SSO_COOKIE, self.sso, AUTH_TOKEN_COOKIE, self.auth_token)
    }

    /// Customer identifier returned by the login, if any.
    pub fn cust_id(&self) -> Option<i64> {
        self.cust_id
    }
}

impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookies").field("cust_id", &self.cust_id).finish_non_exhaustive()
    }
}
