//! Authenticated data client
//!
//! [`DataClient`] owns the session cookies, the presigned-link cache and the
//! transport. Requests follow three steps:
//!
//! 1. Authenticate once (lazily, on the first data call)
//! 2. GET the resource with the session cookies attached
//! 3. For linked endpoints, follow the presigned link unauthenticated and
//!    cache the result until shortly before the link expires
//!
//! No step is retried. Every failure is returned to the caller as an
//! [`ApiError`](crate::ApiError).

mod builder;

pub use builder::DataClientBuilder;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::Endpoint;
use crate::auth::{Credentials, LoginResponse, SessionCookies};
use crate::cache::{Clock, LinkCache};
use crate::config::ClientConfig;
use crate::payload::{LinkedResponse, Payload, PresignedLink, ResponseKind};
use crate::query::QueryParams;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{ApiError, Result};

/// Client for the iRacing member data service.
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Session and cache
/// state are guarded by async mutexes, and the lazy login holds the session
/// lock for the whole exchange so concurrent first calls log in only once.
/// Concurrent fetches of the same uncached link are not de-duplicated.
///
/// # Examples
///
/// ```rust,no_run
/// use pitwall_data::{Credentials, DataClient, QueryParams};
///
/// #[tokio::main]
/// async fn main() -> pitwall_data::Result<()> {
///     let client = DataClient::new(Credentials::new("driver@example.com", "secret"))?;
///
///     let categories = client.constants().categories().await?;
///     let member = client
///         .member()
///         .get(QueryParams::new().with("cust_ids", vec![123456u32]))
///         .await?;
///     println!("{:?} {:?}", categories, member);
///     Ok(())
/// }
/// ```
pub struct DataClient {
    /// Effective configuration
    config: ClientConfig,

    /// Base URL relative targets are joined to
    base_url: Url,

    /// Login endpoint
    auth_url: Url,

    /// Credentials for the lazy login
    credentials: Credentials,

    /// Network layer
    transport: Arc<dyn Transport>,

    /// Time source for link expiry
    clock: Arc<dyn Clock>,

    /// Session cookies, set after the first successful login
    session: Mutex<Option<SessionCookies>>,

    /// Resolved presigned links
    cache: Mutex<LinkCache>,
}

impl DataClient {
    /// Create a client with default configuration and the reqwest transport.
    ///
    /// No network I/O happens until the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be initialized.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom configuration, transport or clock.
    pub fn builder(credentials: Credentials) -> DataClientBuilder {
        DataClientBuilder::new(credentials)
    }

    /// Effective configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform the login exchange and store the resulting session cookies.
    ///
    /// Calling this again simply logs in again and replaces the session.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] if the service rejects the login
    /// - [`ApiError::Transport`] if the exchange cannot be completed
    /// - [`ApiError::Parse`] if the login response is not JSON
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<()> {
        let mut session = self.session.lock().await;
        *session = Some(self.login(credentials).await?);
        Ok(())
    }

    /// Whether a session has been established.
    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Customer id of the authenticated member, once logged in.
    pub async fn customer_id(&self) -> Option<i64> {
        self.session.lock().await.as_ref().and_then(SessionCookies::cust_id)
    }

    /// GET a resource and return its payload as-is.
    ///
    /// `target` is either absolute or relative to the configured base URL.
    /// Logs in first if no session exists yet.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Request`] for any non-success status (body is not parsed)
    /// - [`ApiError::Parse`] if a JSON-typed body is malformed
    /// - Login and transport errors
    pub async fn get(&self, target: &str, params: &QueryParams) -> Result<Payload> {
        let url = self.resolve_url(target, params)?;
        self.fetch(&url).await
    }

    /// GET a resource that answers with a presigned link and return the
    /// payload behind the link, using the link cache.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Protocol`] if the response carries no `link`
    /// - Everything [`DataClient::get`] can return, for either hop
    pub async fn get_linked(&self, target: &str, params: &QueryParams) -> Result<Payload> {
        let url = self.resolve_url(target, params)?;
        self.fetch_with_kind(&url, ResponseKind::Linked).await
    }

    /// Call a described endpoint after validating parameters against its schema.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without any network I/O if the
    /// parameters do not match the endpoint, otherwise as [`DataClient::get`]
    /// or [`DataClient::get_linked`] depending on the endpoint's response kind.
    pub async fn call(&self, endpoint: &Endpoint, params: QueryParams) -> Result<Payload> {
        endpoint.validate(&params)?;
        let url = self.resolve_url(endpoint.path, &params)?;
        debug!(endpoint = %endpoint.id(), "Calling endpoint");
        self.fetch_with_kind(&url, endpoint.response).await
    }

    /// [`DataClient::call`], decoded into a typed response.
    ///
    /// # Errors
    ///
    /// As [`DataClient::call`], plus [`ApiError::Validation`] if the payload
    /// does not match `T`.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: QueryParams,
    ) -> Result<T> {
        self.call(endpoint, params).await?.deserialize()
    }

    /// [`DataClient::get`], decoded into a typed response.
    ///
    /// # Errors
    ///
    /// As [`DataClient::get`], plus [`ApiError::Validation`] if the payload
    /// does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        target: &str,
        params: &QueryParams,
    ) -> Result<T> {
        self.get(target, params).await?.deserialize()
    }

    /// Resolve a classified first-hop response into its payload.
    ///
    /// Direct responses pass through. Links are fetched without credentials
    /// and cached under `cache_key` until `expires` minus the configured
    /// margin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] for an unusable link URL, or the errors
    /// of the link fetch itself.
    pub async fn resolve(&self, cache_key: &str, response: LinkedResponse) -> Result<Payload> {
        match response {
            LinkedResponse::Direct(payload) => Ok(payload),
            LinkedResponse::Link(link) => self.follow_link(cache_key, link).await,
        }
    }

    /// Number of cached links, expired or not.
    pub async fn cached_links(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Drop expired link entries, returning how many were removed.
    pub async fn purge_expired_links(&self) -> usize {
        let now = self.clock.now();
        self.cache.lock().await.purge_expired(now)
    }

    /// Drop every cached link.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Absolute request URL for a target and its parameters.
    ///
    /// This is also the cache key of linked responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the target cannot be joined to the base URL.
    pub fn resolve_url(&self, target: &str, params: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.join(target)?;
        params.apply_to(&mut url);
        Ok(url)
    }

    async fn fetch_with_kind(&self, url: &Url, kind: ResponseKind) -> Result<Payload> {
        let key = url.as_str();

        if kind == ResponseKind::Linked {
            let now = self.clock.now();
            if let Some(payload) = self.cache.lock().await.get(key, now) {
                debug!(url = %key, "Using cached presigned link payload");
                return Ok(payload.clone());
            }
        }

        let first_hop = self.fetch(url).await?;
        let classified = LinkedResponse::classify(first_hop, kind)?;
        self.resolve(key, classified).await
    }

    async fn follow_link(&self, cache_key: &str, link: PresignedLink) -> Result<Payload> {
        let url = Url::parse(&link.link)
            .map_err(|e| ApiError::protocol(format!("invalid presigned link '{}': {}", link.link, e)))?;

        debug!(link = %url, "Following presigned link");
        let response = self.transport.send(HttpRequest::get(url.clone())).await?;
        let payload = decode(&url, response)?;

        match link.cache_until(self.config.link_expiry_margin()) {
            Some(until) => {
                debug!(url = %cache_key, until = %until, "Caching presigned link payload");
                self.cache.lock().await.insert(cache_key, payload.clone(), until);
            }
            None => warn!(url = %cache_key, "Presigned link has no usable expiry, not caching"),
        }

        Ok(payload)
    }

    async fn fetch(&self, url: &Url) -> Result<Payload> {
        let cookie = self.session_cookie().await?;

        debug!(url = %url, "GET");
        let request = HttpRequest::get(url.clone()).header("Cookie", cookie);
        let response = self.transport.send(request).await?;
        decode(url, response)
    }

    /// Cookie header of the current session, logging in first when needed.
    async fn session_cookie(&self) -> Result<String> {
        let mut session = self.session.lock().await;
        if let Some(cookies) = session.as_ref() {
            return Ok(cookies.header_value());
        }

        let cookies = self.login(&self.credentials).await?;
        let header = cookies.header_value();
        *session = Some(cookies);
        Ok(header)
    }

    async fn login(&self, credentials: &Credentials) -> Result<SessionCookies> {
        info!(email = %credentials.email, "Authenticating with member data service");

        let request = HttpRequest::post_json(self.auth_url.clone(), credentials.login_body()?);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "Login rejected");
            return Err(ApiError::authentication_failed(response.status, response.body));
        }

        let login: LoginResponse = serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
            context: "Login response".to_string(),
            details: e.to_string(),
        })?;
        let cookies = SessionCookies::from_login(&login, credentials, response.status, &response.body)?;

        info!(cust_id = ?cookies.cust_id(), "Authenticated");
        Ok(cookies)
    }
}

/// Turn a raw response into a payload, rejecting non-success statuses
/// before the body is looked at.
fn decode(url: &Url, response: HttpResponse) -> Result<Payload> {
    if !response.is_success() {
        debug!(url = %url, status = response.status, "Request failed");
        return Err(ApiError::request_failed(
            url.as_str(),
            response.status,
            response.status_text,
            response.body,
        ));
    }
    Payload::from_body(response.content_type.as_deref(), response.body)
}

impl std::fmt::Debug for DataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
