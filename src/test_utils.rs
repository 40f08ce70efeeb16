//! Test doubles for the transport and clock seams
//!
//! [`MockTransport`] answers from a table of canned responses and records
//! every request it sees; [`ManualClock`] only moves when told to.

#![cfg(test)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Method;
use serde_json::{Value, json};

use crate::cache::Clock;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{ApiError, Result};

/// Base URL used by client tests.
pub const BASE_URL: &str = "https://members-ng.iracing.com";

/// Canned outcome for a route.
#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(Method, String), Reply>,
    requests: Vec<HttpRequest>,
}

/// In-memory [`Transport`] with canned responses.
///
/// Routes are keyed by method plus either a path (`/data/member/info`) or an
/// absolute URL without query (`https://x/y`). Unmatched requests get a 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method route` with `response`, replacing any previous answer.
    pub fn on(&self, method: Method, route: &str, response: HttpResponse) -> &Self {
        self.state.lock().unwrap().routes.insert((method, route.to_string()), Reply::Respond(response));
        self
    }

    /// Fail `method route` at the transport level.
    pub fn fail(&self, method: Method, route: &str, reason: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, route.to_string()), Reply::Fail(reason.to_string()));
        self
    }

    /// Answer the login endpoint with a successful login.
    pub fn accept_login(&self, authcode: &str, sso: &str, cust_id: i64) -> &Self {
        self.on(Method::POST, "/auth", HttpResponse::json(login_body(authcode, sso, cust_id)))
    }

    /// Answer a data path with a presigned link descriptor to `link`.
    pub fn link(&self, route: &str, link: &str, expires: DateTime<Utc>) -> &Self {
        self.on(Method::GET, route, HttpResponse::json(link_body(link, expires)))
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests that hit `method route`.
    pub fn count(&self, method: Method, route: &str) -> usize {
        self.requests().iter().filter(|r| r.method == method && matches_route(r, route)).count()
    }
}

fn matches_route(request: &HttpRequest, route: &str) -> bool {
    if route.starts_with('/') {
        return request.url.path() == route;
    }
    let mut without_query = request.url.clone();
    without_query.set_query(None);
    without_query.as_str() == route
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let reply = state
            .routes
            .iter()
            .find(|((method, route), _)| *method == request.method && matches_route(&request, route))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(reason)) => Err(ApiError::transport_failed(reason)),
            None => Ok(HttpResponse::new(404, Some("text/plain"), "no mock route")),
        }
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Fixed start instant for clock-driven tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

/// Body of a successful login.
pub fn login_body(authcode: &str, sso: &str, cust_id: i64) -> String {
    json!({
        "authcode": authcode,
        "autoLoginSeries": null,
        "autoLoginToken": null,
        "custId": cust_id,
        "email": "a@b.com",
        "ssoCookieDomain": ".iracing.com",
        "ssoCookieName": "irsso_membersv2",
        "ssoCookiePath": "/",
        "ssoCookieValue": sso,
    })
    .to_string()
}

/// Body of a presigned link descriptor.
pub fn link_body(link: &str, expires: DateTime<Utc>) -> String {
    json!({ "link": link, "expires": expires.to_rfc3339() }).to_string()
}

/// JSON response with the given body value.
pub fn json_response(body: Value) -> HttpResponse {
    HttpResponse::json(body.to_string())
}

/// Install a test subscriber once; output is captured per test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
