//! Shared fixtures for end-to-end tests against a mock data service

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pitwall_data::{Clock, Credentials, DataClient};
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Literal login body the service must receive.
pub const LOGIN_BODY: &str = r#"{"email":"a@b.com","password":"p"}"#;

/// Mock member data service.
pub struct MockDataService {
    pub server: MockServer,
}

impl MockDataService {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Accept exactly one login with the literal test credentials.
    pub async fn mock_login(&self) {
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(body_string(LOGIN_BODY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authcode": "c1",
                "autoLoginSeries": null,
                "autoLoginToken": null,
                "custId": 42,
                "email": "a@b.com",
                "ssoCookieDomain": ".iracing.com",
                "ssoCookieName": "irsso_membersv2",
                "ssoCookiePath": "/",
                "ssoCookieValue": "s1"
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `route` with a presigned link to `target` on this server.
    pub async fn mock_link(&self, route: &str, target: &str, expires: DateTime<Utc>) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "link": format!("{}{}", self.uri(), target),
                "expires": expires.to_rfc3339(),
            })))
            .mount(&self.server)
            .await;
    }

    /// Requests received on `route`, with their method.
    pub async fn requests_to(&self, route: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == route)
            .collect()
    }
}

/// Client for the test account pointed at the mock service.
pub fn client_for(service: &MockDataService, clock: &TestClock) -> DataClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    DataClient::builder(Credentials::new("a@b.com", "p"))
        .base_url(service.uri())
        .clock(clock.clone())
        .build()
        .expect("client should build")
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct TestClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

/// `Cookie` header of a recorded request.
pub fn cookie_of(request: &Request) -> Option<String> {
    request.headers.get("cookie").and_then(|value| value.to_str().ok()).map(str::to_string)
}
